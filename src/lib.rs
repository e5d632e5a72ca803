/*!
# scurvegen

**scurvegen** generates jerk-limited ("S-curve") point-to-point motion profiles - given a travel
distance and limits on velocity, acceleration and jerk, the library derives a seven phase profile
and evaluates it in closed form.

## Features
* position, velocity, acceleration and jerk as a function of elapsed time
* the inverse mapping from travelled distance back to elapsed time
* automatic fallback to shorter shapes when the distance is too short to reach the limits
* a jerk-unlimited trapezoidal profile for comparison

## Using **scurvegen**
Simply add the following to your `Cargo.toml` file:

```ignore
[dependencies]
scurvegen = "*"
```

and now you can generate and use profiles:

```
use scurvegen::{Profile, Phase};

fn main() {
    // distance, velocity limit, acceleration limit, jerk
    let profile = Profile::new(100., 13., 5., 2.26).unwrap();

    // use the individual values in real-time, perhaps to control an actuator
    let t = 1.5;
    println!("Desired position at time {} is {}", t, profile.position(t));
    println!("Desired velocity at time {} is {}", t, profile.velocity(t));
    println!("Desired acceleration at time {} is {}", t, profile.acceleration(t));

    // or go the other way round, from distance to time
    let t = profile.time_of(50.).unwrap();
    assert_eq!(Phase::Drift, profile.phase(t));

    // or get values for a range of times, perhaps to plot
    let path = profile.positions(0., profile.time_end(), 0.1).unwrap();
}
```

## Phases
A full move goes through `AccelerateBegin` (jerk up), `AccelerateRetain` (constant acceleration),
`AccelerateEnd` (jerk down), `Drift` (constant velocity) and the mirrored deceleration phases. Short
moves skip the drift, very short moves skip the retain phases as well - see `Regime`.
 */

mod cubic;
mod error;
mod evaluator;
mod limits;
mod phase;
mod polynomial;
mod profile;
mod timing;
mod trapezoidal;

pub use error::{ProfileError, ProfileResult};
pub use limits::MotionLimits;
pub use phase::{Parameter, Phase, PhaseAnchor, PhaseTable};
pub use polynomial::Polynomial;
pub use profile::{Profile, Sample};
pub use timing::Regime;
pub use trapezoidal::TrapezoidalProfile;
