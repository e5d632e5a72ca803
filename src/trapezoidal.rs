use log::info;

use crate::error::ProfileResult;
use crate::limits::{non_negative, positive};

/// Jerk-unlimited profile: constant acceleration, optional slide at peak velocity, constant deceleration
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TrapezoidalProfile {
    acceleration: f64,
    velocity_max_actual: f64,
    time_speeding: f64,
    time_sliding: f64,
    time_full: f64,
}

impl TrapezoidalProfile {
    /// Creates a trapezoidal profile
    ///
    /// # Arguments
    ///
    /// `distance` - distance to travel, zero or more
    /// `velocity_max` - velocity limit, strictly positive
    /// `acceleration` - acceleration and deceleration magnitude, strictly positive
    ///
    /// # Examples
    ///
    /// ```
    /// use scurvegen::TrapezoidalProfile;
    /// let profile = TrapezoidalProfile::new(100., 10., 2.).unwrap();
    /// assert_eq!(15., profile.time());
    /// ```
    pub fn new(distance: f64, velocity_max: f64, acceleration: f64) -> ProfileResult<TrapezoidalProfile> {
        non_negative("distance", distance)?;
        positive("velocity_max", velocity_max)?;
        positive("acceleration", acceleration)?;

        // short moves never reach the velocity limit
        let velocity_max_actual = (acceleration * distance).sqrt().min(velocity_max);
        let time_speeding = velocity_max_actual / acceleration;
        let speeding_distance = velocity_max_actual * time_speeding;
        let time_sliding = if velocity_max_actual > 0. {
            ((distance - speeding_distance) / velocity_max_actual).max(0.)
        } else {
            0.
        };
        let time_full = 2. * time_speeding + time_sliding;

        info!("Generated trapezoidal profile for distance {}: duration {}, peak velocity {}",
              distance, time_full, velocity_max_actual);

        Ok(TrapezoidalProfile { acceleration, velocity_max_actual, time_speeding, time_sliding, time_full })
    }

    /// Travelled distance at time `t`, clamped to the profile duration
    pub fn distance(&self, t: f64) -> f64 {
        let t = t.max(0.).min(self.time_full);
        let mut distance = 0.;

        let accelerate_time = t.min(self.time_speeding);
        distance += 0.5 * self.acceleration * accelerate_time.powi(2);

        let slide_time = (t - self.time_speeding).min(self.time_sliding);
        if slide_time > 0. {
            distance += self.velocity_max_actual * slide_time;
        }

        let decelerate_time = t - self.time_speeding - self.time_sliding;
        if decelerate_time > 0. {
            distance += self.velocity_max_actual * decelerate_time - 0.5 * self.acceleration * decelerate_time.powi(2);
        }
        distance
    }

    /// Velocity at time `t`, clamped to the profile duration
    pub fn velocity(&self, t: f64) -> f64 {
        let t = t.max(0.).min(self.time_full);
        if t < self.time_speeding {
            self.acceleration * t
        } else if t < self.time_speeding + self.time_sliding {
            self.velocity_max_actual
        } else {
            (self.velocity_max_actual - self.acceleration * (t - self.time_speeding - self.time_sliding)).max(0.)
        }
    }

    /// Total duration of the move
    pub fn time(&self) -> f64 {
        self.time_full
    }

    pub fn velocity_max_actual(&self) -> f64 {
        self.velocity_max_actual
    }
}
