//! Phase durations for the three motion regimes.

use std::fmt;
use std::fmt::Formatter;

use log::warn;

use crate::limits::MotionLimits;
use crate::phase::Phase;

/// Which shape the velocity curve takes for the requested distance
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Regime {
    /// peak velocity is reached and held for a while
    Cruise,
    /// full acceleration is reached but held shorter, no cruise
    ShortenedRetain,
    /// acceleration ramps straight up and down, no retain and no cruise
    Triangular,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Outcome of the timing pass
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct PhaseTiming {
    pub regime: Regime,
    /// duration of each phase in `Phase::ALL` order
    pub sections: [f64; Phase::COUNT],
    /// acceleration reached at the end of the jerk ramp
    pub acceleration_max_actual: f64,
}

/// Velocity gained and distance covered by the three accelerate sub-phases
///
/// # Arguments
///
/// `jerk` - jerk during the ramps
/// `time_accelerate` - duration of each jerk ramp
/// `time_retain` - duration of the constant acceleration in between
fn accelerate_block(jerk: f64, time_accelerate: f64, time_retain: f64) -> (f64, f64) {
    let acceleration = jerk * time_accelerate;
    let velocity = [
        0.5 * jerk * time_accelerate.powi(2),
        acceleration * time_retain,
        acceleration * time_accelerate - 0.5 * jerk * time_accelerate.powi(2),
    ];
    let distance = [
        jerk * time_accelerate.powi(3) / 6.,
        0.5 * acceleration * time_retain.powi(2) + velocity[0] * time_retain,
        -jerk * time_accelerate.powi(3) / 6. + 0.5 * acceleration * time_accelerate.powi(2)
            + (velocity[0] + velocity[1]) * time_accelerate,
    ];
    (velocity.iter().sum(), distance.iter().sum())
}

/// negative durations can only come from rounding
fn clamp_duration(name: &str, value: f64) -> f64 {
    if value < 0. {
        warn!("Clamping negative {} duration {} to zero", name, value);
        0.
    } else {
        value
    }
}

/// Derives the seven phase durations that cover `limits.distance_total`
pub(crate) fn solve(limits: &MotionLimits) -> PhaseTiming {
    let jerk = limits.jerk;
    let distance_half = limits.distance_total / 2.;

    // ramp until either the acceleration or the velocity limit is hit
    let mut time_accelerate = (limits.acceleration_max / jerk)
        .min(limits.velocity_max / limits.acceleration_max);
    let mut time_retain = (limits.velocity_max - jerk * time_accelerate.powi(2)) / (jerk * time_accelerate);
    let mut time_drift = 0.;

    let (velocity_full, distance_full) = accelerate_block(jerk, time_accelerate, time_retain);
    let (_, distance_ramps) = accelerate_block(jerk, time_accelerate, 0.);

    let regime = if distance_half > distance_full {
        time_drift = (limits.distance_total - 2. * distance_full) / velocity_full;
        Regime::Cruise
    } else if distance_half > distance_ramps {
        // half distance = ramps + (3/2) j Ta^2 Tr + (1/2) j Ta Tr^2
        let a = 0.5 * jerk * time_accelerate;
        let b = 1.5 * jerk * time_accelerate.powi(2);
        let c = -(distance_half - distance_ramps);
        time_retain = (-b + (b * b - 4. * a * c).sqrt()) / (2. * a);
        Regime::ShortenedRetain
    } else {
        // half distance = j Ta^3
        time_accelerate = (limits.distance_total / (2. * jerk)).cbrt();
        time_retain = 0.;
        Regime::Triangular
    };

    let time_accelerate = clamp_duration("accelerate", time_accelerate);
    let time_retain = clamp_duration("retain", time_retain);
    let time_drift = clamp_duration("drift", time_drift);

    PhaseTiming {
        regime,
        sections: [
            time_accelerate, time_retain, time_accelerate,
            time_drift,
            time_accelerate, time_retain, time_accelerate,
        ],
        acceleration_max_actual: jerk * time_accelerate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert::close;

    fn limits(d: f64, v: f64, a: f64, j: f64) -> MotionLimits {
        MotionLimits::new(d, v, a, j).unwrap()
    }

    #[test]
    fn block_without_retain() {
        // j Ta^2 velocity and j Ta^3 distance
        let (velocity, distance) = accelerate_block(2., 1.5, 0.);
        close(4.5, velocity, 1e-12);
        close(6.75, distance, 1e-12);
    }

    #[test]
    fn block_with_retain() {
        let (velocity, distance) = accelerate_block(2., 2.5, 7.5);
        close(50., velocity, 1e-12);
        close(312.5, distance, 1e-9);
    }

    #[test]
    fn cruise_regime() {
        let timing = solve(&limits(1000., 50., 5., 2.));
        assert_eq!(Regime::Cruise, timing.regime);
        close(2.5, timing.sections[0], 1e-12);
        close(7.5, timing.sections[1], 1e-12);
        close(7.5, timing.sections[3], 1e-9);
        close(5., timing.acceleration_max_actual, 1e-12);
    }

    #[test]
    fn shortened_retain_regime() {
        let timing = solve(&limits(300., 50., 5., 2.));
        assert_eq!(Regime::ShortenedRetain, timing.regime);
        assert_eq!(0., timing.sections[3]);
        assert!(timing.sections[1] > 0. && timing.sections[1] < 7.5);

        // the shortened block covers exactly half of the distance
        let (_, distance) = accelerate_block(2., timing.sections[0], timing.sections[1]);
        close(150., distance, 1e-9);
    }

    #[test]
    fn triangular_regime() {
        let timing = solve(&limits(1., 50., 5., 2.));
        assert_eq!(Regime::Triangular, timing.regime);
        close(0.25f64.cbrt(), timing.sections[0], 1e-12);
        assert_eq!(0., timing.sections[1]);
        assert_eq!(0., timing.sections[3]);
        assert!(timing.acceleration_max_actual < 5.);
    }

    #[test]
    fn zero_distance() {
        let timing = solve(&limits(0., 50., 5., 2.));
        assert_eq!(Regime::Triangular, timing.regime);
        assert_eq!([0.; 7], timing.sections);
        assert_eq!(0., timing.acceleration_max_actual);
    }

    #[test]
    fn ramp_duration_limit() {
        // acceleration cap is hit first: Ta = a / j
        let timing = solve(&limits(100., 13., 5., 2.26));
        assert_eq!(Regime::Cruise, timing.regime);
        close(5. / 2.26, timing.sections[0], 1e-12);

        // velocity cap is hit first: Ta = v / a
        let timing = solve(&limits(1000., 2., 5., 1.));
        close(0.4, timing.sections[0], 1e-12);
        assert!(timing.acceleration_max_actual <= 5.);
    }

    #[test]
    fn sections_are_mirrored() {
        let timing = solve(&limits(100., 13., 5., 2.26));
        for idx in 0..3 {
            assert_eq!(timing.sections[idx], timing.sections[6 - idx]);
        }
    }
}
