use std::fmt;
use std::fmt::Formatter;

use log::{debug, info};

use crate::cubic;
use crate::error::{ProfileError, ProfileResult};
use crate::evaluator::ProfileEvaluator;
use crate::limits::MotionLimits;
use crate::phase::{Parameter, Phase, PhaseAnchor, PhaseTable};
use crate::timing::{self, Regime};

/// Distances this close (relative) outside the profile range are pulled into it
const DISTANCE_TOLERANCE: f64 = 1e-9;

/// a single value of a profile sampled at time t
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sample {
    pub t: f64,
    pub value: f64,
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Sample(t: {}, value: {})", self.t, self.value)
    }
}

/// Jerk-limited point-to-point motion profile
///
/// Built once from its limits, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    limits: MotionLimits,
    regime: Regime,
    acceleration_max_actual: f64,
    velocity_max_actual: f64,
    anchors: PhaseTable,
}

impl Profile {
    /// Creates a profile covering `distance_total` within the given limits
    ///
    /// # Examples
    ///
    /// ```
    /// use scurvegen::Profile;
    /// let profile = Profile::new(100., 13., 5., 2.26).unwrap();
    /// let t = profile.time_end() / 2.;
    /// assert!(profile.velocity(t) <= 13.);
    /// ```
    pub fn new(distance_total: f64, velocity_max: f64, acceleration_max: f64, jerk: f64) -> ProfileResult<Profile> {
        Profile::from_limits(MotionLimits::new(distance_total, velocity_max, acceleration_max, jerk)?)
    }

    /// Creates a profile from already assembled limits
    pub fn from_limits(limits: MotionLimits) -> ProfileResult<Profile> {
        limits.validate()?;

        let timing = timing::solve(&limits);
        let mut anchors = PhaseTable::from_time_sections(&timing.sections);
        let acceleration_max_actual = timing.acceleration_max_actual;

        let evaluator = ProfileEvaluator::new(limits.jerk, acceleration_max_actual, &anchors);
        let velocity_max_actual = evaluator.evaluate_in_phase(
            Parameter::Velocity, Phase::AccelerateEnd, anchors[Phase::AccelerateEnd].time_section);
        let distance_ends = map_distances(&evaluator, &anchors);
        anchors.set_distance_ends(&distance_ends);

        info!("Generated {} profile for {}: duration {}, peak velocity {}, peak acceleration {}",
              timing.regime, limits, anchors.time_end(), velocity_max_actual, acceleration_max_actual);
        for (phase, anchor) in anchors.iter() {
            debug!("{}: {}", phase, anchor);
        }

        Ok(Profile {
            limits,
            regime: timing.regime,
            acceleration_max_actual,
            velocity_max_actual,
            anchors,
        })
    }

    fn evaluator(&self) -> ProfileEvaluator<'_> {
        ProfileEvaluator::new(self.limits.jerk, self.acceleration_max_actual, &self.anchors)
    }

    pub fn limits(&self) -> &MotionLimits {
        &self.limits
    }

    pub fn regime(&self) -> Regime {
        self.regime
    }

    /// Highest velocity the profile reaches, never above `velocity_max`
    pub fn velocity_max_actual(&self) -> f64 {
        self.velocity_max_actual
    }

    /// Highest acceleration magnitude the profile reaches, never above `acceleration_max`
    pub fn acceleration_max_actual(&self) -> f64 {
        self.acceleration_max_actual
    }

    pub fn phase_anchor(&self, phase: Phase) -> PhaseAnchor {
        self.anchors[phase]
    }

    pub fn phase_anchors(&self) -> &PhaseTable {
        &self.anchors
    }

    /// Total duration of the move
    pub fn time_end(&self) -> f64 {
        self.anchors.time_end()
    }

    /// The phase active at time `t`, the first phase before the start and the last one after the end
    pub fn phase(&self, t: f64) -> Phase {
        self.anchors.phase_at_time(t)
    }

    /// Returns the value of `parameter` at time `t`
    ///
    /// Times outside `[0, time_end]` are clamped to the nearest end of the move.
    pub fn value(&self, parameter: Parameter, t: f64) -> f64 {
        self.evaluator().evaluate(parameter, t)
    }

    /// Convenience function to return the travelled distance at time `t`
    pub fn position(&self, t: f64) -> f64 {
        self.value(Parameter::Distance, t)
    }

    /// Convenience function to return the velocity at time `t`
    pub fn velocity(&self, t: f64) -> f64 {
        self.value(Parameter::Velocity, t)
    }

    /// Convenience function to return the acceleration at time `t`
    pub fn acceleration(&self, t: f64) -> f64 {
        self.value(Parameter::Acceleration, t)
    }

    /// Convenience function to return the jerk at time `t`
    pub fn jerk(&self, t: f64) -> f64 {
        self.value(Parameter::Jerk, t)
    }

    /// Returns the time at which the move has travelled distance `d`
    ///
    /// # Arguments
    ///
    /// `d` - travelled distance within `[0, distance_total]`
    ///
    /// # Examples
    ///
    /// ```
    /// use scurvegen::Profile;
    /// let profile = Profile::new(100., 13., 5., 2.26).unwrap();
    /// let t = profile.time_of(50.).unwrap();
    /// assert!((profile.position(t) - 50.).abs() < 1e-6);
    /// assert!(profile.time_of(101.).is_err());
    /// ```
    pub fn time_of(&self, d: f64) -> ProfileResult<f64> {
        let d = self.check_distance(d)?;
        let distance_end = self.anchors.distance_end();
        // the nominal total is where the computed profile ends, whatever rounding did to its distance
        let d = if d >= self.limits.distance_total { distance_end } else { d.min(distance_end) };
        let phase = self.anchors.phase_at_distance(d);
        let anchor = &self.anchors[phase];

        let evaluator = self.evaluator();
        if phase == Phase::last() {
            // the local cubic has a triple root at the end of the move, solve from the far end instead
            let time_left = evaluator.time_to_rest(anchor.distance_end - d);
            return Ok((anchor.time_end - time_left).max(anchor.time_begin));
        }

        let poly = evaluator.local_distance(phase, d - anchor.distance_begin);
        let root = cubic::root_within(&poly, anchor.time_section)
            .ok_or(ProfileError::NoRootInPhase { phase, distance: d })?;
        Ok(anchor.time_begin + root)
    }

    /// Position reached at distance `d`, which is `d` itself once checked against the profile range
    pub fn position_at_distance(&self, d: f64) -> ProfileResult<f64> {
        self.check_distance(d)
    }

    pub fn velocity_at_distance(&self, d: f64) -> ProfileResult<f64> {
        Ok(self.velocity(self.time_of(d)?))
    }

    pub fn acceleration_at_distance(&self, d: f64) -> ProfileResult<f64> {
        Ok(self.acceleration(self.time_of(d)?))
    }

    pub fn jerk_at_distance(&self, d: f64) -> ProfileResult<f64> {
        Ok(self.jerk(self.time_of(d)?))
    }

    fn check_distance(&self, d: f64) -> ProfileResult<f64> {
        let total = self.limits.distance_total;
        let tolerance = DISTANCE_TOLERANCE * total.max(1.);
        if d >= -tolerance && d <= total + tolerance {
            Ok(d.max(0.).min(total))
        } else {
            Err(ProfileError::DistanceOutOfRange { distance: d, total })
        }
    }

    /// Returns samples of `parameter` covering the input time range and step
    ///
    /// # Arguments
    ///
    /// `start` - start time
    /// `end` - end time, no earlier than `start`
    /// `step` - time step, strictly positive
    /// `parameter` - the quantity to sample
    ///
    /// # Examples
    ///
    /// ```
    /// use scurvegen::{Parameter, Profile};
    /// let profile = Profile::new(100., 13., 5., 2.26).unwrap();
    /// // sample velocities at a 1kHz control rate
    /// let samples = profile.values(0., profile.time_end(), 0.001, Parameter::Velocity).unwrap();
    /// ```
    pub fn values(&self, start: f64, end: f64, step: f64, parameter: Parameter) -> ProfileResult<Vec<Sample>> {
        if !(start.is_finite() && end.is_finite() && end >= start && step.is_finite() && step > 0.) {
            return Err(ProfileError::InvalidSampleRange { start, end, step });
        }

        let evaluator = self.evaluator();
        let mut values = Vec::new();
        let mut idx: u64 = 0;
        loop {
            let t = start + idx as f64 * step;
            if t > end {
                break;
            }
            values.push(Sample { t, value: evaluator.evaluate(parameter, t) });
            idx += 1;
        }
        Ok(values)
    }

    /// Convenience function to sample positions
    pub fn positions(&self, start: f64, end: f64, step: f64) -> ProfileResult<Vec<Sample>> {
        self.values(start, end, step, Parameter::Distance)
    }

    /// Convenience function to sample velocities
    pub fn velocities(&self, start: f64, end: f64, step: f64) -> ProfileResult<Vec<Sample>> {
        self.values(start, end, step, Parameter::Velocity)
    }

    /// Convenience function to sample accelerations
    pub fn accelerations(&self, start: f64, end: f64, step: f64) -> ProfileResult<Vec<Sample>> {
        self.values(start, end, step, Parameter::Acceleration)
    }

    /// Convenience function to sample jerks
    pub fn jerks(&self, start: f64, end: f64, step: f64) -> ProfileResult<Vec<Sample>> {
        self.values(start, end, step, Parameter::Jerk)
    }
}

/// Cumulative distance at the end of every phase
fn map_distances(evaluator: &ProfileEvaluator<'_>, anchors: &PhaseTable) -> [f64; Phase::COUNT] {
    let mut distance_ends = [0.; Phase::COUNT];
    for (phase, anchor) in anchors.iter() {
        distance_ends[phase.index()] = evaluator.evaluate_in_phase(Parameter::Distance, phase, anchor.time_section);
    }
    distance_ends
}
