use std::fmt;
use std::fmt::Formatter;

use crate::error::{ProfileError, ProfileResult};

/// The travel distance and the kinematic limits a profile must respect
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MotionLimits {
    pub distance_total: f64,
    pub velocity_max: f64,
    pub acceleration_max: f64,
    pub jerk: f64,
}

impl MotionLimits {
    /// Creates validated motion limits
    ///
    /// # Arguments
    ///
    /// `distance_total` - distance to travel, zero or more
    /// `velocity_max` - velocity limit, strictly positive
    /// `acceleration_max` - acceleration limit, strictly positive
    /// `jerk` - jerk applied while ramping acceleration, strictly positive
    ///
    /// # Examples
    ///
    /// ```
    /// use scurvegen::MotionLimits;
    /// let limits = MotionLimits::new(100., 13., 5., 2.26).unwrap();
    /// assert!(MotionLimits::new(100., 13., 5., 0.).is_err());
    /// ```
    pub fn new(distance_total: f64, velocity_max: f64, acceleration_max: f64, jerk: f64) -> ProfileResult<MotionLimits> {
        let limits = MotionLimits { distance_total, velocity_max, acceleration_max, jerk };
        limits.validate()?;
        Ok(limits)
    }

    /// Checks every field against its allowed range
    pub fn validate(&self) -> ProfileResult<()> {
        non_negative("distance_total", self.distance_total)?;
        positive("velocity_max", self.velocity_max)?;
        positive("acceleration_max", self.acceleration_max)?;
        positive("jerk", self.jerk)
    }
}

impl fmt::Display for MotionLimits {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "MotionLimits(distance: {}, velocity: {}, acceleration: {}, jerk: {})",
               self.distance_total, self.velocity_max, self.acceleration_max, self.jerk)
    }
}

pub(crate) fn positive(name: &'static str, value: f64) -> ProfileResult<()> {
    if value.is_finite() && value > 0. {
        Ok(())
    } else {
        Err(ProfileError::InvalidLimit { name, value })
    }
}

pub(crate) fn non_negative(name: &'static str, value: f64) -> ProfileResult<()> {
    if value.is_finite() && value >= 0. {
        Ok(())
    } else {
        Err(ProfileError::InvalidLimit { name, value })
    }
}
