//! Closed-form kinematics of the seven phases.

use crate::phase::{Parameter, Phase, PhaseTable};
use crate::polynomial::Polynomial;

/// Evaluates a profile's piecewise polynomials against its time anchors
#[derive(Debug, Copy, Clone)]
pub(crate) struct ProfileEvaluator<'a> {
    jerk: f64,
    acceleration: f64,
    anchors: &'a PhaseTable,
}

impl<'a> ProfileEvaluator<'a> {
    /// # Arguments
    ///
    /// `jerk` - jerk magnitude of the ramp phases
    /// `acceleration` - acceleration held during the retain phases
    /// `anchors` - table with the time anchors filled in
    pub fn new(jerk: f64, acceleration: f64, anchors: &'a PhaseTable) -> ProfileEvaluator<'a> {
        ProfileEvaluator { jerk, acceleration, anchors }
    }

    /// Returns the value of `parameter` at time `t`, clamped to the profile duration
    pub fn evaluate(&self, parameter: Parameter, t: f64) -> f64 {
        let t = t.max(0.).min(self.anchors.time_end());
        let phase = self.anchors.phase_at_time(t);
        self.evaluate_in_phase(parameter, phase, t - self.anchors[phase].time_begin)
    }

    /// Returns the value of `parameter` after `local_t` has elapsed in `phase`
    pub fn evaluate_in_phase(&self, parameter: Parameter, phase: Phase, local_t: f64) -> f64 {
        match parameter {
            Parameter::Jerk => self.jerk_in(phase),
            Parameter::Acceleration => self.acceleration_in(phase, local_t),
            Parameter::Velocity => self.accumulate(phase, local_t).0,
            Parameter::Distance => self.accumulate(phase, local_t).1,
        }
    }

    /// Velocity carried into `phase` from every phase before it
    pub fn velocity_at_begin(&self, phase: Phase) -> f64 {
        self.accumulate(phase, 0.).0
    }

    /// Distance travelled inside `phase` as a function of local time, minus `local_distance`
    ///
    /// Its root in `[0, time_section]` is the local time at which `local_distance` is reached.
    pub fn local_distance(&self, phase: Phase, local_distance: f64) -> Polynomial {
        let (quadratic, cubic) = self.distance_coeffs(phase);
        Polynomial::cubic(-local_distance, self.velocity_at_begin(phase), quadratic, cubic)
    }

    /// Time left until rest once `distance_remaining` is all that is left of the final phase
    ///
    /// The move ends at zero velocity and acceleration under constant jerk, so the remaining
    /// distance is `j/6 * time_left^3`.
    pub fn time_to_rest(&self, distance_remaining: f64) -> f64 {
        (6. * distance_remaining.max(0.) / self.jerk).cbrt()
    }

    fn jerk_in(&self, phase: Phase) -> f64 {
        match phase {
            Phase::AccelerateBegin | Phase::DecelerateEnd => self.jerk,
            Phase::AccelerateEnd | Phase::DecelerateBegin => -self.jerk,
            Phase::AccelerateRetain | Phase::Drift | Phase::DecelerateRetain => 0.,
        }
    }

    fn acceleration_in(&self, phase: Phase, dt: f64) -> f64 {
        match phase {
            Phase::AccelerateBegin => self.jerk * dt,
            Phase::AccelerateRetain => self.acceleration,
            Phase::AccelerateEnd => self.acceleration - self.jerk * dt,
            Phase::Drift => 0.,
            Phase::DecelerateBegin => -self.jerk * dt,
            Phase::DecelerateRetain => -self.acceleration,
            Phase::DecelerateEnd => -self.acceleration + self.jerk * dt,
        }
    }

    fn velocity_delta(&self, phase: Phase, dt: f64) -> f64 {
        let accelerate = match phase {
            Phase::AccelerateBegin | Phase::DecelerateBegin => 0.5 * self.jerk * dt.powi(2),
            Phase::AccelerateRetain | Phase::DecelerateRetain => self.acceleration * dt,
            Phase::AccelerateEnd | Phase::DecelerateEnd => self.acceleration * dt - 0.5 * self.jerk * dt.powi(2),
            Phase::Drift => 0.,
        };
        if phase > Phase::Drift { -accelerate } else { accelerate }
    }

    /// (quadratic, cubic) coefficients of the distance a phase adds on top of its carried velocity
    fn distance_coeffs(&self, phase: Phase) -> (f64, f64) {
        let (quadratic, cubic) = match phase {
            Phase::AccelerateBegin | Phase::DecelerateBegin => (0., self.jerk / 6.),
            Phase::AccelerateRetain | Phase::DecelerateRetain => (0.5 * self.acceleration, 0.),
            Phase::AccelerateEnd | Phase::DecelerateEnd => (0.5 * self.acceleration, -self.jerk / 6.),
            Phase::Drift => (0., 0.),
        };
        if phase > Phase::Drift { (-quadratic, -cubic) } else { (quadratic, cubic) }
    }

    /// (velocity, distance) after `local_t` in `phase`, summing every earlier phase in full
    fn accumulate(&self, phase: Phase, local_t: f64) -> (f64, f64) {
        let mut velocity = 0.;
        let mut distance = 0.;
        for current in Phase::ALL.into_iter().take(phase.index() + 1) {
            let dt = if current == phase { local_t } else { self.anchors[current].time_section };
            let (quadratic, cubic) = self.distance_coeffs(current);
            distance += velocity * dt + quadratic * dt.powi(2) + cubic * dt.powi(3);
            velocity += self.velocity_delta(current, dt);
        }
        (velocity, distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert::close;

    // 1s ramps, 1s retain and 2s drift with jerk 2 and acceleration 2
    fn table() -> PhaseTable {
        PhaseTable::from_time_sections(&[1., 1., 1., 2., 1., 1., 1.])
    }

    #[test]
    fn jerk_pattern() {
        let anchors = table();
        let evaluator = ProfileEvaluator::new(2., 2., &anchors);
        let expected = [2., 0., -2., 0., -2., 0., 2.];
        for phase in Phase::ALL {
            let t = anchors[phase].time_begin + 0.5;
            assert_eq!(expected[phase.index()], evaluator.evaluate(Parameter::Jerk, t));
        }
    }

    #[test]
    fn acceleration_is_continuous() {
        let anchors = table();
        let evaluator = ProfileEvaluator::new(2., 2., &anchors);
        close(1., evaluator.evaluate(Parameter::Acceleration, 0.5), 1e-12);
        close(2., evaluator.evaluate(Parameter::Acceleration, 1.5), 1e-12);
        close(1., evaluator.evaluate(Parameter::Acceleration, 2.5), 1e-12);
        close(0., evaluator.evaluate(Parameter::Acceleration, 4.), 1e-12);
        close(-1., evaluator.evaluate(Parameter::Acceleration, 5.5), 1e-12);
        close(-2., evaluator.evaluate(Parameter::Acceleration, 6.5), 1e-12);
        close(-1., evaluator.evaluate(Parameter::Acceleration, 7.5), 1e-12);
        close(0., evaluator.evaluate(Parameter::Acceleration, 8.), 1e-12);
    }

    #[test]
    fn velocity_accumulates() {
        let anchors = table();
        let evaluator = ProfileEvaluator::new(2., 2., &anchors);
        close(0., evaluator.evaluate(Parameter::Velocity, 0.), 1e-12);
        close(1., evaluator.evaluate(Parameter::Velocity, 1.), 1e-12);
        close(3., evaluator.evaluate(Parameter::Velocity, 2.), 1e-12);
        close(4., evaluator.evaluate(Parameter::Velocity, 3.), 1e-12);
        close(4., evaluator.evaluate(Parameter::Velocity, 4.), 1e-12);
        close(3., evaluator.evaluate(Parameter::Velocity, 6.), 1e-12);
        close(0., evaluator.evaluate(Parameter::Velocity, 8.), 1e-12);
        close(4., evaluator.velocity_at_begin(Phase::DecelerateBegin), 1e-12);
    }

    #[test]
    fn distance_accumulates() {
        let anchors = table();
        let evaluator = ProfileEvaluator::new(2., 2., &anchors);
        close(1. / 3., evaluator.evaluate(Parameter::Distance, 1.), 1e-12);
        // 1/3 + (1 + 1) + (3 + 1 - 1/3)
        close(6., evaluator.evaluate(Parameter::Distance, 3.), 1e-12);
        close(14., evaluator.evaluate(Parameter::Distance, 5.), 1e-12);
        close(20., evaluator.evaluate(Parameter::Distance, 8.), 1e-12);
    }

    #[test]
    fn time_is_clamped() {
        let anchors = table();
        let evaluator = ProfileEvaluator::new(2., 2., &anchors);
        assert_eq!(0., evaluator.evaluate(Parameter::Distance, -1.));
        assert_eq!(0., evaluator.evaluate(Parameter::Velocity, -1.));
        close(20., evaluator.evaluate(Parameter::Distance, 100.), 1e-12);
        close(0., evaluator.evaluate(Parameter::Velocity, 100.), 1e-12);
    }

    #[test]
    fn local_distance_polynomial() {
        let anchors = table();
        let evaluator = ProfileEvaluator::new(2., 2., &anchors);
        let poly = evaluator.local_distance(Phase::AccelerateEnd, 0.5);
        assert_eq!(-0.5, poly.coeff(0));
        close(3., poly.coeff(1), 1e-12);
        close(1., poly.coeff(2), 1e-12);
        close(-1. / 3., poly.coeff(3), 1e-12);

        // the polynomial plus the target is the distance covered inside the phase
        let inside = evaluator.evaluate(Parameter::Distance, 2.5) - evaluator.evaluate(Parameter::Distance, 2.);
        close(inside - 0.5, poly.eval(0.5), 1e-12);

        let poly = evaluator.local_distance(Phase::Drift, 1.);
        assert_eq!(1, poly.degree());
    }

    #[test]
    fn time_to_rest_mirrors_final_phase() {
        let anchors = table();
        let evaluator = ProfileEvaluator::new(2., 2., &anchors);
        // the last 1s ramp covers j/6 = 1/3
        close(1., evaluator.time_to_rest(1. / 3.), 1e-12);
        assert_eq!(0., evaluator.time_to_rest(0.));
        assert_eq!(0., evaluator.time_to_rest(-1e-15));

        for local_t in [0., 0.25, 0.5, 0.999, 1.] {
            let remaining = 20. - evaluator.evaluate(Parameter::Distance, 7. + local_t);
            close(1. - local_t, evaluator.time_to_rest(remaining), 1e-4);
        }
    }
}
