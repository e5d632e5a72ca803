//! The seven motion phases and their time/distance anchors.

use std::fmt;
use std::fmt::Formatter;
use std::ops::{Index, IndexMut};

/// The stages of an S-curve move, in temporal order
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    AccelerateBegin,
    AccelerateRetain,
    AccelerateEnd,
    Drift,
    DecelerateBegin,
    DecelerateRetain,
    DecelerateEnd,
}

impl Phase {
    /// Number of phases in a profile
    pub const COUNT: usize = 7;

    /// Every phase, in temporal order
    pub const ALL: [Phase; Phase::COUNT] = [
        Phase::AccelerateBegin,
        Phase::AccelerateRetain,
        Phase::AccelerateEnd,
        Phase::Drift,
        Phase::DecelerateBegin,
        Phase::DecelerateRetain,
        Phase::DecelerateEnd,
    ];

    /// Position of the phase in `Phase::ALL`
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn first() -> Phase {
        Phase::AccelerateBegin
    }

    pub fn last() -> Phase {
        Phase::DecelerateEnd
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The kinematic quantities a profile can be evaluated for
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Parameter {
    Distance,
    Velocity,
    Acceleration,
    Jerk,
}

/// Time and distance boundaries of a single phase
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PhaseAnchor {
    pub time_begin: f64,
    pub time_section: f64,
    pub time_end: f64,
    pub distance_begin: f64,
    pub distance_section: f64,
    pub distance_end: f64,
}

impl fmt::Display for PhaseAnchor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "PhaseAnchor(time: {} + {} = {}, distance: {} + {} = {})",
               self.time_begin, self.time_section, self.time_end,
               self.distance_begin, self.distance_section, self.distance_end)
    }
}

/// Fixed-size table of anchors indexed by `Phase`
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PhaseTable {
    anchors: [PhaseAnchor; Phase::COUNT],
}

impl PhaseTable {
    /// Builds the time half of the table by prefix-summing the phase durations
    ///
    /// # Arguments
    ///
    /// `sections` - duration of every phase, in `Phase::ALL` order
    pub(crate) fn from_time_sections(sections: &[f64; Phase::COUNT]) -> PhaseTable {
        let mut table = PhaseTable::default();
        let mut time_accumulate = 0.0;
        for phase in Phase::ALL {
            let anchor = &mut table[phase];
            anchor.time_begin = time_accumulate;
            anchor.time_section = sections[phase.index()];
            anchor.time_end = time_accumulate + anchor.time_section;
            time_accumulate = anchor.time_end;
        }
        table
    }

    /// Fills the distance half of the table from the cumulative distance at every phase end
    ///
    /// # Arguments
    ///
    /// `distance_ends` - cumulative distance at the end of every phase, in `Phase::ALL` order
    pub(crate) fn set_distance_ends(&mut self, distance_ends: &[f64; Phase::COUNT]) {
        let mut distance_accumulate = 0.0;
        for phase in Phase::ALL {
            let anchor = &mut self[phase];
            // rounding must never make the distance run backwards
            let end = distance_ends[phase.index()].max(distance_accumulate);
            anchor.distance_begin = distance_accumulate;
            anchor.distance_section = end - distance_accumulate;
            anchor.distance_end = end;
            distance_accumulate = end;
        }
    }

    /// The phase active at time `t`: the last phase that has begun, clamped to the first and last phase
    pub fn phase_at_time(&self, t: f64) -> Phase {
        Phase::ALL.iter().rev()
            .find(|phase| self[**phase].time_begin <= t)
            .copied()
            .unwrap_or(Phase::first())
    }

    /// The phase covering distance `d`: the last phase whose distance range has begun
    pub fn phase_at_distance(&self, d: f64) -> Phase {
        Phase::ALL.iter().rev()
            .find(|phase| self[**phase].distance_begin <= d)
            .copied()
            .unwrap_or(Phase::first())
    }

    pub fn time_end(&self) -> f64 {
        self[Phase::last()].time_end
    }

    pub fn distance_end(&self) -> f64 {
        self[Phase::last()].distance_end
    }

    pub fn iter(&self) -> impl Iterator<Item = (Phase, &PhaseAnchor)> {
        Phase::ALL.into_iter().zip(self.anchors.iter())
    }
}

impl Index<Phase> for PhaseTable {
    type Output = PhaseAnchor;

    fn index(&self, phase: Phase) -> &PhaseAnchor {
        &self.anchors[phase.index()]
    }
}

impl IndexMut<Phase> for PhaseTable {
    fn index_mut(&mut self, phase: Phase) -> &mut PhaseAnchor {
        &mut self.anchors[phase.index()]
    }
}
