use crate::color::StroopColor;
use crate::phase::TestPhase;
use serde::{Deserialize, Serialize};

/// Recorded result per answered trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub trial_id: usize,
    pub phase: TestPhase,
    pub stimulus: String,
    pub submitted: StroopColor,
    pub correct_color: StroopColor,
    pub correct: bool,
    /// Only present for correct answers
    pub reaction_time_ns: Option<u64>,
    pub timestamp_ns: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub at_ns: u64,
}

impl Feedback {
    pub fn is_visible(&self, now_ns: u64, duration_ms: u64) -> bool {
        now_ns.saturating_sub(self.at_ns) < duration_ms * 1_000_000
    }
}
