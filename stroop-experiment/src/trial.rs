use stroop_core::{Stimulus, TestPhase};

/// The trial currently on screen. Replaced wholesale on reset.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialState {
    pub phase: TestPhase,
    /// Answers still expected in this phase, including the current trial
    pub trials_remaining: usize,
    pub stimulus: Option<Stimulus>,
    pub start_ns: u64,
    /// Running trial id across all phases
    pub trial_id: usize,
}

impl TrialState {
    pub fn new(trial_count: usize) -> Self {
        Self {
            phase: TestPhase::default(),
            trials_remaining: trial_count,
            stimulus: None,
            start_ns: 0,
            trial_id: 0,
        }
    }
}
