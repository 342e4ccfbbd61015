use crate::score::{ResponseLog, ScoreState};
use serde::{Deserialize, Serialize};

/// Aggregate statistics shown on the results screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    /// Mean correct reaction time in seconds
    pub avg_time: f64,
    /// 1 / avg_time
    pub coefficient: f64,
    /// Percent of answers that were correct
    pub accuracy: f64,
    pub score: i64,
    pub correct: usize,
    pub incorrect: usize,
    pub total_time: f64,
}

impl ResultSummary {
    pub fn from_log(log: &ResponseLog, score: &ScoreState) -> Self {
        let avg_time = if log.reaction_times.is_empty() {
            0.0
        } else {
            log.reaction_times.iter().sum::<f64>() / log.reaction_times.len() as f64
        };
        let coefficient = if avg_time > 0.0 { 1.0 / avg_time } else { 0.0 };
        let answered = log.answered();
        let accuracy = if answered > 0 {
            log.correct as f64 / answered as f64 * 100.0
        } else {
            0.0
        };
        Self {
            avg_time,
            coefficient,
            accuracy,
            score: score.score,
            correct: log.correct,
            incorrect: log.incorrect,
            total_time: score.total_time,
        }
    }
}
