/// Reaction times of correct answers plus answer counts for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseLog {
    /// Seconds, correct answers only, in answer order
    pub reaction_times: Vec<f64>,
    pub correct: usize,
    pub incorrect: usize,
}

impl ResponseLog {
    pub fn answered(&self) -> usize {
        self.correct + self.incorrect
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreState {
    pub score: i64,
    /// Sum of correct reaction times in seconds
    pub total_time: f64,
}

/// Applies the +10 / -5 scoring rule and keeps the log in step with it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreAggregator {
    pub log: ResponseLog,
    pub score: ScoreState,
}

impl ScoreAggregator {
    pub const CORRECT_POINTS: i64 = 10;
    pub const INCORRECT_PENALTY: i64 = 5;

    pub fn record_correct(&mut self, reaction_secs: f64) {
        let reaction_secs = reaction_secs.max(0.0);
        self.log.reaction_times.push(reaction_secs);
        self.log.correct += 1;
        self.score.score += Self::CORRECT_POINTS;
        self.score.total_time += reaction_secs;
    }

    pub fn record_incorrect(&mut self) {
        self.log.incorrect += 1;
        self.score.score -= Self::INCORRECT_PENALTY;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
