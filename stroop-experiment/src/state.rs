use super::config::ExperimentConfig;
use super::report::ResultSummary;
use super::score::{ResponseLog, ScoreAggregator, ScoreState};
use super::selector::StimulusSelector;
use super::trial::TrialState;
use rand::Rng;
use stroop_core::{Feedback, FeedbackKind, Phase, Stimulus, StroopColor, TestPhase, TrialRecord};
use stroop_timing::Timer;
use tracing::{debug, info};

/// Sequences the three phases, scores answers and reports the outcome
pub struct TrialController<T, R>
where
    T: Timer,
    R: Rng,
{
    pub timer: T,
    pub rng: R,
    pub config: ExperimentConfig,
    trial: TrialState,
    scores: ScoreAggregator,
    records: Vec<TrialRecord>,
    feedback: Option<Feedback>,
    color_order: [StroopColor; 6],
}

impl<T, R> TrialController<T, R>
where
    T: Timer,
    R: Rng,
{
    /// Creates the controller with the first trial already running
    pub fn new(config: ExperimentConfig, timer: T, rng: R) -> Self {
        let mut controller = Self {
            trial: TrialState::new(config.trial_count),
            timer,
            rng,
            config,
            scores: ScoreAggregator::default(),
            records: Vec::new(),
            feedback: None,
            color_order: StroopColor::ALL,
        };
        controller.reset();
        controller
    }

    /// Throws away the current run and starts over at phase 1
    pub fn reset(&mut self) {
        self.trial = TrialState::new(self.config.trial_count);
        self.scores.clear();
        self.records.clear();
        self.feedback = None;
        info!(trials_per_phase = self.config.trial_count, "run reset");
        self.start_trial();
    }

    pub fn set_trial_count(&mut self, trial_count: usize) {
        self.config.trial_count = trial_count;
    }

    fn advance_phase(&mut self) {
        if let Some(next) = self.trial.phase.next() {
            self.trial.phase = next;
            self.trial.trials_remaining = if next.is_terminal() {
                0
            } else {
                self.config.trial_count
            };
            info!(phase = ?next, "phase started");
        }
    }

    fn start_trial(&mut self) {
        while self.trial.trials_remaining == 0 && !self.trial.phase.is_terminal() {
            self.advance_phase();
        }

        self.trial.stimulus = StimulusSelector::select(self.trial.phase, &mut self.rng);
        let Some(stimulus) = self.trial.stimulus else {
            return;
        };

        self.trial.start_ns = self.timer.now();
        self.color_order = StimulusSelector::shuffled_colors(&mut self.rng);
        debug!(
            trial = self.trial.trial_id,
            phase = ?self.trial.phase,
            stimulus = %stimulus.describe(),
            "trial started at {} ns",
            self.trial.start_ns
        );
    }

    /// Scores a color guess for the current trial and moves on to the next.
    /// Returns `None` when no trial is running.
    pub fn submit(&mut self, color: StroopColor) -> Option<FeedbackKind> {
        if !self.trial.phase.allows_input() {
            debug!(
                color = color.key(),
                phase = ?self.trial.phase,
                "answer ignored, input closed"
            );
            return None;
        }
        let Some(stimulus) = self.trial.stimulus else {
            debug!(color = color.key(), "answer ignored, no trial running");
            return None;
        };

        let now_ns = self.timer.now();
        let correct = color == stimulus.correct_color;
        let reaction_ns = now_ns.saturating_sub(self.trial.start_ns);

        let kind = if correct {
            self.scores.record_correct(reaction_ns as f64 / 1e9);
            FeedbackKind::Correct
        } else {
            self.scores.record_incorrect();
            FeedbackKind::Incorrect
        };
        debug!(
            trial = self.trial.trial_id,
            submitted = color.key(),
            expected = stimulus.correct_color.key(),
            "answer {:?}, RT = {:.3} ms",
            kind,
            reaction_ns as f64 / 1_000_000.0
        );

        self.records.push(TrialRecord {
            trial_id: self.trial.trial_id,
            phase: self.trial.phase,
            stimulus: stimulus.describe(),
            submitted: color,
            correct_color: stimulus.correct_color,
            correct,
            reaction_time_ns: correct.then_some(reaction_ns),
            timestamp_ns: now_ns,
        });
        self.feedback = Some(Feedback { kind, at_ns: now_ns });

        self.trial.trial_id += 1;
        self.trial.trials_remaining = self.trial.trials_remaining.saturating_sub(1);
        if self.trial.trials_remaining == 0 {
            self.advance_phase();
        }
        self.start_trial();

        if self.is_complete() {
            let summary = self.summary();
            info!(
                score = summary.score,
                accuracy = summary.accuracy,
                "run complete, mean RT {:.3} s",
                summary.avg_time
            );
        }

        Some(kind)
    }

    pub fn phase(&self) -> TestPhase {
        self.trial.phase
    }

    pub fn trials_remaining(&self) -> usize {
        self.trial.trials_remaining
    }

    pub fn current_stimulus(&self) -> Option<&Stimulus> {
        self.trial.stimulus.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.trial.phase.is_terminal()
    }

    pub fn color_order(&self) -> [StroopColor; 6] {
        self.color_order
    }

    /// Feedback that is still inside its display window
    pub fn visible_feedback(&self) -> Option<FeedbackKind> {
        let now = self.timer.now();
        self.feedback
            .filter(|f| f.is_visible(now, self.config.feedback_ms))
            .map(|f| f.kind)
    }

    pub fn log(&self) -> &ResponseLog {
        &self.scores.log
    }

    pub fn score(&self) -> &ScoreState {
        &self.scores.score
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn summary(&self) -> ResultSummary {
        ResultSummary::from_log(&self.scores.log, &self.scores.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;
    use stroop_timing::ManualTimer;

    fn controller(trial_count: usize) -> (TrialController<ManualTimer, StdRng>, ManualTimer) {
        let timer = ManualTimer::new();
        let config = ExperimentConfig {
            trial_count,
            ..ExperimentConfig::default()
        };
        let ctrl = TrialController::new(config, timer.clone(), StdRng::seed_from_u64(42));
        (ctrl, timer)
    }

    fn right(ctrl: &TrialController<ManualTimer, StdRng>) -> StroopColor {
        ctrl.current_stimulus().expect("trial running").correct_color
    }

    fn wrong(ctrl: &TrialController<ManualTimer, StdRng>) -> StroopColor {
        let correct = right(ctrl);
        StroopColor::ALL
            .into_iter()
            .find(|c| *c != correct)
            .expect("another color")
    }

    #[test]
    fn counter_drops_per_answer_then_phase_advances() {
        let (mut ctrl, _) = controller(3);
        let mut seen = vec![(ctrl.phase(), ctrl.trials_remaining())];
        while !ctrl.is_complete() {
            let c = right(&ctrl);
            ctrl.submit(c);
            seen.push((ctrl.phase(), ctrl.trials_remaining()));
        }

        use TestPhase::*;
        assert_eq!(
            seen,
            vec![
                (WordMeaning, 3),
                (WordMeaning, 2),
                (WordMeaning, 1),
                (ColorSquare, 3),
                (ColorSquare, 2),
                (ColorSquare, 1),
                (InkColor, 3),
                (InkColor, 2),
                (InkColor, 1),
                (Results, 0),
            ]
        );
        assert_eq!(ctrl.log().answered(), 9);
    }

    #[test]
    fn results_after_three_phases_and_stays_terminal() {
        let (mut ctrl, _) = controller(2);
        for _ in 0..6 {
            assert!(!ctrl.is_complete());
            let c = wrong(&ctrl);
            assert_eq!(ctrl.submit(c), Some(FeedbackKind::Incorrect));
        }
        assert!(ctrl.is_complete());
        assert_eq!(ctrl.phase(), TestPhase::Results);
        assert_eq!(ctrl.current_stimulus(), None);
        assert_eq!(ctrl.trials_remaining(), 0);

        assert_eq!(ctrl.submit(StroopColor::Red), None);
        assert_eq!(ctrl.log().answered(), 6);
        assert_eq!(ctrl.phase(), TestPhase::Results);
    }

    #[test]
    fn two_hits_two_misses_example() {
        let (mut ctrl, _) = controller(2);
        for _ in 0..2 {
            let c = right(&ctrl);
            ctrl.submit(c);
        }
        assert_eq!(ctrl.phase(), TestPhase::ColorSquare);
        for _ in 0..2 {
            let c = wrong(&ctrl);
            ctrl.submit(c);
        }
        assert_eq!(ctrl.score().score, 10);
        assert_eq!(ctrl.summary().accuracy, 50.0);
    }

    #[test]
    fn reaction_time_measured_from_trial_start() {
        let (mut ctrl, timer) = controller(5);
        timer.advance(Duration::from_millis(750));
        let c = right(&ctrl);
        assert_eq!(ctrl.submit(c), Some(FeedbackKind::Correct));

        timer.advance(Duration::from_millis(250));
        let c = right(&ctrl);
        ctrl.submit(c);

        assert_eq!(ctrl.log().reaction_times, vec![0.75, 0.25]);
        assert_eq!(ctrl.records()[0].reaction_time_ns, Some(750_000_000));
        assert_eq!(ctrl.summary().avg_time, 0.5);
        assert_eq!(ctrl.summary().coefficient, 2.0);
    }

    #[test]
    fn misses_record_no_reaction_time() {
        let (mut ctrl, timer) = controller(5);
        timer.advance(Duration::from_millis(300));
        let c = wrong(&ctrl);
        ctrl.submit(c);
        assert!(ctrl.log().reaction_times.is_empty());
        assert_eq!(ctrl.records()[0].reaction_time_ns, None);
        assert!(!ctrl.records()[0].correct);
        let summary = ctrl.summary();
        assert_eq!(summary.avg_time, 0.0);
        assert_eq!(summary.coefficient, 0.0);
        assert_eq!(summary.accuracy, 0.0);
        assert_eq!(summary.score, -5);
    }

    #[test]
    fn fresh_reset_reports_zeros() {
        let (mut ctrl, _) = controller(2);
        let c = right(&ctrl);
        ctrl.submit(c);
        ctrl.reset();

        assert_eq!(ctrl.phase(), TestPhase::WordMeaning);
        assert_eq!(ctrl.trials_remaining(), 2);
        assert!(ctrl.records().is_empty());
        assert_eq!(ctrl.summary(), ResultSummary::default());
    }

    #[test]
    fn zero_trials_goes_straight_to_results() {
        let (ctrl, _) = controller(0);
        assert!(ctrl.is_complete());
        assert_eq!(ctrl.current_stimulus(), None);
        assert_eq!(ctrl.summary().accuracy, 0.0);
    }

    #[test]
    fn feedback_visible_for_window_only() {
        let (mut ctrl, timer) = controller(3);
        assert_eq!(ctrl.visible_feedback(), None);
        let c = wrong(&ctrl);
        ctrl.submit(c);
        assert_eq!(ctrl.visible_feedback(), Some(FeedbackKind::Incorrect));
        timer.advance(Duration::from_millis(500));
        assert_eq!(ctrl.visible_feedback(), None);
    }

    #[test]
    fn records_carry_phase_and_running_id() {
        let (mut ctrl, _) = controller(1);
        for _ in 0..3 {
            let c = right(&ctrl);
            ctrl.submit(c);
        }
        let phases: Vec<_> = ctrl.records().iter().map(|r| (r.trial_id, r.phase)).collect();
        assert_eq!(
            phases,
            vec![
                (0, TestPhase::WordMeaning),
                (1, TestPhase::ColorSquare),
                (2, TestPhase::InkColor)
            ]
        );
    }
}
