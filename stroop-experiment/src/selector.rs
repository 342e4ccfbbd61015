use rand::Rng;
use rand::seq::SliceRandom;
use stroop_core::{Position, Stimulus, StimulusType, StroopColor, TestPhase};

/// Picks per-trial stimuli according to the phase rules
pub struct StimulusSelector;

impl StimulusSelector {
    /// `None` once the run has reached results
    pub fn select<R: Rng>(phase: TestPhase, rng: &mut R) -> Option<Stimulus> {
        let (kind, correct_color) = match phase {
            TestPhase::WordMeaning => {
                let meaning = Self::color(rng);
                let ink = Self::color(rng);
                (StimulusType::Word { meaning, ink }, meaning)
            }
            TestPhase::ColorSquare => {
                let color = Self::color(rng);
                (StimulusType::Square { color }, color)
            }
            TestPhase::InkColor => {
                let meaning = Self::color(rng);
                let ink = Self::color(rng);
                (StimulusType::Word { meaning, ink }, ink)
            }
            TestPhase::Results => return None,
        };
        let position = if phase.randomizes_position() {
            Self::position(rng)
        } else {
            Position::CENTER
        };
        Some(Stimulus {
            kind,
            correct_color,
            position,
        })
    }

    pub fn color<R: Rng>(rng: &mut R) -> StroopColor {
        StroopColor::ALL[rng.random_range(0..StroopColor::ALL.len())]
    }

    /// Uniform over the central 30%..70% band on both axes
    pub fn position<R: Rng>(rng: &mut R) -> Position {
        Position {
            x: 0.3 + rng.random::<f32>() * 0.4,
            y: 0.3 + rng.random::<f32>() * 0.4,
        }
    }

    pub fn shuffled_colors<R: Rng>(rng: &mut R) -> [StroopColor; 6] {
        let mut order = StroopColor::ALL;
        order.shuffle(rng);
        order
    }
}
