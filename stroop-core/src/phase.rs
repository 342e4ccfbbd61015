use serde::{Deserialize, Serialize};

/// Defines experiment phases and behavior
pub trait Phase: Copy + Clone + PartialEq + Send + Sync + std::fmt::Debug + Default {
    fn allows_input(&self) -> bool;
    fn next(&self) -> Option<Self>;

    fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

/// The three stimulus stages of a run followed by the terminal results state
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestPhase {
    /// Incongruent word at screen center, answer is the word's meaning
    #[default]
    WordMeaning,
    /// Colored square at a random position, answer is its color
    ColorSquare,
    /// Incongruent word at a random position, answer is the ink color
    InkColor,
    Results,
}

impl TestPhase {
    /// 1-based phase number; `None` once results are reached
    pub fn number(&self) -> Option<u8> {
        match self {
            TestPhase::WordMeaning => Some(1),
            TestPhase::ColorSquare => Some(2),
            TestPhase::InkColor => Some(3),
            TestPhase::Results => None,
        }
    }

    pub fn randomizes_position(&self) -> bool {
        matches!(self, TestPhase::ColorSquare | TestPhase::InkColor)
    }
}

impl Phase for TestPhase {
    fn allows_input(&self) -> bool {
        !matches!(self, TestPhase::Results)
    }

    fn next(&self) -> Option<Self> {
        use TestPhase::*;
        Some(match self {
            WordMeaning => ColorSquare,
            ColorSquare => InkColor,
            InkColor => Results,
            Results => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_advance_to_results() {
        let mut phase = TestPhase::default();
        let mut seen = vec![phase];
        while let Some(next) = phase.next() {
            phase = next;
            seen.push(phase);
        }
        assert_eq!(
            seen,
            vec![
                TestPhase::WordMeaning,
                TestPhase::ColorSquare,
                TestPhase::InkColor,
                TestPhase::Results
            ]
        );
        assert!(phase.is_terminal());
        assert!(!phase.allows_input());
    }

    #[test]
    fn numbering_matches_stage() {
        assert_eq!(TestPhase::WordMeaning.number(), Some(1));
        assert_eq!(TestPhase::InkColor.number(), Some(3));
        assert_eq!(TestPhase::Results.number(), None);
    }

    #[test]
    fn only_word_meaning_stays_centered() {
        assert!(!TestPhase::WordMeaning.randomizes_position());
        assert!(TestPhase::ColorSquare.randomizes_position());
        assert!(TestPhase::InkColor.randomizes_position());
    }
}
