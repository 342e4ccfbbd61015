pub mod color;
pub mod geometry;
pub mod phase;
pub mod screen;
pub mod stimulus;
pub mod trial;

pub use color::{ParseColorError, StroopColor};
pub use geometry::{Button, ButtonLabel, Rect, hit_test};
pub use phase::{Phase, TestPhase};
pub use screen::{Action, DisplayMode, Language, Screen};
pub use stimulus::{Position, Stimulus, StimulusType};
pub use trial::{Feedback, FeedbackKind, TrialRecord};
