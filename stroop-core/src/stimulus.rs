use crate::color::StroopColor;
use serde::{Deserialize, Serialize};

/// Location as fractions of the surface; (0.5, 0.5) is the center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const CENTER: Position = Position { x: 0.5, y: 0.5 };

    pub fn to_screen(&self, width: u32, height: u32) -> (f32, f32) {
        (self.x * width as f32, self.y * height as f32)
    }
}

/// What gets drawn for a trial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StimulusType {
    /// A color name drawn in an ink that may disagree with it
    Word {
        meaning: StroopColor,
        ink: StroopColor,
    },
    Square {
        color: StroopColor,
    },
}

impl StimulusType {
    /// Color the stimulus is rendered in
    pub fn displayed_color(&self) -> StroopColor {
        match self {
            StimulusType::Word { ink, .. } => *ink,
            StimulusType::Square { color } => *color,
        }
    }

    pub fn word(&self) -> Option<StroopColor> {
        match self {
            StimulusType::Word { meaning, .. } => Some(*meaning),
            StimulusType::Square { .. } => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, StimulusType::Word { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stimulus {
    pub kind: StimulusType,
    pub correct_color: StroopColor,
    pub position: Position,
}

impl Stimulus {
    pub fn describe(&self) -> String {
        match self.kind {
            StimulusType::Word { meaning, ink } => format!("word {meaning} in {ink}"),
            StimulusType::Square { color } => format!("{color} square"),
        }
    }
}
