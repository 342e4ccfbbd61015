use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The fixed palette every stimulus and answer button is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StroopColor {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Black,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color name: {0}")]
pub struct ParseColorError(pub String);

impl StroopColor {
    pub const ALL: [StroopColor; 6] = [
        StroopColor::Red,
        StroopColor::Green,
        StroopColor::Blue,
        StroopColor::Yellow,
        StroopColor::Purple,
        StroopColor::Black,
    ];

    /// Lookup token used by translation tables and saved results
    pub fn key(&self) -> &'static str {
        match self {
            StroopColor::Red => "red",
            StroopColor::Green => "green",
            StroopColor::Blue => "blue",
            StroopColor::Yellow => "yellow",
            StroopColor::Purple => "purple",
            StroopColor::Black => "black",
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        match self {
            StroopColor::Red => [255, 0, 0],
            StroopColor::Green => [0, 255, 0],
            StroopColor::Blue => [0, 0, 255],
            StroopColor::Yellow => [255, 255, 0],
            StroopColor::Purple => [128, 0, 128],
            StroopColor::Black => [0, 0, 0],
        }
    }
}

impl fmt::Display for StroopColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StroopColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StroopColor::ALL
            .iter()
            .copied()
            .find(|c| c.key() == s)
            .ok_or_else(|| ParseColorError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_parse_back() {
        for color in StroopColor::ALL {
            assert_eq!(color.key().parse::<StroopColor>(), Ok(color));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "orange".parse::<StroopColor>(),
            Err(ParseColorError("orange".into()))
        );
    }

    #[test]
    fn purple_is_half_intensity() {
        assert_eq!(StroopColor::Purple.rgb(), [128, 0, 128]);
    }
}
