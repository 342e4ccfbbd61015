use crate::color::StroopColor;
use crate::screen::{Action, DisplayMode, Language};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open on the right and bottom edges
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

/// Label of a button before localization
#[derive(Debug, Clone, PartialEq)]
pub enum ButtonLabel {
    Play,
    Settings,
    Exit,
    Language,
    Resolution,
    DisplayMode,
    Back,
    Restart,
    Menu,
    LanguageName(Language),
    Mode(DisplayMode),
    Color(StroopColor),
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: ButtonLabel,
    pub rect: Rect,
    pub action: Action,
    pub fill: [u8; 3],
}

impl Button {
    pub const DEFAULT_FILL: [u8; 3] = [200, 200, 200];
    pub const HOVER_FILL: [u8; 3] = [150, 150, 150];

    pub fn fill_at(&self, hover: Option<(f32, f32)>) -> [u8; 3] {
        match hover {
            Some((x, y)) if self.rect.contains(x, y) => Self::HOVER_FILL,
            _ => self.fill,
        }
    }

    /// White text on dark fills, black otherwise
    pub fn text_color(&self) -> [u8; 3] {
        let brightness = self.fill.iter().map(|c| *c as u32).sum::<u32>() / 3;
        if brightness < 128 { [255, 255, 255] } else { [0, 0, 0] }
    }
}

/// First button under the point wins
pub fn hit_test(buttons: &[Button], x: f32, y: f32) -> Option<Action> {
    buttons
        .iter()
        .find(|b| b.rect.contains(x, y))
        .map(|b| b.action)
}
