use crate::color::StroopColor;
use serde::{Deserialize, Serialize};

/// Every screen the application can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Menu,
    Settings,
    Language,
    Resolution,
    DisplayMode,
    Countdown,
    Game,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Russian,
    Ukrainian,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Russian, Language::Ukrainian, Language::English];

    pub fn tag(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Russian => "russian",
            Language::Ukrainian => "ukrainian",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Fullscreen,
    /// Borderless window covering the requested size
    Noframe,
    Windowed,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [
        DisplayMode::Fullscreen,
        DisplayMode::Noframe,
        DisplayMode::Windowed,
    ];
}

/// Everything a click or key press can ask the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Navigate(Screen),
    SubmitColor(StroopColor),
    ChangeResolution(u32, u32),
    ChangeLanguage(Language),
    ChangeDisplayMode(DisplayMode),
    Restart,
    Quit,
}
