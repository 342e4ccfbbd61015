use std::fmt;
use stroop_core::{DisplayMode, Language};

/// Every translatable string the application shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextKey {
    AvgTime,
    Coefficient,
    Accuracy,
    Correct,
    Incorrect,
    Restart,
    Menu,
    Play,
    Settings,
    Exit,
    Language,
    Resolution,
    DisplayMode,
    Back,
    Russian,
    Ukrainian,
    English,
    Fullscreen,
    Noframe,
    Windowed,
}

impl TextKey {
    pub const ALL: [TextKey; 20] = [
        TextKey::AvgTime,
        TextKey::Coefficient,
        TextKey::Accuracy,
        TextKey::Correct,
        TextKey::Incorrect,
        TextKey::Restart,
        TextKey::Menu,
        TextKey::Play,
        TextKey::Settings,
        TextKey::Exit,
        TextKey::Language,
        TextKey::Resolution,
        TextKey::DisplayMode,
        TextKey::Back,
        TextKey::Russian,
        TextKey::Ukrainian,
        TextKey::English,
        TextKey::Fullscreen,
        TextKey::Noframe,
        TextKey::Windowed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextKey::AvgTime => "avg_time",
            TextKey::Coefficient => "coefficient",
            TextKey::Accuracy => "accuracy",
            TextKey::Correct => "correct",
            TextKey::Incorrect => "incorrect",
            TextKey::Restart => "restart",
            TextKey::Menu => "menu",
            TextKey::Play => "play",
            TextKey::Settings => "settings",
            TextKey::Exit => "exit",
            TextKey::Language => "language",
            TextKey::Resolution => "resolution",
            TextKey::DisplayMode => "display_mode",
            TextKey::Back => "back",
            TextKey::Russian => "russian",
            TextKey::Ukrainian => "ukrainian",
            TextKey::English => "english",
            TextKey::Fullscreen => "fullscreen",
            TextKey::Noframe => "noframe",
            TextKey::Windowed => "windowed",
        }
    }

    pub fn from_name(name: &str) -> Option<TextKey> {
        TextKey::ALL.iter().copied().find(|k| k.as_str() == name)
    }

    pub fn for_language(language: Language) -> TextKey {
        match language {
            Language::English => TextKey::English,
            Language::Russian => TextKey::Russian,
            Language::Ukrainian => TextKey::Ukrainian,
        }
    }

    pub fn for_display_mode(mode: DisplayMode) -> TextKey {
        match mode {
            DisplayMode::Fullscreen => TextKey::Fullscreen,
            DisplayMode::Noframe => TextKey::Noframe,
            DisplayMode::Windowed => TextKey::Windowed,
        }
    }
}

impl fmt::Display for TextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
