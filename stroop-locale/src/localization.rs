use crate::key::TextKey;
use crate::tables;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use stroop_core::{ButtonLabel, Language, StroopColor};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("failed to read translations from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed translations: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("translations for {language} are missing: {}", .missing.join(", "))]
    Incomplete {
        language: &'static str,
        missing: Vec<String>,
    },
}

/// Flat text table plus the color-name sub-table of one language
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageTable {
    pub texts: HashMap<TextKey, String>,
    pub colors: HashMap<StroopColor, String>,
}

impl LanguageTable {
    pub fn builtin(language: Language) -> Self {
        Self {
            texts: tables::texts(language)
                .iter()
                .map(|(k, v)| (*k, v.to_string()))
                .collect(),
            colors: tables::colors(language)
                .iter()
                .map(|(c, v)| (*c, v.to_string()))
                .collect(),
        }
    }

    /// Keys absent from the table, colors reported as `colors.<name>`
    pub fn missing_keys(&self) -> Vec<String> {
        let texts = TextKey::ALL
            .iter()
            .filter(|k| !self.texts.contains_key(k))
            .map(|k| k.as_str().to_string());
        let colors = StroopColor::ALL
            .iter()
            .filter(|c| !self.colors.contains_key(c))
            .map(|c| format!("colors.{}", c.key()));
        texts.chain(colors).collect()
    }
}

#[derive(Debug, Deserialize)]
struct RawTable {
    #[serde(default)]
    colors: HashMap<String, String>,
    #[serde(flatten)]
    texts: HashMap<String, String>,
}

impl RawTable {
    fn into_table(self, language: Language) -> LanguageTable {
        let mut table = LanguageTable::default();
        for (name, text) in self.texts {
            match TextKey::from_name(&name) {
                Some(key) => {
                    table.texts.insert(key, text);
                }
                None => warn!(language = language.tag(), key = %name, "ignoring unknown translation key"),
            }
        }
        for (name, text) in self.colors {
            match name.parse::<StroopColor>() {
                Ok(color) => {
                    table.colors.insert(color, text);
                }
                Err(e) => warn!(language = language.tag(), "ignoring color translation: {e}"),
            }
        }
        table
    }
}

#[derive(Debug, Clone)]
pub struct Localization {
    language: Language,
    tables: HashMap<Language, LanguageTable>,
}

impl Localization {
    pub fn builtin(language: Language) -> Self {
        let tables = Language::ALL
            .iter()
            .map(|l| (*l, LanguageTable::builtin(*l)))
            .collect();
        Self { language, tables }
    }

    /// Uses the given tables as they are, without checking completeness
    pub fn new(tables: HashMap<Language, LanguageTable>, language: Language) -> Self {
        Self { language, tables }
    }

    /// Built-in tables overridden by the languages present in `json`. Every
    /// overriding language must define every key.
    pub fn from_json(json: &str, language: Language) -> Result<Self, LocaleError> {
        let raw: HashMap<Language, RawTable> = serde_json::from_str(json)?;
        let mut localization = Self::builtin(language);
        for (lang, raw_table) in raw {
            let table = raw_table.into_table(lang);
            let missing = table.missing_keys();
            if !missing.is_empty() {
                return Err(LocaleError::Incomplete {
                    language: lang.tag(),
                    missing,
                });
            }
            localization.tables.insert(lang, table);
        }
        Ok(localization)
    }

    pub fn load(path: &Path, language: Language) -> Result<Self, LocaleError> {
        let raw = fs::read_to_string(path).map_err(|source| LocaleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw, language)
    }

    /// Never fails: a broken override file is logged and the built-in tables are used
    pub fn load_or_builtin(path: Option<&Path>, language: Language) -> Self {
        let Some(path) = path else {
            return Self::builtin(language);
        };
        match Self::load(path, language) {
            Ok(localization) => {
                info!(path = %path.display(), "loaded translations");
                localization
            }
            Err(e) => {
                warn!("{e}; using built-in translations");
                Self::builtin(language)
            }
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switches language when a table for it exists
    pub fn set_language(&mut self, language: Language) -> bool {
        if self.tables.contains_key(&language) {
            self.language = language;
            true
        } else {
            warn!(language = language.tag(), "no translations for language");
            false
        }
    }

    pub fn get_text(&self, key: TextKey) -> &str {
        match self
            .tables
            .get(&self.language)
            .and_then(|t| t.texts.get(&key))
        {
            Some(text) => text,
            None => {
                warn!(language = self.language.tag(), key = key.as_str(), "missing translation");
                key.as_str()
            }
        }
    }

    pub fn get_color_name(&self, color: StroopColor) -> &str {
        match self
            .tables
            .get(&self.language)
            .and_then(|t| t.colors.get(&color))
        {
            Some(name) => name,
            None => {
                warn!(language = self.language.tag(), color = color.key(), "missing color name");
                color.key()
            }
        }
    }

    pub fn label(&self, label: &ButtonLabel) -> String {
        let key = match label {
            ButtonLabel::Play => TextKey::Play,
            ButtonLabel::Settings => TextKey::Settings,
            ButtonLabel::Exit => TextKey::Exit,
            ButtonLabel::Language => TextKey::Language,
            ButtonLabel::Resolution => TextKey::Resolution,
            ButtonLabel::DisplayMode => TextKey::DisplayMode,
            ButtonLabel::Back => TextKey::Back,
            ButtonLabel::Restart => TextKey::Restart,
            ButtonLabel::Menu => TextKey::Menu,
            ButtonLabel::LanguageName(l) => TextKey::for_language(*l),
            ButtonLabel::Mode(m) => TextKey::for_display_mode(*m),
            ButtonLabel::Color(c) => return self.get_color_name(*c).to_string(),
            ButtonLabel::Raw(text) => return text.clone(),
        };
        self.get_text(key).to_string()
    }

    /// Fills the template's placeholder with `value` to two decimals
    pub fn format_stat(&self, key: TextKey, value: f64) -> String {
        fill_placeholder(self.get_text(key), &format!("{value:.2}"))
    }
}

fn fill_placeholder(template: &str, value: &str) -> String {
    let Some(open) = template.find('{') else {
        return template.to_string();
    };
    let Some(close) = template[open..].find('}') else {
        return template.to_string();
    };
    let mut out = String::with_capacity(template.len() + value.len());
    out.push_str(&template[..open]);
    out.push_str(value);
    out.push_str(&template[open + close + 1..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_are_complete() {
        for language in Language::ALL {
            assert!(
                LanguageTable::builtin(language).missing_keys().is_empty(),
                "{language:?}"
            );
        }
    }

    #[test]
    fn lookups_follow_language() {
        let mut loc = Localization::builtin(Language::English);
        assert_eq!(loc.get_text(TextKey::Play), "Play");
        assert_eq!(loc.get_color_name(StroopColor::Blue), "Blue");

        assert!(loc.set_language(Language::Ukrainian));
        assert_eq!(loc.get_text(TextKey::Play), "Грати");
        assert_eq!(loc.get_color_name(StroopColor::Blue), "Синій");
    }

    #[test]
    fn missing_entries_fall_back_to_key() {
        let mut tables = HashMap::new();
        tables.insert(Language::English, LanguageTable::default());
        let mut loc = Localization::new(tables, Language::English);

        assert_eq!(loc.get_text(TextKey::DisplayMode), "display_mode");
        assert_eq!(loc.get_color_name(StroopColor::Purple), "purple");
        assert!(!loc.set_language(Language::Russian));
        assert_eq!(loc.language(), Language::English);
    }

    #[test]
    fn stats_are_rounded_into_template() {
        let loc = Localization::builtin(Language::English);
        assert_eq!(
            loc.format_stat(TextKey::AvgTime, 0.8149),
            "Average time: 0.81 sec"
        );
        assert_eq!(loc.format_stat(TextKey::Accuracy, 50.0), "Accuracy: 50.00%");
        assert_eq!(fill_placeholder("no slot", "1.00"), "no slot");
    }

    #[test]
    fn labels_resolve_through_tables() {
        let loc = Localization::builtin(Language::Russian);
        assert_eq!(loc.label(&ButtonLabel::Back), "Назад");
        assert_eq!(loc.label(&ButtonLabel::Color(StroopColor::Red)), "Красный");
        assert_eq!(loc.label(&ButtonLabel::Raw("800x600".into())), "800x600");
    }

    fn full_english_json(play: &str) -> String {
        let mut texts: serde_json::Map<String, serde_json::Value> = TextKey::ALL
            .iter()
            .map(|k| (k.as_str().to_string(), k.as_str().into()))
            .collect();
        texts.insert("play".into(), play.into());
        let colors: serde_json::Map<String, serde_json::Value> = StroopColor::ALL
            .iter()
            .map(|c| (c.key().to_string(), c.key().to_uppercase().into()))
            .collect();
        texts.insert("colors".into(), colors.into());
        serde_json::json!({ "english": texts }).to_string()
    }

    #[test]
    fn complete_override_replaces_language() {
        let loc = Localization::from_json(&full_english_json("Go"), Language::English)
            .expect("valid override");
        assert_eq!(loc.get_text(TextKey::Play), "Go");
        assert_eq!(loc.get_color_name(StroopColor::Green), "GREEN");
    }

    #[test]
    fn undisplayed_start_key_is_ignored() {
        assert_eq!(TextKey::from_name("start"), None);
        let json = full_english_json("Go").replace(
            "\"play\":",
            "\"start\":\"Press any key to start\",\"play\":",
        );
        let loc = Localization::from_json(&json, Language::English).expect("valid override");
        assert_eq!(loc.get_text(TextKey::Play), "Go");
    }

    #[test]
    fn incomplete_override_is_rejected() {
        let json = r#"{ "russian": { "play": "Играть", "colors": { "red": "Красный" } } }"#;
        match Localization::from_json(json, Language::Russian) {
            Err(LocaleError::Incomplete { language, missing }) => {
                assert_eq!(language, "russian");
                assert!(missing.contains(&"avg_time".to_string()));
                assert!(missing.contains(&"colors.black".to_string()));
                assert!(!missing.contains(&"play".to_string()));
            }
            other => panic!("expected incomplete error, got {other:?}"),
        }
    }

    #[test]
    fn unreadable_override_falls_back() {
        let path = std::env::temp_dir().join("stroop_locale_missing_dir/none.json");
        let loc = Localization::load_or_builtin(Some(&path), Language::English);
        assert_eq!(loc.get_text(TextKey::Exit), "Exit");
    }
}
