pub mod key;
pub mod localization;
pub mod tables;

pub use key::TextKey;
pub use localization::{LanguageTable, LocaleError, Localization};
