pub mod config;
pub mod export;
pub mod layout;
pub mod report;
pub mod score;
pub mod selector;
pub mod session;
pub mod state;
pub mod trial;

pub use config::{ExperimentConfig, Settings, SettingsError};
pub use export::{ExportError, ResultsExport};
pub use layout::{RESOLUTIONS, available_resolutions, buttons_for};
pub use report::ResultSummary;
pub use score::{ResponseLog, ScoreAggregator, ScoreState};
pub use selector::StimulusSelector;
pub use session::{Effect, Session};
pub use state::TrialController;
pub use trial::TrialState;
