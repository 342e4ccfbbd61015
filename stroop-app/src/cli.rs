use clap::Parser;
use std::path::PathBuf;
use stroop_experiment::Settings;

/// Stroop color-word reaction time test
#[derive(Parser, Debug)]
#[command(name = "stroop", version)]
pub struct Args {
    /// Settings file, created on first change
    #[arg(long, default_value = "stroop.json")]
    pub config: PathBuf,

    /// JSON file replacing the built-in translations
    #[arg(long)]
    pub translations: Option<PathBuf>,

    /// Trials per phase for this run
    #[arg(long)]
    pub trials: Option<usize>,

    /// Tracing filter, e.g. `debug` or `stroop_experiment=trace`
    #[arg(long)]
    pub log: Option<String>,
}

impl Args {
    /// Settings from the config file with command line overrides applied
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::load_or_default(&self.config);
        if let Some(trials) = self.trials {
            settings.trial_count = trials;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["stroop"]).expect("parse");
        assert_eq!(args.config, PathBuf::from("stroop.json"));
        assert!(args.translations.is_none());
        assert!(args.trials.is_none());
    }

    #[test]
    fn trials_override_settings_file() {
        let dir = std::env::temp_dir().join(format!("stroop_cli_{}", std::process::id()));
        let config = dir.join("missing.json");
        let args = Args::try_parse_from([
            "stroop",
            "--config",
            config.to_str().expect("utf-8 path"),
            "--trials",
            "3",
            "--log",
            "debug",
        ])
        .expect("parse");
        assert_eq!(args.log.as_deref(), Some("debug"));

        let settings = args.settings();
        assert_eq!(settings.trial_count, 3);
        assert_eq!(settings.screen_width, Settings::default().screen_width);
    }

    #[test]
    fn rejects_non_numeric_trials() {
        assert!(Args::try_parse_from(["stroop", "--trials", "many"]).is_err());
    }
}
