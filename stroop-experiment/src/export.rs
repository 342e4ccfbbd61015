use crate::report::ResultSummary;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use stroop_core::TrialRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write results to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything saved at the end of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsExport {
    pub trials_per_phase: usize,
    pub summary: ResultSummary,
    pub trials: Vec<TrialRecord>,
}

impl ResultsExport {
    pub fn write(&self, path: &Path) -> Result<(), ExportError> {
        let io_err = |source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let file = fs::File::create(path).map_err(io_err)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};
    use stroop_core::{StroopColor, TestPhase};

    #[test]
    fn written_file_reads_back() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("stroop_export_{suffix}"));
        let path = dir.join("results.json");

        let export = ResultsExport {
            trials_per_phase: 1,
            summary: ResultSummary {
                avg_time: 0.4,
                coefficient: 2.5,
                accuracy: 100.0,
                score: 10,
                correct: 1,
                incorrect: 0,
                total_time: 0.4,
            },
            trials: vec![TrialRecord {
                trial_id: 0,
                phase: TestPhase::WordMeaning,
                stimulus: "word red in blue".into(),
                submitted: StroopColor::Red,
                correct_color: StroopColor::Red,
                correct: true,
                reaction_time_ns: Some(400_000_000),
                timestamp_ns: 400_000_000,
            }],
        };
        export.write(&path).expect("write results");

        let raw = fs::read_to_string(&path).expect("read results");
        assert!(raw.contains("\"word_meaning\""));
        let back: ResultsExport = serde_json::from_str(&raw).expect("parse results");
        assert_eq!(back, export);

        fs::remove_dir_all(dir).expect("cleanup");
    }
}
