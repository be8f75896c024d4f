use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Directory where `*.nac.yaml` documents are written.
    pub out_dir: PathBuf,
    /// Seed for the run; drawn from the OS when absent.
    pub seed: Option<u64>,
    /// Remove existing `*.yaml` files from `out_dir` before writing.
    pub clear_output: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("data"),
            seed: None,
            clear_output: true,
        }
    }
}

/// A written output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub file: String,
    pub kind: String,
    pub records: u64,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub seed: u64,
    pub out_dir: PathBuf,
    pub files: Vec<FileReport>,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(seed: u64, out_dir: PathBuf) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            seed,
            out_dir,
            files: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn record_file(&mut self, file: &str, kind: &str, records: usize) {
        self.files.push(FileReport {
            file: file.to_string(),
            kind: kind.to_string(),
            records: records as u64,
        });
    }

    pub fn records_total(&self) -> u64 {
        self.files.iter().map(|file| file.records).sum()
    }
}
