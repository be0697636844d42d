use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lines read from the dataset in one pass, terminators included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub lines: Vec<String>,
    pub byte_len: usize,
}

impl Batch {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaseNormalization {
    #[default]
    None,
    /// Lowercase every character.
    All,
    /// Keep the first character of each word, lowercase the rest.
    Capitals,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationSummary {
    pub lines_translated: usize,
    pub blank_lines: usize,
    pub batches: usize,
    pub bytes_read: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl TranslationSummary {
    pub fn lines_per_second(&self) -> f64 {
        if self.elapsed_ms == 0 {
            return 0.0;
        }
        self.lines_translated as f64 / (self.elapsed_ms as f64 / 1000.0)
    }
}
