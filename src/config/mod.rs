#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::CaseNormalization;
use crate::utils::error::{Result, TranslateError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 10001;
pub const DEFAULT_BLOCK_SIZE: usize = 5120;

/// Everything needed to translate one dataset.
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    pub dataset_path: PathBuf,
    pub output_path: PathBuf,
    pub decoder_path: PathBuf,
    pub source_lang: String,
    pub target_lang: String,
    pub sourcebpe: Option<PathBuf>,
    pub targetbpe: Option<PathBuf>,
    pub sourcespm: Option<PathBuf>,
    pub targetspm: Option<PathBuf>,
    pub port: u16,
    /// Byte-size hint for one read batch.
    pub block_size: usize,
    pub case: CaseNormalization,
    pub monitor: bool,
    pub progress: bool,
    pub summary_path: Option<PathBuf>,
    pub server: ServerConfig,
}

/// Launch options for `marian-server`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub binary: String,
    pub host: String,
    pub allow_unk: bool,
    pub beam_size: usize,
    pub mini_batch: usize,
    pub normalize: f64,
    pub maxi_batch_sort: String,
    pub maxi_batch: usize,
    pub extra_args: Vec<String>,
    /// Directory receiving marian-server.out and marian-server.err.
    pub log_dir: PathBuf,
    pub startup_timeout_seconds: u64,
    pub poll_interval_ms: u64,
    pub shutdown_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            binary: "marian-server".to_string(),
            host: "localhost".to_string(),
            allow_unk: true,
            beam_size: 6,
            mini_batch: 64,
            normalize: 0.6,
            maxi_batch_sort: "src".to_string(),
            maxi_batch: 100,
            extra_args: Vec::new(),
            log_dir: PathBuf::from("."),
            startup_timeout_seconds: 60,
            poll_interval_ms: 250,
            shutdown_timeout_ms: 1000,
        }
    }
}

impl ServerConfig {
    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_seconds)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("server.binary", &self.binary)?;
        validation::validate_non_empty_string("server.host", &self.host)?;
        validation::validate_positive_number("server.beam_size", self.beam_size, 1)?;
        validation::validate_positive_number("server.mini_batch", self.mini_batch, 1)?;
        validation::validate_positive_number("server.maxi_batch", self.maxi_batch, 1)?;
        validation::validate_range("server.normalize", self.normalize, 0.0, 10.0)?;
        validation::validate_path("server.log_dir", &self.log_dir)?;

        let valid_sorts = ["src", "trg", "none"];
        if !valid_sorts.contains(&self.maxi_batch_sort.as_str()) {
            return Err(TranslateError::InvalidConfigValueError {
                field: "server.maxi_batch_sort".to_string(),
                value: self.maxi_batch_sort.clone(),
                reason: format!("Valid values: {}", valid_sorts.join(", ")),
            });
        }

        validation::validate_positive_number(
            "server.startup_timeout_seconds",
            self.startup_timeout_seconds as usize,
            1,
        )?;
        validation::validate_positive_number("server.poll_interval_ms", self.poll_interval_ms as usize, 1)?;
        validation::validate_positive_number(
            "server.shutdown_timeout_ms",
            self.shutdown_timeout_ms as usize,
            1,
        )?;
        Ok(())
    }
}

impl TranslateConfig {
    /// Model files configured for the content processor.
    pub fn subword_models(&self) -> Vec<(&'static str, &PathBuf)> {
        [
            ("sourcebpe", self.sourcebpe.as_ref()),
            ("targetbpe", self.targetbpe.as_ref()),
            ("sourcespm", self.sourcespm.as_ref()),
            ("targetspm", self.targetspm.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, path)| path.map(|p| (name, p)))
        .collect()
    }
}

impl Validate for TranslateConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_existing_file("dataset_path", &self.dataset_path)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_existing_file("decoder_path", &self.decoder_path)?;
        validation::validate_non_empty_string("source_lang", &self.source_lang)?;
        validation::validate_non_empty_string("target_lang", &self.target_lang)?;

        for (field, path) in self.subword_models() {
            validation::validate_existing_file(field, path)?;
        }

        validation::validate_positive_number("block_size", self.block_size, 1)?;
        validation::validate_positive_number("port", self.port as usize, 1)?;

        if self.output_path == self.dataset_path {
            return Err(TranslateError::InvalidConfigValueError {
                field: "output_path".to_string(),
                value: self.output_path.display().to_string(),
                reason: "Output would overwrite the dataset".to_string(),
            });
        }

        if let Some(summary) = &self.summary_path {
            validation::validate_path("summary_path", summary)?;
        }

        self.server.validate_config()
    }
}
