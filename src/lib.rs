pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{MarianClient, MarianServer, PassthroughProcessor};
pub use app::{translate_dataset, translate_file};
pub use config::{ServerConfig, TranslateConfig};
pub use crate::core::engine::TranslationEngine;
pub use domain::model::{CaseNormalization, TranslationSummary};
pub use utils::error::{Result, TranslateError};
