use crate::config::toml_config::TomlConfig;
use crate::config::{ServerConfig, TranslateConfig, DEFAULT_BLOCK_SIZE, DEFAULT_PORT};
use crate::domain::model::CaseNormalization;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "translate-dataset")]
#[command(about = "Translate a dataset with a local marian-server decoder")]
#[command(group(ArgGroup::new("lowercase").args(["lowercase_all", "lowercase_capitals"])))]
pub struct CliArgs {
    /// Dataset in the source language, one sentence per line
    #[arg(long, alias = "dataset_path")]
    pub dataset_path: PathBuf,

    /// Output path for the dataset in the target language
    #[arg(long, alias = "output_path")]
    pub output_path: PathBuf,

    /// Decoder configuration (decoder.yml) to serve
    #[arg(long, alias = "decoder_path")]
    pub decoder_path: PathBuf,

    /// Source language BPE codes
    #[arg(long)]
    pub sourcebpe: Option<PathBuf>,

    /// Target language BPE codes
    #[arg(long)]
    pub targetbpe: Option<PathBuf>,

    /// Source language SentencePiece model
    #[arg(long)]
    pub sourcespm: Option<PathBuf>,

    /// Target language SentencePiece model
    #[arg(long)]
    pub targetspm: Option<PathBuf>,

    /// Source language id
    #[arg(long, alias = "source_lang")]
    pub source_lang: String,

    /// Target language id
    #[arg(long, alias = "target_lang")]
    pub target_lang: String,

    /// Port the decoder listens on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Bytes to read from the dataset per batch; larger blocks mean larger batches
    #[arg(long, alias = "block_size", default_value_t = DEFAULT_BLOCK_SIZE)]
    pub block_size: usize,

    /// Lowercase all the words
    #[arg(long, alias = "lowercase_all")]
    pub lowercase_all: bool,

    /// For every word, lowercase all the letters except the first one
    #[arg(long, alias = "lowercase_capitals")]
    pub lowercase_capitals: bool,

    /// TOML file with a [server] section overriding decoder launch options
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write a JSON run summary to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Sample decoder CPU and memory usage while translating
    #[arg(long)]
    pub monitor: bool,

    /// Hide the progress line
    #[arg(long)]
    pub no_progress: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    pub fn case_normalization(&self) -> CaseNormalization {
        if self.lowercase_all {
            CaseNormalization::All
        } else if self.lowercase_capitals {
            CaseNormalization::Capitals
        } else {
            CaseNormalization::None
        }
    }

    /// Builds the job configuration, merging the optional TOML file.
    pub fn into_config(self) -> Result<TranslateConfig> {
        let server = match &self.config {
            Some(path) => {
                tracing::info!("Loading decoder options from {}", path.display());
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                file.server
            }
            None => ServerConfig::default(),
        };

        let case = self.case_normalization();
        Ok(TranslateConfig {
            dataset_path: self.dataset_path,
            output_path: self.output_path,
            decoder_path: self.decoder_path,
            source_lang: self.source_lang,
            target_lang: self.target_lang,
            sourcebpe: self.sourcebpe,
            targetbpe: self.targetbpe,
            sourcespm: self.sourcespm,
            targetspm: self.targetspm,
            port: self.port,
            block_size: self.block_size,
            case,
            monitor: self.monitor,
            progress: !self.no_progress,
            summary_path: self.summary,
            server,
        })
    }
}
