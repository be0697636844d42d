use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("WebSocket error: {0}")]
    WebSocketError(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid endpoint URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to launch decoder '{binary}': {source}")]
    DecoderLaunchError {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Decoder exited before it was ready ({status})")]
    DecoderExitedError { status: String },

    #[error("Decoder did not accept connections on port {port} within {waited:?}")]
    DecoderStartupTimeout { port: u16, waited: Duration },

    #[error("Protocol error: {message}")]
    ProtocolError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Interrupted by user")]
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Decoder,
    Network,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TranslateError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::UrlError(_) => ErrorCategory::Configuration,
            Self::DecoderLaunchError { .. }
            | Self::DecoderExitedError { .. }
            | Self::DecoderStartupTimeout { .. } => ErrorCategory::Decoder,
            Self::WebSocketError(_) | Self::ProtocolError { .. } => ErrorCategory::Network,
            Self::SerializationError(_) | Self::ProcessingError { .. } => ErrorCategory::Data,
            Self::IoError(_) | Self::Interrupted => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Interrupted => ErrorSeverity::Low,
            Self::WebSocketError(_) | Self::ProtocolError { .. } | Self::DecoderStartupTimeout { .. } => {
                ErrorSeverity::Medium
            }
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::UrlError(_)
            | Self::SerializationError(_)
            | Self::ProcessingError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::DecoderLaunchError { .. } | Self::DecoderExitedError { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ConfigValidationError { field, .. }
            | Self::InvalidConfigValueError { field, .. } => {
                format!("Check the value of '{}' and run again", field)
            }
            Self::UrlError(_) => "Check the decoder host and port".to_string(),
            Self::DecoderLaunchError { binary, .. } => {
                format!("Make sure '{}' is installed and on PATH", binary)
            }
            Self::DecoderExitedError { .. } => {
                "Inspect marian-server.err in the log directory".to_string()
            }
            Self::DecoderStartupTimeout { .. } => {
                "Increase server.startup_timeout_seconds or check that the port is free".to_string()
            }
            Self::WebSocketError(_) | Self::ProtocolError { .. } => {
                "Check that the decoder is still running and serving /translate".to_string()
            }
            Self::IoError(_) => "Check file paths and permissions".to_string(),
            Self::SerializationError(_) | Self::ProcessingError { .. } => {
                "Check that the dataset is UTF-8 text with one sentence per line".to_string()
            }
            Self::Interrupted => "Re-run to translate the whole dataset".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Decoder => format!("Decoder problem: {}", self),
            ErrorCategory::Network => format!("Lost contact with the decoder: {}", self),
            ErrorCategory::Data => format!("Could not process the dataset: {}", self),
            ErrorCategory::System => self.to_string(),
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 130,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, TranslateError>;
