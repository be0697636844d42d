pub mod dataset;
pub mod engine;
pub mod normalize;
pub mod progress;

pub use crate::domain::model::{Batch, CaseNormalization, TranslationSummary};
pub use crate::domain::ports::{ContentProcessor, Translator};
pub use crate::utils::error::Result;
