use crate::utils::error::Result;
use async_trait::async_trait;

/// Splits a dataset line into decoder-ready sentences and rebuilds the
/// decoder's output into final text.
pub trait ContentProcessor: Send + Sync {
    fn preprocess(&self, line: &str) -> Result<Vec<String>>;
    fn postprocess(&self, sentences: Vec<String>) -> Result<Vec<String>>;
}

/// A translation backend taking newline-separated sentences and returning
/// the same number of newline-separated translations.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String>;
}
