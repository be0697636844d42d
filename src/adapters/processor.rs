use crate::domain::ports::ContentProcessor;
use crate::utils::error::Result;
use std::path::PathBuf;

/// Sends each line to the decoder as a single sentence and returns the
/// decoder output untouched.
///
/// Use it with models that segment and encode internally (SentencePiece
/// vocabularies declared in decoder.yml). BPE or SPM files configured here
/// are recorded but not applied.
#[derive(Debug, Clone, Default)]
pub struct PassthroughProcessor {
    source_lang: String,
    target_lang: String,
    subword_models: Vec<PathBuf>,
}

impl PassthroughProcessor {
    pub fn new(source_lang: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            subword_models: Vec::new(),
        }
    }

    pub fn with_subword_models(mut self, models: impl IntoIterator<Item = PathBuf>) -> Self {
        self.subword_models.extend(models);
        if !self.subword_models.is_empty() {
            tracing::warn!(
                "{} subword model(s) configured for {}->{}; passthrough processing does not apply them",
                self.subword_models.len(),
                self.source_lang,
                self.target_lang
            );
        }
        self
    }
}

impl ContentProcessor for PassthroughProcessor {
    fn preprocess(&self, line: &str) -> Result<Vec<String>> {
        let sentence = line.trim();
        if sentence.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![sentence.to_string()])
    }

    fn postprocess(&self, sentences: Vec<String>) -> Result<Vec<String>> {
        Ok(sentences)
    }
}
