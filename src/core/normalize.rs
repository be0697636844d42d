use crate::domain::model::CaseNormalization;

pub fn lowercase_all(sentence: &str) -> String {
    sentence.to_lowercase()
}

/// Lowercases every word except its first character. Words are separated by
/// single spaces, so runs of spaces come back unchanged.
pub fn lowercase_capitals(sentence: &str) -> String {
    sentence
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::with_capacity(word.len());
                    out.push(first);
                    out.push_str(&chars.as_str().to_lowercase());
                    out
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl CaseNormalization {
    pub fn apply(self, sentence: &str) -> String {
        match self {
            CaseNormalization::None => sentence.to_string(),
            CaseNormalization::All => lowercase_all(sentence),
            CaseNormalization::Capitals => lowercase_capitals(sentence),
        }
    }
}
