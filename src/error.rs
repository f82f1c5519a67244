/// Errors raised by training, querying and explaining.
///
/// "No duplicates found" and "query shares no vocabulary" are not errors;
/// they come back as an empty match list.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DetectError {
    #[error("corpus of {documents} document(s) produced no vocabulary terms after stopword removal")]
    EmptyVocabulary { documents: usize },

    #[error("threshold must be within [0, 1], got {value}")]
    InvalidThreshold { value: f64 },

    #[error("max_features must be positive, got {value}")]
    InvalidMaxFeatures { value: usize },

    #[error("similarity array has {actual} entries but the model holds {expected} documents")]
    ScoreLengthMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, DetectError>;
