/// This crate detects near-duplicate text rows with a TF-IDF vector-space model
/// and explains which terms and words drove each match.
pub mod config;
pub mod error;
pub mod loader;
pub mod registry;
pub mod utils;
pub mod vectorizer;

/// Trained Model
/// The top-level struct of this crate. `TrainedModel::train` scans a corpus
/// once and keeps:
/// - The capped vocabulary with one smoothed IDF weight per term
/// - One L2-normalized TF-IDF vector per corpus row (the corpus matrix)
/// - The original row texts, for reporting matches
///
/// Afterwards it is read-only. `query` scores a text against every row and
/// keeps those at or above a threshold; `explain` breaks the best match down
/// into shared terms, word overlap and score statistics.
///
/// `TrainedModel<E>` takes the weighting engine as a type parameter
/// (`DefaultTFIDFEngine` unless given).
///
/// # Examples
/// ```
/// use tf_idf_dedup::TrainedModel;
///
/// let model: TrainedModel = TrainedModel::train(&["Red apple", "Green apple", "Blue car"], 100)?;
/// let result = model.query("red apple", 0.5)?;
/// assert_eq!(result.matches[0].index, 0);
/// assert!(result.matches.iter().all(|m| m.index != 2));
/// # Ok::<(), tf_idf_dedup::DetectError>(())
/// ```
///
/// # Thread Safety
/// `TrainedModel` is `Send + Sync`; share it behind an `Arc` and query from
/// any number of threads.
pub use vectorizer::TrainedModel;

/// TF-IDF Calculation Engine Trait
/// Defines the term and IDF weights used by `TrainedModel<E>`.
/// `DefaultTFIDFEngine` uses raw term counts and smoothed IDF
/// `ln((1 + N) / (1 + df)) + 1`.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Vocabulary of a trained model: term <-> index lookup and IDF weights.
pub use vectorizer::vocab::Vocabulary;

/// Token Frequency structure
/// Counts token occurrences within one text, in first-seen order.
pub use vectorizer::token::TokenFrequency;

/// Query results
/// - `QueryResult`: matches plus the similarity of every row
/// - `DuplicateMatch`: one flagged row (index, text, similarity)
pub use vectorizer::evaluate::classify::{DuplicateMatch, QueryResult};

/// Interpretability
/// - `InterpretabilityReport`: best match, shared features, word overlap, statistics
/// - `FeatureContribution`: one term's share of the similarity score
/// - `WordComparison`: raw word counts and common words
/// - `SimilarityStats`: mean / max / min and count above threshold
pub use vectorizer::evaluate::explain::{
    CommonWord, FeatureContribution, InterpretabilityReport, SimilarityStats, WordComparison, WordCount,
};

/// Sparse vector used for document and query vectors.
pub use utils::math::vector::SparseVec;

pub use config::DetectorConfig;
pub use error::{DetectError, Result};
pub use registry::{ModelKey, ModelRegistry};
