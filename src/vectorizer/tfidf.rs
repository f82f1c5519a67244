use crate::{utils::math::vector::SparseVec, vectorizer::{token::TokenFrequency, vocab::Vocabulary}};

/// Weighting strategy plugged into [`TrainedModel`](crate::TrainedModel).
pub trait TFIDFEngine {
    /// IDF weight of a term
    /// # Arguments
    /// * `doc_num` - number of documents in the corpus
    /// * `doc_freq` - number of documents containing the term
    fn idf(doc_num: u64, doc_freq: u64) -> f64;

    /// Weight of a term that occurs `count` times in one text
    fn tf(count: u32) -> f64;

    /// Weighted vector over `vocab`, L2-normalized.
    /// Out-of-vocabulary tokens contribute nothing.
    fn tfidf_vec(freq: &TokenFrequency, vocab: &Vocabulary) -> SparseVec {
        let pairs = freq.iter().filter_map(|(term, count)| {
            vocab
                .index_of(term)
                .map(|idx| (idx, Self::tf(count) * vocab.idf(idx)))
        });
        SparseVec::from_pairs(vocab.len(), pairs).normalized()
    }
}

/// Default engine
/// raw term counts and smoothed IDF:
/// idf = ln((1 + N) / (1 + df)) + 1
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine for DefaultTFIDFEngine {
    #[inline]
    fn idf(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }

    #[inline]
    fn tf(count: u32) -> f64 {
        count as f64
    }
}
