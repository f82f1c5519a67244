use serde::{Deserialize, Serialize};

use crate::{
    utils::math::vector::SparseVec,
    vectorizer::{evaluate::classify::DuplicateMatch, token::TokenFrequency, vocab::Vocabulary},
};

/// Candidates ranked before zero products are dropped
pub const SHARED_FEATURE_CANDIDATES: usize = 20;
/// Shared features kept for display
pub const SHARED_FEATURE_TOP_K: usize = 10;

/// How much one vocabulary term contributed to a similarity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub term: String,
    pub index: usize,
    pub query_weight: f64,
    pub match_weight: f64,
    /// `query_weight * match_weight`; these sum to the cosine score
    pub product: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonWord {
    pub word: String,
    pub query_count: u32,
    pub match_count: u32,
}

impl CommonWord {
    #[inline]
    pub fn combined(&self) -> u32 {
        self.query_count + self.match_count
    }
}

/// Raw word view of a query and its match, stopwords included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordComparison {
    /// Distinct query words, first-seen order
    pub query_words: Vec<WordCount>,
    /// Distinct match words, first-seen order
    pub match_words: Vec<WordCount>,
    /// Words on both sides, by combined count descending
    pub common_words: Vec<CommonWord>,
}

impl WordComparison {
    pub fn new(query: &str, matched: &str) -> Self {
        let query_freq = TokenFrequency::from_words(query);
        let match_freq = TokenFrequency::from_words(matched);

        // intersection in query first-seen order, then a stable sort
        let mut common_words: Vec<CommonWord> = query_freq
            .iter()
            .filter(|(w, _)| match_freq.contains_token(w))
            .map(|(w, c)| CommonWord {
                word: w.to_string(),
                query_count: c,
                match_count: match_freq.token_count(w),
            })
            .collect();
        common_words.sort_by(|a, b| b.combined().cmp(&a.combined()));

        Self {
            query_words: to_word_counts(&query_freq),
            match_words: to_word_counts(&match_freq),
            common_words,
        }
    }
}

fn to_word_counts(freq: &TokenFrequency) -> Vec<WordCount> {
    freq.iter()
        .map(|(word, count)| WordCount {
            word: word.to_string(),
            count,
        })
        .collect()
}

/// Reductions over the full similarity array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityStats {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    /// Rows at or above the threshold
    pub above_threshold: usize,
    /// Corpus size
    pub total: usize,
}

impl SimilarityStats {
    /// `None` for an empty score array.
    pub fn from_scores(scores: &[f64], threshold: f64) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        let (sum, max, min) = scores.iter().fold(
            (0.0, f64::NEG_INFINITY, f64::INFINITY),
            |(sum, max, min), &s| (sum + s, max.max(s), min.min(s)),
        );
        Some(Self {
            mean: sum / scores.len() as f64,
            max,
            min,
            above_threshold: scores.iter().filter(|s| **s >= threshold).count(),
            total: scores.len(),
        })
    }
}

/// Why the query was (or was not) flagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretabilityReport {
    /// Highest-scoring row
    pub best_match: Option<DuplicateMatch>,
    /// Top shared terms between query and best match
    pub shared_features: Vec<FeatureContribution>,
    /// Raw word overlap between query and best match
    pub word_comparison: Option<WordComparison>,
    pub statistics: SimilarityStats,
}

/// Rank terms by their share of the query/match dot product.
///
/// Only terms non-zero in both vectors are candidates. Ranking is by product
/// descending, ties by vocabulary index; `candidates` are taken, zero products
/// dropped, and the rest truncated to `top_k`.
pub fn shared_features(
    query: &SparseVec,
    matched: &SparseVec,
    vocab: &Vocabulary,
    candidates: usize,
    top_k: usize,
) -> Vec<FeatureContribution> {
    let mut products: Vec<(usize, f64)> = query.hadamard(matched).iter().collect();
    products.sort_by(|a, b| b.1.total_cmp(&a.1));
    products
        .into_iter()
        .take(candidates)
        .filter(|(_, p)| *p > 0.0)
        .take(top_k)
        .filter_map(|(idx, product)| {
            let term = vocab.term(idx)?;
            Some(FeatureContribution {
                term: term.to_string(),
                index: idx,
                query_weight: query.get(idx),
                match_weight: matched.get(idx),
                product,
            })
        })
        .collect()
}

/// Highest score, ties to the lowest index. `None` only for an empty array,
/// so an all-zero array gives row 0 like the classifier's first match.
pub fn best_row(scores: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &s) in scores.iter().enumerate() {
        if best.map_or(true, |(_, b)| s > b) {
            best = Some((i, s));
        }
    }
    best
}
