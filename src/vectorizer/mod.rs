pub mod corpus;
pub mod evaluate;
pub mod matrix;
pub mod stopwords;
pub mod tfidf;
pub mod token;
pub mod vocab;

use std::marker::PhantomData;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{
    config::{validate_max_features, validate_threshold, DetectorConfig},
    error::{DetectError, Result},
    utils::math::vector::SparseVec,
    vectorizer::{
        corpus::Corpus,
        evaluate::{
            classify::{classify, DuplicateMatch, QueryResult},
            explain::{
                best_row, shared_features, InterpretabilityReport, SimilarityStats, WordComparison,
                SHARED_FEATURE_CANDIDATES, SHARED_FEATURE_TOP_K,
            },
        },
        matrix::CorpusMatrix,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        token::TokenFrequency,
        vocab::Vocabulary,
    },
};

/// Vocabulary, IDF weights and corpus matrix built from one corpus.
///
/// Read-only after [`TrainedModel::train`]; share it behind an `Arc` to serve
/// queries from several threads.
#[derive(Debug, Clone)]
pub struct TrainedModel<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    vocabulary: Vocabulary,
    matrix: CorpusMatrix,
    /// original row texts, same order as the matrix
    texts: Vec<Box<str>>,
    max_features: usize,
    _marker: PhantomData<fn() -> E>,
}

impl<E> TrainedModel<E>
where
    E: TFIDFEngine,
{
    /// Build vocabulary, IDF weights and one normalized vector per row.
    ///
    /// Fails with [`DetectError::EmptyVocabulary`] when no row yields a term
    /// after stopword removal, and with [`DetectError::InvalidMaxFeatures`]
    /// when `max_features` is 0.
    pub fn train<S>(rows: &[S], max_features: usize) -> Result<Self>
    where
        S: AsRef<str> + Sync,
    {
        validate_max_features(max_features)?;

        let freqs: Vec<TokenFrequency> = rows
            .par_iter()
            .map(|row| TokenFrequency::from_terms(row.as_ref()))
            .collect();
        let corpus = Corpus::new();
        freqs.par_iter().for_each(|freq| corpus.add_doc(freq));

        let vocabulary = Vocabulary::build::<E>(&corpus, max_features)?;
        let vectors: Vec<SparseVec> = freqs
            .par_iter()
            .map(|freq| {
                let mut vec = E::tfidf_vec(freq, &vocabulary);
                vec.shrink_to_fit();
                vec
            })
            .collect();

        debug!(
            documents = rows.len(),
            distinct_terms = corpus.term_num(),
            vocabulary = vocabulary.len(),
            max_features,
            "trained model"
        );

        Ok(Self {
            matrix: CorpusMatrix::new(vocabulary.len(), vectors),
            vocabulary,
            texts: rows.iter().map(|row| row.as_ref().into()).collect(),
            max_features,
            _marker: PhantomData,
        })
    }

    /// Train with the vocabulary cap from `config` (validated first).
    pub fn train_with<S>(rows: &[S], config: &DetectorConfig) -> Result<Self>
    where
        S: AsRef<str> + Sync,
    {
        config.validate()?;
        Self::train(rows, config.max_features)
    }

    /// Weighted, L2-normalized vector of arbitrary text over this vocabulary.
    /// Text without vocabulary terms gives the zero vector.
    pub fn vectorize(&self, text: &str) -> SparseVec {
        E::tfidf_vec(&TokenFrequency::from_terms(text), &self.vocabulary)
    }

    /// Score `text` against every row and keep rows with similarity >= `threshold`.
    pub fn query(&self, text: &str, threshold: f64) -> Result<QueryResult> {
        validate_threshold(threshold)?;

        let query_vec = self.vectorize(text);
        let all_scores = self.matrix.similarities(&query_vec);
        let matches: Vec<DuplicateMatch> = classify(&all_scores, threshold)
            .into_iter()
            .map(|(index, similarity)| DuplicateMatch {
                index,
                text: self.texts[index].to_string(),
                similarity,
            })
            .collect();

        debug!(
            query_terms = query_vec.nnz(),
            matches = matches.len(),
            best = matches.first().map(|m| m.similarity),
            threshold,
            "scored query"
        );

        Ok(QueryResult {
            matches,
            all_scores,
            threshold,
        })
    }

    /// Explain the scores of a previous [`query`](Self::query) of `text`.
    ///
    /// `all_scores` must hold one score per corpus row.
    pub fn explain(
        &self,
        text: &str,
        all_scores: &[f64],
        threshold: f64,
    ) -> Result<InterpretabilityReport> {
        validate_threshold(threshold)?;
        if all_scores.len() != self.len() {
            return Err(DetectError::ScoreLengthMismatch {
                expected: self.len(),
                actual: all_scores.len(),
            });
        }
        let statistics = SimilarityStats::from_scores(all_scores, threshold).ok_or(
            DetectError::ScoreLengthMismatch {
                expected: self.len(),
                actual: 0,
            },
        )?;

        let best = best_row(all_scores).and_then(|(index, similarity)| {
            Some((
                DuplicateMatch {
                    index,
                    text: self.texts.get(index)?.to_string(),
                    similarity,
                },
                self.matrix.row(index)?,
            ))
        });

        let Some((best_match, match_vec)) = best else {
            trace!("no row to explain against");
            return Ok(InterpretabilityReport {
                best_match: None,
                shared_features: Vec::new(),
                word_comparison: None,
                statistics,
            });
        };

        let query_vec = self.vectorize(text);
        let shared = shared_features(
            &query_vec,
            match_vec,
            &self.vocabulary,
            SHARED_FEATURE_CANDIDATES,
            SHARED_FEATURE_TOP_K,
        );
        let word_comparison = WordComparison::new(text, &best_match.text);
        trace!(
            best = best_match.index,
            shared = shared.len(),
            common_words = word_comparison.common_words.len(),
            "explained query"
        );

        Ok(InterpretabilityReport {
            best_match: Some(best_match),
            shared_features: shared,
            word_comparison: Some(word_comparison),
            statistics,
        })
    }

    /// Query then explain, as one action.
    pub fn check(&self, text: &str, threshold: f64) -> Result<(QueryResult, InterpretabilityReport)> {
        let result = self.query(text, threshold)?;
        let report = self.explain(text, &result.all_scores, threshold)?;
        Ok((result, report))
    }

    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    #[inline]
    pub fn matrix(&self) -> &CorpusMatrix {
        &self.matrix
    }

    /// Stored vector of corpus row `index`
    #[inline]
    pub fn document_vector(&self, index: usize) -> Option<&SparseVec> {
        self.matrix.row(index)
    }

    /// Original text of corpus row `index`
    #[inline]
    pub fn text(&self, index: usize) -> Option<&str> {
        self.texts.get(index).map(|t| t.as_ref())
    }

    /// Number of corpus rows
    #[inline]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    #[inline]
    pub fn max_features(&self) -> usize {
        self.max_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit_model() -> TrainedModel {
        TrainedModel::train(&["Red apple", "Green apple", "Blue car"], 100).unwrap()
    }

    #[test]
    fn every_row_vector_is_unit_or_zero() {
        let model: TrainedModel =
            TrainedModel::train(&["apple pie", "", "the and", "car car bus"], 100).unwrap();
        for row in model.matrix().rows() {
            assert!(row.is_zero() || (row.norm() - 1.0).abs() < 1e-12);
        }
        assert!(model.document_vector(1).unwrap().is_zero());
        assert!(model.document_vector(2).unwrap().is_zero());
    }

    #[test]
    fn verbatim_row_scores_one() {
        let model = fruit_model();
        let result = model.query("Red apple", 0.5).unwrap();
        assert!((result.all_scores[0] - 1.0).abs() < 1e-9);
        assert_eq!(result.matches[0].index, 0);
        assert_eq!(result.matches[0].text, "Red apple");
    }

    #[test]
    fn out_of_vocabulary_query_is_zero_vector() {
        let model = fruit_model();
        assert!(model.vectorize("zzyxx qqwwee").is_zero());
        assert!(model.vectorize("").is_zero());
    }

    #[test]
    fn query_rejects_bad_threshold() {
        let model = fruit_model();
        assert_eq!(
            model.query("apple", 1.2).unwrap_err(),
            DetectError::InvalidThreshold { value: 1.2 }
        );
    }

    #[test]
    fn train_rejects_zero_max_features() {
        let err = TrainedModel::<DefaultTFIDFEngine>::train(&["apple"], 0).unwrap_err();
        assert_eq!(err, DetectError::InvalidMaxFeatures { value: 0 });
    }

    #[test]
    fn empty_corpus_fails() {
        let rows: [&str; 0] = [];
        let err = TrainedModel::<DefaultTFIDFEngine>::train(&rows, 10).unwrap_err();
        assert_eq!(err, DetectError::EmptyVocabulary { documents: 0 });
    }

    #[test]
    fn explain_checks_score_length() {
        let model = fruit_model();
        let err = model.explain("apple", &[0.1], 0.5).unwrap_err();
        assert_eq!(err, DetectError::ScoreLengthMismatch { expected: 3, actual: 1 });
    }

    #[test]
    fn all_zero_scores_explain_first_match() {
        let model: TrainedModel = TrainedModel::train(&["the red apple", "blue car"], 100).unwrap();
        let (result, report) = model.check("the zzz", 0.0).unwrap();
        assert!(!result.is_unique());
        assert_eq!(report.best_match.as_ref(), result.best());
        assert_eq!(report.best_match.as_ref().unwrap().index, 0);
        assert!(report.shared_features.is_empty());
        let words = report.word_comparison.unwrap();
        assert_eq!(words.common_words.len(), 1);
        assert_eq!(words.common_words[0].word, "the");
    }

    #[test]
    fn shared_products_sum_to_score() {
        let model = fruit_model();
        let (result, report) = model.check("green apple", 0.3).unwrap();
        let best = report.best_match.as_ref().unwrap();
        assert_eq!(best.index, 1);
        let sum: f64 = report.shared_features.iter().map(|f| f.product).sum();
        assert!((sum - result.all_scores[1]).abs() < 1e-9);
    }
}
