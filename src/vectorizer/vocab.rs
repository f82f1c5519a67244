use std::cmp::Ordering;

use indexmap::IndexSet;

use crate::{error::{DetectError, Result}, vectorizer::{corpus::Corpus, tfidf::TFIDFEngine}};

/// Fixed, capped term dictionary of a trained model.
///
/// Indices are dense `0..len()` and follow the lexical order of the retained
/// terms. `idf_vec[i]` is the IDF weight of the term at index `i`.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
    idf_vec: Vec<f64>,
    doc_num: u64,
}

impl Vocabulary {
    /// Keep the `max_features` most frequent corpus terms and weight them.
    ///
    /// Terms are ranked by corpus-wide term frequency, ties by lexical order.
    /// Fails with [`DetectError::EmptyVocabulary`] when the corpus has no terms.
    pub fn build<E: TFIDFEngine>(corpus: &Corpus, max_features: usize) -> Result<Self> {
        let mut ranked = corpus.term_freqs();
        if ranked.is_empty() {
            return Err(DetectError::EmptyVocabulary {
                documents: corpus.doc_num() as usize,
            });
        }
        ranked.sort_unstable_by(|a, b| match b.1.cmp(&a.1) {
            Ordering::Equal => a.0.cmp(&b.0),
            ord => ord,
        });
        ranked.truncate(max_features);

        let mut retained: Vec<Box<str>> = ranked.into_iter().map(|(term, _)| term).collect();
        retained.sort_unstable();

        let doc_num = corpus.doc_num();
        let idf_vec = retained
            .iter()
            .map(|term| E::idf(doc_num, corpus.doc_freq(term)))
            .collect();

        Ok(Self {
            terms: retained.into_iter().collect(),
            idf_vec,
            doc_num,
        })
    }

    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    #[inline]
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get_index(index).map(|t| t.as_ref())
    }

    /// IDF at `index`, 0 when out of range
    #[inline]
    pub fn idf(&self, index: usize) -> f64 {
        self.idf_vec.get(index).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn idf_vec(&self) -> &[f64] {
        &self.idf_vec
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Documents the IDF weights were computed over
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// `(index, term, idf)` in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, f64)> {
        self.terms
            .iter()
            .zip(self.idf_vec.iter())
            .enumerate()
            .map(|(i, (t, &idf))| (i, t.as_ref(), idf))
    }
}
