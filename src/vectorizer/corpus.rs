use std::sync::atomic::{AtomicU64, Ordering};

use ahash::RandomState;
use dashmap::DashMap;

use crate::TokenFrequency;

/// Corpus-wide term statistics gathered during training.
///
/// Documents may be added from several threads at once; the counters are
/// commutative so the final numbers do not depend on arrival order.
#[derive(Debug, Default)]
pub struct Corpus {
    /// number of documents added
    doc_num: AtomicU64,
    /// term -> number of documents containing it
    doc_freq: DashMap<Box<str>, u64, RandomState>,
    /// term -> total occurrences across the corpus
    term_freq: DashMap<Box<str>, u64, RandomState>,
}

impl Corpus {
    pub fn new() -> Self {
        Self {
            doc_num: AtomicU64::new(0),
            doc_freq: DashMap::with_hasher(RandomState::new()),
            term_freq: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// Add one document's term counts
    pub fn add_doc(&self, freq: &TokenFrequency) {
        self.doc_num.fetch_add(1, Ordering::Relaxed);
        for (term, count) in freq.iter() {
            self.doc_freq
                .entry(term.into())
                .and_modify(|c| *c += 1)
                .or_insert(1);
            self.term_freq
                .entry(term.into())
                .and_modify(|c| *c += count as u64)
                .or_insert(count as u64);
        }
    }

    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num.load(Ordering::Relaxed)
    }

    /// Documents containing `term` at least once
    #[inline]
    pub fn doc_freq(&self, term: &str) -> u64 {
        self.doc_freq.get(term).map_or(0, |c| *c)
    }

    /// Occurrences of `term` across the whole corpus
    #[inline]
    pub fn term_freq(&self, term: &str) -> u64 {
        self.term_freq.get(term).map_or(0, |c| *c)
    }

    /// Number of distinct terms seen
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_freq.len()
    }

    /// `(term, corpus term frequency)` for every term, unordered
    pub fn term_freqs(&self) -> Vec<(Box<str>, u64)> {
        self.term_freq
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
