use rayon::prelude::*;

use crate::utils::math::vector::SparseVec;

/// One L2-normalized document vector per corpus row, in corpus order.
#[derive(Debug, Clone)]
pub struct CorpusMatrix {
    rows: Vec<SparseVec>,
    dim: usize,
}

impl CorpusMatrix {
    pub fn new(dim: usize, rows: Vec<SparseVec>) -> Self {
        debug_assert!(rows.iter().all(|r| r.dim() == dim));
        Self { rows, dim }
    }

    #[inline]
    pub fn row(&self, index: usize) -> Option<&SparseVec> {
        self.rows.get(index)
    }

    #[inline]
    pub fn rows(&self) -> &[SparseVec] {
        &self.rows
    }

    /// Number of rows
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Vocabulary dimension
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Cosine similarity of `query` against every row, in row order.
    ///
    /// Rows and query are unit-norm (or zero), so cosine is the dot product.
    /// Each row is an independent sequential reduction, so scores do not
    /// depend on how rayon splits the work.
    pub fn similarities(&self, query: &SparseVec) -> Vec<f64> {
        if query.is_zero() {
            return vec![0.0; self.rows.len()];
        }
        self.rows
            .par_iter()
            .map(|row| row.dot(query).clamp(0.0, 1.0))
            .collect()
    }
}
