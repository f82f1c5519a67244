pub mod math;

use std::fmt;

use num::Float;

/// Sparse vector that stores only its non-zero elements.
///
/// `inds` is strictly ascending and `vals` never holds a zero, so two vectors
/// over the same dimension can be combined with a single merge pass.
#[derive(Clone, PartialEq)]
pub struct SparseVec<N = f64>
where
    N: Float,
{
    inds: Vec<usize>,
    vals: Vec<N>,
    dim: usize,
}

impl<N> SparseVec<N>
where
    N: Float,
{
    /// All-zero vector of dimension `dim`
    #[inline]
    pub fn zeros(dim: usize) -> Self {
        Self {
            inds: Vec::new(),
            vals: Vec::new(),
            dim,
        }
    }

    /// Build from `(index, value)` pairs in any order.
    /// Zero values are dropped, duplicate indices are summed.
    /// Indices at or beyond `dim` are ignored.
    pub fn from_pairs<I>(dim: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, N)>,
    {
        let mut pairs: Vec<(usize, N)> = pairs.into_iter().filter(|(i, _)| *i < dim).collect();
        pairs.sort_by_key(|(i, _)| *i);

        let mut inds: Vec<usize> = Vec::with_capacity(pairs.len());
        let mut vals: Vec<N> = Vec::with_capacity(pairs.len());
        for (i, v) in pairs {
            match inds.last() {
                Some(&last) if last == i => {
                    if let Some(acc) = vals.last_mut() {
                        *acc = *acc + v;
                    }
                }
                _ => {
                    inds.push(i);
                    vals.push(v);
                }
            }
        }

        let mut vec = Self { inds, vals, dim };
        vec.prune_zeros();
        vec
    }

    /// Build from a dense slice.
    pub fn from_dense(dense: &[N]) -> Self {
        let mut inds = Vec::new();
        let mut vals = Vec::new();
        for (i, &v) in dense.iter().enumerate() {
            if v != N::zero() {
                inds.push(i);
                vals.push(v);
            }
        }
        Self {
            inds,
            vals,
            dim: dense.len(),
        }
    }

    #[inline]
    fn prune_zeros(&mut self) {
        if self.vals.iter().all(|v| *v != N::zero()) {
            return;
        }
        let mut w = 0;
        for r in 0..self.vals.len() {
            if self.vals[r] != N::zero() {
                self.inds[w] = self.inds[r];
                self.vals[w] = self.vals[r];
                w += 1;
            }
        }
        self.inds.truncate(w);
        self.vals.truncate(w);
    }

    /// Dimension (including the implicit zeros)
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored non-zero elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.inds.is_empty()
    }

    /// Value at `index`; zero when not stored or out of range.
    #[inline]
    pub fn get(&self, index: usize) -> N {
        match self.inds.binary_search(&index) {
            Ok(pos) => self.vals[pos],
            Err(_) => N::zero(),
        }
    }

    /// Iterate the non-zero elements as `(index, value)` in ascending index order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (usize, N)> + '_ {
        self.inds.iter().copied().zip(self.vals.iter().copied())
    }

    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }
}

impl<N> fmt::Debug for SparseVec<N>
where
    N: Float + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "SparseVec(dim: {}, nnz: {}) [", self.dim, self.nnz())?;
            for (i, v) in self.iter() {
                writeln!(f, "    {}: {:?}", i, v)?;
            }
            write!(f, "]")
        } else {
            f.debug_map().entries(self.iter()).finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_sorts_merges_and_drops_zeros() {
        let vec: SparseVec = SparseVec::from_pairs(6, vec![(4, 1.0), (1, 2.0), (4, 0.5), (2, 0.0), (9, 3.0)]);
        assert_eq!(vec.iter().collect::<Vec<_>>(), vec![(1, 2.0), (4, 1.5)]);
        assert_eq!(vec.dim(), 6);
        assert_eq!(vec.nnz(), 2);
    }

    #[test]
    fn cancelling_duplicates_are_pruned() {
        let vec: SparseVec = SparseVec::from_pairs(3, vec![(0, 1.0), (0, -1.0), (2, 1.0)]);
        assert_eq!(vec.iter().collect::<Vec<_>>(), vec![(2, 1.0)]);
    }

    #[test]
    fn get_returns_zero_for_missing() {
        let vec = SparseVec::from_dense(&[0.0, 3.0, 0.0]);
        assert_eq!(vec.get(0), 0.0);
        assert_eq!(vec.get(1), 3.0);
        assert_eq!(vec.get(17), 0.0);
        assert_eq!(vec.iter().collect::<Vec<_>>(), vec![(1, 3.0)]);
    }

    #[test]
    fn zeros_is_zero() {
        let vec: SparseVec<f32> = SparseVec::zeros(10);
        assert!(vec.is_zero());
        assert_eq!(vec.dim(), 10);
    }
}
