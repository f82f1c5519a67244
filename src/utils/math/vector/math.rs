use std::cmp::Ordering;

use num::Float;

use super::SparseVec;

impl<N> SparseVec<N>
where
    N: Float,
{
    /// Dot product.
    /// d(a, b) = Σ(a_i * b_i), only indices stored on both sides contribute.
    #[inline]
    pub fn dot(&self, other: &Self) -> N {
        debug_assert_eq!(
            self.dim(),
            other.dim(),
            "Vectors must be of the same dimension to compute dot product."
        );

        let mut result = N::zero();
        let mut a = self.iter().peekable();
        let mut b = other.iter().peekable();
        while let (Some(&(ia, va)), Some(&(ib, vb))) = (a.peek(), b.peek()) {
            match ia.cmp(&ib) {
                Ordering::Equal => {
                    result = result + va * vb;
                    a.next();
                    b.next();
                }
                Ordering::Less => {
                    a.next();
                }
                Ordering::Greater => {
                    b.next();
                }
            }
        }
        result
    }

    #[inline]
    pub fn norm_sq(&self) -> N {
        self.iter().fold(N::zero(), |acc, (_, v)| acc + v * v)
    }

    /// Euclidean norm ||a|| = sqrt(Σ(a_i^2))
    #[inline]
    pub fn norm(&self) -> N {
        self.norm_sq().sqrt()
    }

    /// Scale to unit Euclidean norm in place. The zero vector stays zero.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm == N::zero() || !norm.is_finite() {
            return;
        }
        self.map_values(|v| v / norm);
    }

    /// Unit-norm copy (or zero).
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Element-wise product; stored only where both sides are non-zero.
    pub fn hadamard(&self, other: &Self) -> Self {
        debug_assert_eq!(
            self.dim(),
            other.dim(),
            "Vectors must be of the same dimension to compute hadamard product."
        );

        let mut pairs = Vec::with_capacity(self.nnz().min(other.nnz()));
        let mut a = self.iter().peekable();
        let mut b = other.iter().peekable();
        while let (Some(&(ia, va)), Some(&(ib, vb))) = (a.peek(), b.peek()) {
            match ia.cmp(&ib) {
                Ordering::Equal => {
                    pairs.push((ia, va * vb));
                    a.next();
                    b.next();
                }
                Ordering::Less => {
                    a.next();
                }
                Ordering::Greater => {
                    b.next();
                }
            }
        }
        SparseVec::from_pairs(self.dim(), pairs)
    }

    fn map_values<F>(&mut self, f: F)
    where
        F: Fn(N) -> N,
    {
        let pairs: Vec<(usize, N)> = self.iter().map(|(i, v)| (i, f(v))).collect();
        *self = SparseVec::from_pairs(self.dim(), pairs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn dot_uses_shared_indices_only() {
        let a = SparseVec::from_dense(&[1.0, 0.0, 2.0, 3.0]);
        let b = SparseVec::from_dense(&[4.0, 5.0, 0.0, 1.0]);
        assert!(approx(a.dot(&b), 7.0));
        assert!(approx(b.dot(&a), 7.0));
    }

    #[test]
    fn normalize_gives_unit_norm() {
        let mut v = SparseVec::from_dense(&[3.0, 0.0, 4.0]);
        v.normalize();
        assert!(approx(v.norm(), 1.0));
        assert!(approx(v.get(0), 0.6));
        assert!(approx(v.get(2), 0.8));
    }

    #[test]
    fn normalize_leaves_zero_vector_alone() {
        let v: SparseVec = SparseVec::zeros(3).normalized();
        assert!(v.is_zero());
        assert_eq!(v.norm(), 0.0);
    }

    #[test]
    fn dot_with_zero_vector_is_zero() {
        let a = SparseVec::from_dense(&[1.0, 1.0]);
        let z = SparseVec::zeros(2);
        assert_eq!(a.dot(&z), 0.0);
        assert_eq!(z.dot(&z), 0.0);
    }

    #[test]
    fn hadamard_keeps_overlap() {
        let a = SparseVec::from_dense(&[1.0, 2.0, 0.0, 3.0]);
        let b = SparseVec::from_dense(&[0.0, 5.0, 7.0, 2.0]);
        let h = a.hadamard(&b);
        assert_eq!(h.iter().collect::<Vec<_>>(), vec![(1, 10.0), (3, 6.0)]);
    }
}
