use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};

/// A corpus row whose similarity met the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateMatch {
    /// Row index in the training corpus
    pub index: usize,
    /// Original row text
    pub text: String,
    /// Cosine similarity in [0, 1]
    pub similarity: f64,
}

/// Outcome of one query.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Rows at or above the threshold, by descending similarity then ascending index
    pub matches: Vec<DuplicateMatch>,
    /// Similarity of the query to every corpus row, in corpus order
    pub all_scores: Vec<f64>,
    /// Threshold the matches were selected with
    pub threshold: f64,
}

impl QueryResult {
    /// No row reached the threshold
    #[inline]
    pub fn is_unique(&self) -> bool {
        self.matches.is_empty()
    }

    /// Highest-scoring match, if any
    #[inline]
    pub fn best(&self) -> Option<&DuplicateMatch> {
        self.matches.first()
    }
}

/// Select every row with `score >= threshold` (inclusive).
///
/// Returns `(row index, score)` sorted by descending score; equal scores keep
/// ascending row index. NaN scores never match.
pub fn classify(scores: &[f64], threshold: f64) -> Vec<(usize, f64)> {
    let mut hits: Vec<(usize, f64)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, s)| *s >= threshold)
        .collect();
    // stable sort: ties stay in row order
    hits.sort_by(|a, b| b.1.total_cmp(&a.1));
    hits
}

impl Debug for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "QueryResult (threshold: {}) [", self.threshold)?;
            for m in &self.matches {
                writeln!(f, "    #{}: {:.6} {:?}", m.index, m.similarity, m.text)?;
            }
            write!(f, "]")
        } else {
            f.debug_struct("QueryResult")
                .field("matches", &self.matches)
                .field("threshold", &self.threshold)
                .field("rows", &self.all_scores.len())
                .finish()
        }
    }
}

impl Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unique() {
            return write!(f, "unique (no row >= {})", self.threshold);
        }
        for (rank, m) in self.matches.iter().enumerate() {
            writeln!(
                f,
                "{:>3}. [{}] {:.3} ({:.1}%) {}",
                rank + 1,
                m.index,
                m.similarity,
                m.similarity * 100.0,
                m.text
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        let scores = [0.5, 0.49999, 0.7];
        let hits = classify(&scores, 0.5);
        assert_eq!(hits, vec![(2, 0.7), (0, 0.5)]);
    }

    #[test]
    fn ties_break_by_row_index() {
        let scores = [0.8, 0.9, 0.8, 0.8];
        let hits = classify(&scores, 0.1);
        assert_eq!(hits, vec![(1, 0.9), (0, 0.8), (2, 0.8), (3, 0.8)]);
    }

    #[test]
    fn nothing_above_threshold_is_empty() {
        assert!(classify(&[0.1, 0.2], 0.9).is_empty());
        assert!(classify(&[], 0.0).is_empty());
    }

    #[test]
    fn nan_never_matches() {
        assert_eq!(classify(&[f64::NAN, 1.0], 0.0), vec![(1, 1.0)]);
    }

    #[test]
    fn display_reports_unique() {
        let result = QueryResult {
            matches: Vec::new(),
            all_scores: vec![0.0],
            threshold: 0.7,
        };
        assert!(result.is_unique());
        assert!(result.best().is_none());
        assert_eq!(result.to_string(), "unique (no row >= 0.7)");
    }
}
