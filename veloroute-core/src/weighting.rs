//! Score weightings for edges.
//!
//! A [`ScoreWeighting`] turns an edge's raw priority into the score the
//! search maximises. Every score the engines see (arc scores, quality-ratio
//! path scores and final path scores) passes through the same weighting.

use crate::Edge;

/// Strategy assigning a score to an edge.
///
/// # Examples
/// ```
/// use veloroute_core::{Edge, ScoreWeighting};
///
/// let edge = Edge::new(1, 0, 1, 200.0, 0.6);
/// assert_eq!(ScoreWeighting::Raw.score_of(&edge), 0.6);
/// assert_eq!(ScoreWeighting::Thresholded { cutoff: 0.5 }.score_of(&edge), 1.0);
/// assert_eq!(ScoreWeighting::LengthScaled.score_of(&edge), 120.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ScoreWeighting {
    /// The edge's priority as-is.
    #[default]
    Raw,
    /// `1.0` when the priority exceeds `cutoff`, otherwise `0.0`.
    Thresholded {
        /// Priority a road must exceed to count.
        cutoff: f64,
    },
    /// Priority multiplied by the edge's length.
    LengthScaled,
}

impl ScoreWeighting {
    /// Return the score of `edge` under this weighting.
    pub fn score_of(&self, edge: &Edge) -> f64 {
        match self {
            Self::Raw => edge.priority,
            Self::Thresholded { cutoff } => {
                if edge.priority > *cutoff {
                    1.0
                } else {
                    0.0
                }
            }
            Self::LengthScaled => edge.distance * edge.priority,
        }
    }

    /// Sum the scores of `edges`.
    pub fn total<'a, I>(&self, edges: I) -> f64
    where
        I: IntoIterator<Item = &'a Edge>,
    {
        edges.into_iter().map(|edge| self.score_of(edge)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.5, 0.5, 0.0)]
    #[case(0.5, 0.51, 1.0)]
    #[case(0.0, 0.0, 0.0)]
    fn thresholded_requires_strictly_greater(
        #[case] cutoff: f64,
        #[case] priority: f64,
        #[case] expected: f64,
    ) {
        let edge = Edge::new(1, 0, 1, 10.0, priority);
        assert_eq!(ScoreWeighting::Thresholded { cutoff }.score_of(&edge), expected);
    }

    #[rstest]
    fn total_sums_weighted_scores() {
        let edges = [Edge::new(1, 0, 1, 10.0, 0.5), Edge::new(2, 1, 2, 4.0, 1.0)];
        assert!((ScoreWeighting::LengthScaled.total(&edges) - 9.0).abs() < 1e-9);
        assert!((ScoreWeighting::Raw.total(&edges) - 1.5).abs() < 1e-9);
    }
}
