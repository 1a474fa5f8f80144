//! Highly correlated holding pairs.
//!
//! Pairs with a high correlation behave like one larger position, a form of
//! concentration that weights alone do not show.

use crate::types::{AnalyticsConfig, Dataset};
use serde::{Deserialize, Serialize};

/// Characters of each name kept in a pair label.
pub const PAIR_NAME_CHARS: usize = 20;

/// Two holdings whose correlation exceeds the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelatedPair {
    /// Index of the first holding (always the lower index).
    pub first: usize,
    /// Index of the second holding.
    pub second: usize,
    /// Display label, "Name A / Name B".
    pub label: String,
    /// Pairwise correlation.
    pub correlation: f64,
    /// Sum of the two base weights (%).
    pub combined_weight: f64,
    /// True when both holdings share a sector.
    pub same_sector: bool,
}

/// Pairs above the configured threshold, strongest first.
#[must_use]
pub fn high_correlation_pairs(dataset: &Dataset, config: &AnalyticsConfig) -> Vec<CorrelatedPair> {
    correlated_pairs(
        dataset,
        config.correlation_threshold,
        config.correlation_top_k,
    )
}

/// Pairs `i < j` with correlation strictly above `threshold`, sorted by
/// correlation descending and truncated to `top_k`.
#[must_use]
pub fn correlated_pairs(dataset: &Dataset, threshold: f64, top_k: usize) -> Vec<CorrelatedPair> {
    let holdings = dataset.holdings();
    let mut pairs: Vec<CorrelatedPair> = dataset
        .correlation()
        .upper_triangle()
        .filter(|(_, _, corr)| *corr > threshold)
        .map(|(i, j, correlation)| {
            let (a, b) = (&holdings[i], &holdings[j]);
            CorrelatedPair {
                first: i,
                second: j,
                label: format!(
                    "{} / {}",
                    a.short_name(PAIR_NAME_CHARS),
                    b.short_name(PAIR_NAME_CHARS)
                ),
                correlation,
                combined_weight: a.weight + b.weight,
                same_sector: a.sector == b.sector,
            }
        })
        .collect();

    pairs.sort_by(|a, b| b.correlation.total_cmp(&a.correlation));
    pairs.truncate(top_k);
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FundMetadata, Holding};
    use meridian_math::CorrelationMatrix;

    fn dataset(rows: &[Vec<f64>]) -> Dataset {
        let holdings = vec![
            Holding::new("A", "Alphabet Incorporated Class C", 5.0).with_sector("Technology"),
            Holding::new("B", "Broadcom", 4.0).with_sector("Technology"),
            Holding::new("C", "Citigroup", 3.0).with_sector("Financials"),
            Holding::new("D", "Danaher", 2.0).with_sector("Health Care"),
        ];
        let corr = CorrelationMatrix::from_rows(rows, 1e-9).unwrap();
        Dataset::new(holdings, corr, FundMetadata::default()).unwrap()
    }

    fn rows() -> Vec<Vec<f64>> {
        vec![
            vec![1.0, 0.72, 0.56, 0.10],
            vec![0.72, 1.0, 0.60, 0.55],
            vec![0.56, 0.60, 1.0, 0.20],
            vec![0.10, 0.55, 0.20, 1.0],
        ]
    }

    #[test]
    fn test_pairs_sorted_and_filtered() {
        let ds = dataset(&rows());
        let pairs = high_correlation_pairs(&ds, &AnalyticsConfig::default());

        let idx: Vec<_> = pairs.iter().map(|p| (p.first, p.second)).collect();
        // 0.55 exactly is not above the threshold.
        assert_eq!(idx, vec![(0, 1), (1, 2), (0, 2)]);
        assert!(pairs.windows(2).all(|w| w[0].correlation > w[1].correlation));
    }

    #[test]
    fn test_pair_fields() {
        let ds = dataset(&rows());
        let pairs = high_correlation_pairs(&ds, &AnalyticsConfig::default());

        assert_eq!(pairs[0].label, "Alphabet Incorporate / Broadcom");
        assert_eq!(pairs[0].combined_weight, 9.0);
        assert!(pairs[0].same_sector);
        assert!(!pairs[1].same_sector);
    }

    #[test]
    fn test_top_k() {
        let ds = dataset(&rows());
        assert_eq!(correlated_pairs(&ds, 0.55, 2).len(), 2);
        assert_eq!(correlated_pairs(&ds, 0.0, 10).len(), 6);
    }

    #[test]
    fn test_no_pairs() {
        let mut r = rows();
        for (i, row) in r.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                if i != j {
                    *v = 0.3;
                }
            }
        }
        let ds = dataset(&r);
        assert!(high_correlation_pairs(&ds, &AnalyticsConfig::default()).is_empty());
    }
}
