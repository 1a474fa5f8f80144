//! Sector and country allocation.

use crate::types::{Dataset, Holding};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label used for the cash bucket.
pub const CASH_LABEL: &str = "Cash";

/// Label used for holdings with a blank classification.
pub const UNCLASSIFIED_LABEL: &str = "Unclassified";

/// Aggregated weight for one classification value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationBucket {
    /// Sector or country name.
    pub label: String,

    /// Number of holdings in the bucket.
    pub count: usize,

    /// Combined weight (%).
    pub weight_pct: f64,

    /// Combined market value, when every holding in the bucket carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_value: Option<Decimal>,
}

/// Distribution of the portfolio across one classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Buckets sorted by weight descending.
    pub buckets: Vec<AllocationBucket>,

    /// Cash weight (%), if the fund reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_weight: Option<f64>,
}

impl Allocation {
    /// Returns the bucket with the given label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&AllocationBucket> {
        self.buckets.iter().find(|b| b.label == label)
    }

    /// Total invested weight across buckets (%), cash excluded.
    #[must_use]
    pub fn invested_weight(&self) -> f64 {
        self.buckets.iter().map(|b| b.weight_pct).sum()
    }

    /// Buckets with cash appended as a final entry, for display.
    #[must_use]
    pub fn with_cash_bucket(&self) -> Vec<AllocationBucket> {
        let mut rows = self.buckets.clone();
        if let Some(cash) = self.cash_weight.filter(|w| *w > 0.0) {
            rows.push(AllocationBucket {
                label: CASH_LABEL.to_string(),
                count: 0,
                weight_pct: cash,
                market_value: None,
            });
        }
        rows
    }
}

/// Buckets the dataset's holdings by sector.
#[must_use]
pub fn bucket_by_sector(dataset: &Dataset) -> Allocation {
    bucket_by(dataset, |h| &h.sector)
}

/// Buckets the dataset's holdings by country.
#[must_use]
pub fn bucket_by_country(dataset: &Dataset) -> Allocation {
    bucket_by(dataset, |h| &h.country)
}

fn bucket_by<F>(dataset: &Dataset, key: F) -> Allocation
where
    F: Fn(&Holding) -> &String,
{
    // Preserves first-seen order so equal weights sort deterministically.
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<&Holding>> = HashMap::new();
    for holding in dataset.holdings() {
        let label = match key(holding).trim() {
            "" => UNCLASSIFIED_LABEL.to_string(),
            other => other.to_string(),
        };
        if !grouped.contains_key(&label) {
            order.push(label.clone());
        }
        grouped.entry(label).or_default().push(holding);
    }

    let mut buckets: Vec<AllocationBucket> = order
        .into_iter()
        .map(|label| {
            let group = grouped.remove(&label).unwrap_or_default();
            let market_value = group
                .iter()
                .map(|h| h.market_value)
                .sum::<Option<Decimal>>();
            AllocationBucket {
                count: group.len(),
                weight_pct: group.iter().map(|h| h.weight).sum(),
                market_value,
                label,
            }
        })
        .collect();
    buckets.sort_by(|a, b| b.weight_pct.total_cmp(&a.weight_pct));

    Allocation {
        buckets,
        cash_weight: dataset.metadata().cash_weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FundMetadata;
    use approx::assert_relative_eq;
    use meridian_math::CorrelationMatrix;
    use rust_decimal_macros::dec;

    fn dataset(cash: Option<f64>) -> Dataset {
        let holdings = vec![
            Holding::new("AAA", "Alpha", 20.0)
                .with_sector("Technology")
                .with_country("United States")
                .with_market_value(dec!(200)),
            Holding::new("BBB", "Beta", 30.0)
                .with_sector("Financials")
                .with_country("United Kingdom")
                .with_market_value(dec!(300)),
            Holding::new("CCC", "Gamma", 25.0)
                .with_sector("Technology")
                .with_country("United States")
                .with_market_value(dec!(250)),
            Holding::new("DDD", "Delta", 23.0).with_country("Japan"),
        ];
        let metadata = FundMetadata {
            cash_weight: cash,
            ..FundMetadata::default()
        };
        Dataset::new(holdings, CorrelationMatrix::identity(4), metadata).unwrap()
    }

    #[test]
    fn test_sector_buckets_sorted() {
        let alloc = bucket_by_sector(&dataset(None));
        let labels: Vec<_> = alloc.buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["Technology", "Financials", "Unclassified"]);

        let tech = alloc.get("Technology").unwrap();
        assert_eq!(tech.count, 2);
        assert_relative_eq!(tech.weight_pct, 45.0);
        assert_eq!(tech.market_value, Some(dec!(450)));
        assert_eq!(alloc.get("Unclassified").unwrap().market_value, None);
        assert_relative_eq!(alloc.invested_weight(), 98.0);
    }

    #[test]
    fn test_country_buckets() {
        let alloc = bucket_by_country(&dataset(None));
        assert_eq!(alloc.buckets[0].label, "United States");
        assert_eq!(alloc.buckets.len(), 3);
    }

    #[test]
    fn test_cash_bucket() {
        let alloc = bucket_by_sector(&dataset(Some(2.0)));
        let rows = alloc.with_cash_bucket();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3].label, CASH_LABEL);
        assert_eq!(rows[3].weight_pct, 2.0);

        let no_cash = bucket_by_sector(&dataset(Some(0.0))).with_cash_bucket();
        assert_eq!(no_cash.len(), 3);
    }
}
