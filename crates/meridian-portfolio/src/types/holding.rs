//! Holding representation with pre-calculated return and volatility.

use crate::error::{PortfolioError, PortfolioResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single equity position.
///
/// Weights, returns and volatilities are percentages (8.55 for 8.55%), as
/// delivered by the data pipeline. Immutable once the dataset is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Exchange ticker.
    pub ticker: String,

    /// Issuer name.
    pub name: String,

    /// Portfolio weight (%).
    pub weight: f64,

    /// Annualised return (%).
    pub ann_return_pct: f64,

    /// Annualised volatility (%).
    pub ann_vol_pct: f64,

    /// Sector classification.
    pub sector: String,

    /// Country of domicile.
    pub country: String,

    /// Market value in fund currency, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_value: Option<Decimal>,
}

impl Holding {
    /// Creates a holding with zero return and volatility and blank classification.
    #[must_use]
    pub fn new(ticker: impl Into<String>, name: impl Into<String>, weight: f64) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            weight,
            ann_return_pct: 0.0,
            ann_vol_pct: 0.0,
            sector: String::new(),
            country: String::new(),
            market_value: None,
        }
    }

    /// Sets the annualised return and volatility (%).
    #[must_use]
    pub fn with_return_and_vol(mut self, ann_return_pct: f64, ann_vol_pct: f64) -> Self {
        self.ann_return_pct = ann_return_pct;
        self.ann_vol_pct = ann_vol_pct;
        self
    }

    /// Sets the sector.
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = sector.into();
        self
    }

    /// Sets the country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Sets the market value.
    #[must_use]
    pub fn with_market_value(mut self, value: Decimal) -> Self {
        self.market_value = Some(value);
        self
    }

    /// Annualised return as a decimal.
    #[must_use]
    pub fn return_decimal(&self) -> f64 {
        self.ann_return_pct / 100.0
    }

    /// Annualised volatility as a decimal.
    #[must_use]
    pub fn vol_decimal(&self) -> f64 {
        self.ann_vol_pct / 100.0
    }

    /// Display name truncated to `max_chars` characters.
    #[must_use]
    pub fn short_name(&self, max_chars: usize) -> String {
        self.name.chars().take(max_chars).collect()
    }

    /// Checks the numeric fields.
    ///
    /// # Errors
    ///
    /// Returns `InvalidWeight` for a negative or non-finite weight and
    /// `InvalidHolding` for a non-finite return or a negative/non-finite
    /// volatility.
    pub fn validate(&self) -> PortfolioResult<()> {
        if !is_valid_weight(self.weight) {
            return Err(PortfolioError::invalid_weight(&self.ticker, self.weight));
        }
        if !self.ann_return_pct.is_finite() {
            return Err(PortfolioError::invalid_holding(
                &self.ticker,
                "annualised return is not finite",
            ));
        }
        if !(self.ann_vol_pct.is_finite() && self.ann_vol_pct >= 0.0) {
            return Err(PortfolioError::invalid_holding(
                &self.ticker,
                format!("invalid annualised volatility {}", self.ann_vol_pct),
            ));
        }
        Ok(())
    }
}

/// A weight is usable if it is finite and non-negative.
#[must_use]
pub fn is_valid_weight(weight: f64) -> bool {
    weight.is_finite() && weight >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn msft() -> Holding {
        Holding::new("MSFT", "Microsoft Corporation", 8.55)
            .with_return_and_vol(18.2, 24.5)
            .with_sector("Technology")
            .with_country("United States")
    }

    #[test]
    fn test_builder() {
        let h = msft().with_market_value(dec!(403291685.24));
        assert_eq!(h.ticker, "MSFT");
        assert_eq!(h.sector, "Technology");
        assert_eq!(h.market_value, Some(dec!(403291685.24)));
    }

    #[test]
    fn test_decimal_conversions() {
        let h = msft();
        assert!((h.return_decimal() - 0.182).abs() < 1e-12);
        assert!((h.vol_decimal() - 0.245).abs() < 1e-12);
    }

    #[test]
    fn test_short_name() {
        let h = msft();
        assert_eq!(h.short_name(20), "Microsoft Corporatio");
        assert_eq!(h.short_name(100), "Microsoft Corporation");
    }

    #[test]
    fn test_validate() {
        assert!(msft().validate().is_ok());

        let mut h = msft();
        h.weight = -1.0;
        assert!(matches!(
            h.validate(),
            Err(PortfolioError::InvalidWeight { .. })
        ));

        let mut h = msft();
        h.ann_vol_pct = f64::NAN;
        assert!(matches!(
            h.validate(),
            Err(PortfolioError::InvalidHolding { .. })
        ));
    }

    #[test]
    fn test_deserialize_pipeline_record() {
        let json = r#"{
            "name": "Visa Inc. Class A", "ticker": "V", "weight": 4.97,
            "sector": "Financials", "country": "United States",
            "market_value": 234409303.35, "ann_return_pct": 15.1,
            "ann_vol_pct": 19.8, "risk_contribution_pct": 4.2,
            "total_return_pct": 31.0
        }"#;
        let h: Holding = serde_json::from_str(json).unwrap();
        assert_eq!(h.ticker, "V");
        assert_eq!(h.weight, 4.97);
        assert!(h.market_value.is_some());
    }
}
