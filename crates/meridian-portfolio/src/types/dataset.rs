//! The immutable dataset snapshot the analytics operate on.
//!
//! A [`Dataset`] is built once from the JSON document produced by the data
//! pipeline. All structural validation happens here: after a successful load
//! no analytics call can fail on dimensions.

use super::{AnalyticsConfig, Holding};
use crate::error::{PortfolioError, PortfolioResult};
use chrono::NaiveDate;
use meridian_math::{CorrelationMatrix, CovarianceMatrix};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fund-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundMetadata {
    /// Fund display name.
    #[serde(default)]
    pub fund_name: Option<String>,

    /// Valuation date of the snapshot.
    #[serde(default)]
    pub as_of_date: Option<NaiveDate>,

    /// Total assets under management in fund currency.
    #[serde(default)]
    pub total_aum: Decimal,

    /// Cash weight (%), held outside the equity holdings.
    #[serde(default)]
    pub cash_weight: Option<f64>,

    /// Annualised risk-free rate (decimal).
    #[serde(default)]
    pub risk_free_rate: Option<f64>,

    /// Benchmark identifier.
    #[serde(default)]
    pub benchmark: Option<String>,
}

/// Correlation block as delivered by the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorrelationRecord {
    /// Row/column labels.
    #[serde(default)]
    pub tickers: Vec<String>,

    /// Row-major nested matrix.
    pub matrix: Vec<Vec<f64>>,
}

/// Historical downside statistics computed upstream (daily, %).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DownsideRecord {
    /// One-day 95% Value at Risk (%).
    #[serde(default)]
    pub var_95_daily_pct: Option<f64>,

    /// One-day 95% Conditional VaR (%).
    #[serde(default)]
    pub cvar_95_daily_pct: Option<f64>,

    /// Maximum drawdown over the lookback (%).
    #[serde(default)]
    pub max_drawdown_pct: Option<f64>,
}

/// The raw JSON document. Unknown sections are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetRecord {
    /// Fund metadata.
    pub metadata: FundMetadata,

    /// Equity holdings.
    pub holdings: Vec<Holding>,

    /// Correlation matrix over the holdings, in holding order.
    pub correlation_matrix: CorrelationRecord,

    /// Historical downside statistics.
    #[serde(default)]
    pub portfolio_risk: Option<DownsideRecord>,
}

/// A validated, immutable dataset snapshot.
#[derive(Debug, Clone)]
pub struct Dataset {
    holdings: Vec<Holding>,
    labels: Vec<String>,
    correlation: CorrelationMatrix,
    covariance: CovarianceMatrix,
    metadata: FundMetadata,
    downside: Option<DownsideRecord>,
}

impl Dataset {
    /// Parses and validates a pipeline JSON document.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for malformed JSON and any error from
    /// [`Dataset::from_record`].
    pub fn from_json(json: &str, config: &AnalyticsConfig) -> PortfolioResult<Self> {
        let record: DatasetRecord = serde_json::from_str(json)?;
        Self::from_record(record, config)
    }

    /// Validates a parsed record.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` when the correlation matrix or its labels
    /// disagree with the holdings count, `Matrix` for an invalid correlation
    /// matrix, and holding validation errors.
    pub fn from_record(record: DatasetRecord, config: &AnalyticsConfig) -> PortfolioResult<Self> {
        let n = record.holdings.len();
        let rows = &record.correlation_matrix.matrix;
        if rows.len() != n {
            return Err(PortfolioError::dimension_mismatch(
                "correlation matrix rows",
                n,
                rows.len(),
            ));
        }

        let labels = if record.correlation_matrix.tickers.is_empty() {
            record.holdings.iter().map(|h| h.ticker.clone()).collect()
        } else if record.correlation_matrix.tickers.len() == n {
            record.correlation_matrix.tickers
        } else {
            return Err(PortfolioError::dimension_mismatch(
                "correlation labels",
                n,
                record.correlation_matrix.tickers.len(),
            ));
        };

        let correlation = CorrelationMatrix::from_rows(rows, config.matrix_tolerance)?;
        let mut dataset = Self::new(record.holdings, correlation, record.metadata)?;
        dataset.labels = labels;
        dataset.downside = record.portfolio_risk;
        Ok(dataset)
    }

    /// Builds a dataset from already-validated parts.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPortfolio` with no holdings, `DimensionMismatch` if the
    /// correlation size differs from the holdings count, and holding
    /// validation errors.
    pub fn new(
        holdings: Vec<Holding>,
        correlation: CorrelationMatrix,
        metadata: FundMetadata,
    ) -> PortfolioResult<Self> {
        if holdings.is_empty() {
            return Err(PortfolioError::EmptyPortfolio);
        }
        if correlation.size() != holdings.len() {
            return Err(PortfolioError::dimension_mismatch(
                "correlation matrix",
                holdings.len(),
                correlation.size(),
            ));
        }
        for holding in &holdings {
            holding.validate()?;
        }

        let vols: Vec<f64> = holdings.iter().map(Holding::vol_decimal).collect();
        let covariance = CovarianceMatrix::from_correlation(&correlation, &vols)?;

        debug!(
            holdings = holdings.len(),
            as_of = ?metadata.as_of_date,
            "loaded dataset snapshot"
        );

        Ok(Self {
            labels: holdings.iter().map(|h| h.ticker.clone()).collect(),
            holdings,
            correlation,
            covariance,
            metadata,
            downside: None,
        })
    }

    /// Attaches upstream downside statistics.
    #[must_use]
    pub fn with_downside(mut self, downside: DownsideRecord) -> Self {
        self.downside = Some(downside);
        self
    }

    /// The holdings, in dataset order.
    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    /// Number of holdings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    /// Always false; an empty dataset cannot be built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Correlation row/column labels.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The validated correlation matrix.
    #[must_use]
    pub fn correlation(&self) -> &CorrelationMatrix {
        &self.correlation
    }

    /// The covariance matrix reconstructed at load time.
    #[must_use]
    pub fn covariance(&self) -> &CovarianceMatrix {
        &self.covariance
    }

    /// Fund metadata.
    #[must_use]
    pub fn metadata(&self) -> &FundMetadata {
        &self.metadata
    }

    /// Upstream downside statistics, if supplied.
    #[must_use]
    pub fn downside(&self) -> Option<&DownsideRecord> {
        self.downside.as_ref()
    }

    /// Base weights (%), in dataset order.
    #[must_use]
    pub fn base_weights(&self) -> Vec<f64> {
        self.holdings.iter().map(|h| h.weight).collect()
    }

    /// Annualised returns as decimals.
    #[must_use]
    pub fn returns(&self) -> Vec<f64> {
        self.holdings.iter().map(Holding::return_decimal).collect()
    }

    /// The dataset's risk-free rate, or the configured fallback when the field
    /// is absent. An explicit `0.0` is kept.
    #[must_use]
    pub fn risk_free_rate(&self, config: &AnalyticsConfig) -> f64 {
        self.metadata
            .risk_free_rate
            .unwrap_or(config.default_risk_free_rate)
    }

    /// Index of the holding with the given ticker (case-insensitive).
    #[must_use]
    pub fn position_of(&self, ticker: &str) -> Option<usize> {
        self.holdings
            .iter()
            .position(|h| h.ticker.eq_ignore_ascii_case(ticker))
    }
}
