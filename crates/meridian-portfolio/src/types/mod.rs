//! Domain types for portfolio analytics.
//!
//! - [`Holding`]: A single equity position with return and volatility
//! - [`Dataset`]: The validated, immutable snapshot every calculation reads
//! - [`AnalyticsConfig`]: Thresholds and display limits

mod config;
mod dataset;
mod holding;

pub use config::AnalyticsConfig;
pub use dataset::{CorrelationRecord, Dataset, DatasetRecord, DownsideRecord, FundMetadata};
pub use holding::{is_valid_weight, Holding};
