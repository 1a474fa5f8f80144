//! Portfolio bucketing by classification.
//!
//! - **Sector bucketing**: weight and count per sector
//! - **Country bucketing**: weight and count per country of domicile
//!
//! Buckets are sorted by weight descending. Weights are the holdings' base
//! weights as delivered; the fund's cash position, when the metadata carries
//! one, is reported as a separate bucket.
//!
//! # Example
//!
//! ```rust,ignore
//! use meridian_portfolio::bucketing::*;
//!
//! let by_sector = bucket_by_sector(&dataset);
//! for bucket in &by_sector.buckets {
//!     println!("{}: {:.2}%", bucket.label, bucket.weight_pct);
//! }
//! ```

mod allocation;

pub use allocation::*;
