//! Filter operations
//!
//! This module provides the spatial filters of the engine. Every filter reads
//! from an immutable source image and writes a separate destination image,
//! and resolves out-of-bounds neighbors by replicating the nearest edge pixel.

/// Filter kernels
pub mod kernels;

/// Edge operators on the luma plane
mod edge;
pub use edge::*;

/// Neighborhood window and reduction engine
mod neighborhood;
pub use neighborhood::*;

/// Blur operations
mod ops;
pub use ops::*;

/// Rank and order-statistic filters
mod rank;
pub use rank::*;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;
