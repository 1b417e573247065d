//! `marketlens-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no table loading,
//! no presentation concerns).

pub mod error;
pub mod granularity;
pub mod id;
pub mod trend;

pub use error::{InsightError, InsightResult};
pub use granularity::Granularity;
pub use id::{DatasetId, SessionId};
pub use trend::{MarketTrend, TrendLabel};
