//! Trend labels produced by the classifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Historical demand trend for a single product series.
///
/// `Increasing`/`Decreasing`/`Stable` are only assigned when the underlying
/// series has at least three periods; anything shorter classifies as
/// `InsufficientData`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendLabel {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

impl TrendLabel {
    /// Whether a slope was actually fitted for this label.
    pub fn is_classified(&self) -> bool {
        !matches!(self, TrendLabel::InsufficientData)
    }
}

impl core::fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            TrendLabel::Increasing => "Increasing",
            TrendLabel::Decreasing => "Decreasing",
            TrendLabel::Stable => "Stable",
            TrendLabel::InsufficientData => "Insufficient data",
        };
        f.write_str(s)
    }
}

impl FromStr for TrendLabel {
    type Err = core::convert::Infallible;

    /// Forecast tables carry the trend as free text. Anything that is not
    /// exactly `Increasing` or `Decreasing` reads as `Stable`, which matches
    /// how the forecast answers branch on the label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Increasing" => TrendLabel::Increasing,
            "Decreasing" => TrendLabel::Decreasing,
            _ => TrendLabel::Stable,
        })
    }
}

/// Direction of the aggregate market series.
///
/// The global rule is binary: a zero slope reads as `Declining`. This
/// differs from the per-product three-way label on purpose; unifying the
/// two rules would change observable output.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketTrend {
    Growing,
    Declining,
}

impl core::fmt::Display for MarketTrend {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            MarketTrend::Growing => "Growing",
            MarketTrend::Declining => "Declining",
        };
        f.write_str(s)
    }
}
