//! The consolidated business-context snapshot.

use serde::{Deserialize, Serialize};
use tracing::debug;

use marketlens_core::{DatasetId, Granularity, InsightError, InsightResult, MarketTrend};
use marketlens_tables::{
    Dataset, ForecastRecord, PricingRecord, ProductionRecord, SalesRecord, SegmentSummaryRecord,
};

use crate::trend;

/// Pricing rows whose recommendation contains this marker count as
/// price-sensitive. The match is case-sensitive on purpose: it reproduces
/// the upstream pipeline's counts on the same data.
const PRICE_SENSITIVE_MARKER: &str = "Reduce";

/// Production rows whose action equals this marker exactly count as
/// capacity-constrained.
const CAPACITY_CONSTRAINED_ACTION: &str = "Capacity Constrained";

/// One immutable snapshot of cross-table business facts.
///
/// Built exactly once per data load and replaced wholesale on the next
/// load; fields are never patched individually, so readers can never see a
/// mixture of old and new facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessContext {
    pub dataset_id: DatasetId,
    pub overall_trend: MarketTrend,
    pub top_product: String,
    pub top_growth_pct: f64,
    pub top_segment: String,
    pub price_sensitive_count: usize,
    pub capacity_constrained_count: usize,
}

impl BusinessContext {
    /// Derive the snapshot from the five source tables.
    ///
    /// Every step requires its table to be non-empty; the first failure
    /// aborts the whole build and no partial snapshot is ever returned.
    pub fn build(
        dataset_id: DatasetId,
        sales: &[SalesRecord],
        forecast: &[ForecastRecord],
        segment_summary: &[SegmentSummaryRecord],
        pricing: &[PricingRecord],
        production: &[ProductionRecord],
    ) -> InsightResult<Self> {
        if sales.is_empty() {
            return Err(InsightError::empty_table("sales"));
        }
        if pricing.is_empty() {
            return Err(InsightError::empty_table("pricing"));
        }
        if production.is_empty() {
            return Err(InsightError::empty_table("production"));
        }

        // Global series over all products, monthly buckets. The global rule
        // is binary: zero slope reads as Declining, unlike the per-product
        // three-way label. Inherited asymmetry, kept for output parity.
        let series = trend::bucket_series(sales, Granularity::Monthly);
        let quantities: Vec<f64> = series.iter().map(|p| p.quantity).collect();
        let overall_trend = if trend::ols_slope(&quantities) > 0.0 {
            MarketTrend::Growing
        } else {
            MarketTrend::Declining
        };

        let top_growth = max_by_first(forecast, |r| r.expected_growth_pct)
            .ok_or_else(|| InsightError::empty_table("forecast"))?;
        let top_segment = max_by_first(segment_summary, |r| r.avg_monetary)
            .ok_or_else(|| InsightError::empty_table("segment_summary"))?;

        let price_sensitive_count = pricing
            .iter()
            .filter(|r| r.pricing_recommendation.contains(PRICE_SENSITIVE_MARKER))
            .count();
        let capacity_constrained_count = production
            .iter()
            .filter(|r| r.production_action == CAPACITY_CONSTRAINED_ACTION)
            .count();

        let context = Self {
            dataset_id,
            overall_trend,
            top_product: top_growth.product_name.clone(),
            top_growth_pct: top_growth.expected_growth_pct,
            top_segment: top_segment.segment_label.clone(),
            price_sensitive_count,
            capacity_constrained_count,
        };

        debug!(
            dataset_id = %context.dataset_id,
            overall_trend = %context.overall_trend,
            top_product = %context.top_product,
            price_sensitive = context.price_sensitive_count,
            capacity_constrained = context.capacity_constrained_count,
            "business context built"
        );
        Ok(context)
    }

    /// Convenience over a loaded [`Dataset`].
    pub fn from_dataset(dataset: &Dataset) -> InsightResult<Self> {
        Self::build(
            dataset.id(),
            &dataset.sales,
            &dataset.forecast,
            &dataset.segment_summary,
            &dataset.pricing,
            &dataset.production,
        )
    }
}

/// Row with the maximal key; the first such row wins on ties, matching a
/// stable descending sort followed by "take the first row".
fn max_by_first<T, F>(rows: &[T], key: F) -> Option<&T>
where
    F: Fn(&T) -> f64,
{
    let mut best: Option<&T> = None;
    for row in rows {
        match best {
            Some(current) if key(row) <= key(current) => {}
            _ => best = Some(row),
        }
    }
    best
}
