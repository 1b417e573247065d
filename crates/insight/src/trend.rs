//! Historical trend classification over bucketed sales series.
//!
//! Raw transaction rows are grouped into fixed-width calendar buckets
//! (period-end keyed), quantities summed per bucket, and the resulting
//! series classified by the sign of an ordinary-least-squares slope fitted
//! against the integer period index.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use marketlens_core::{Granularity, TrendLabel};
use marketlens_tables::SalesRecord;

/// One bucketed observation: calendar period end plus summed quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub period_end: NaiveDate,
    pub quantity: f64,
}

/// Group sales rows into calendar buckets and sum quantities per bucket.
///
/// Output is chronological ascending. Periods with no rows are simply
/// absent; they are not zero-filled.
pub fn bucket_series<'a, I>(rows: I, granularity: Granularity) -> Vec<TimePoint>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for row in rows {
        let key = bucket_end(row.invoice_date.date_naive(), granularity);
        *buckets.entry(key).or_insert(0.0) += row.quantity as f64;
    }
    buckets
        .into_iter()
        .map(|(period_end, quantity)| TimePoint {
            period_end,
            quantity,
        })
        .collect()
}

/// Classify one bucketed series.
///
/// Fewer than three buckets is `InsufficientData`. Otherwise the label is
/// the sign of the least-squares slope; zero slope is `Stable` with no
/// epsilon tolerance, which keeps the rule exactly reproducible.
pub fn classify(series: &[TimePoint]) -> TrendLabel {
    if series.len() < 3 {
        return TrendLabel::InsufficientData;
    }

    let quantities: Vec<f64> = series.iter().map(|p| p.quantity).collect();
    let slope = ols_slope(&quantities);

    if slope > 0.0 {
        TrendLabel::Increasing
    } else if slope < 0.0 {
        TrendLabel::Decreasing
    } else {
        TrendLabel::Stable
    }
}

/// Classify every product present in the sales table independently.
///
/// Products with no rows never appear in the map. A degenerate series for
/// one product labels that product alone; it cannot abort the others. The
/// returned map iterates in sorted name order, so downstream scans are
/// deterministic.
pub fn product_trends(
    sales: &[SalesRecord],
    granularity: Granularity,
) -> BTreeMap<String, TrendLabel> {
    let mut by_product: BTreeMap<&str, Vec<&SalesRecord>> = BTreeMap::new();
    for row in sales {
        by_product
            .entry(row.product_name.as_str())
            .or_default()
            .push(row);
    }

    let trends: BTreeMap<String, TrendLabel> = by_product
        .into_iter()
        .map(|(name, rows)| {
            let series = bucket_series(rows, granularity);
            (name.to_string(), classify(&series))
        })
        .collect();

    debug!(products = trends.len(), %granularity, "classified product trends");
    trends
}

/// Slope of the least-squares line through `(0, y0), (1, y1), ...`.
///
/// Series shorter than two points have no fitted line; the slope reads as
/// zero rather than dividing by a zero denominator.
pub fn ols_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let n_f = n as f64;
    let sum_x: f64 = (0..n).map(|x| x as f64).sum();
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values.iter().enumerate().map(|(x, y)| x as f64 * y).sum();
    let sum_xx: f64 = (0..n).map(|x| (x * x) as f64).sum();

    (n_f * sum_xy - sum_x * sum_y) / (n_f * sum_xx - sum_x * sum_x)
}

/// Last day of the calendar bucket containing `date`.
fn bucket_end(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Monthly => month_end(date.year(), date.month()),
        Granularity::Quarterly => {
            let quarter_last_month = ((date.month() - 1) / 3) * 3 + 3;
            month_end(date.year(), quarter_last_month)
        }
        Granularity::Yearly => month_end(date.year(), 12),
    }
}

fn month_end(year: i32, month: u32) -> NaiveDate {
    // `month` is always 1..=12 here, so the fallback is never taken.
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN);
    first + Months::new(1) - Days::new(1)
}
