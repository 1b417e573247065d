//! Typed rows for the seven input tables.
//!
//! Column names mirror the upstream pipeline's CSV headers exactly; renames
//! are declared where the files use a different casing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use marketlens_core::TrendLabel;

/// One raw sales transaction line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub product_name: String,
    #[serde(deserialize_with = "de_invoice_date")]
    pub invoice_date: DateTime<Utc>,
    pub quantity: i64,
    pub revenue: f64,
    pub customer_id: String,
}

/// One forecast row per product; `product_name` is the join key shared with
/// the historical trend lookup and the future projector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub product_name: String,
    #[serde(deserialize_with = "de_trend_label")]
    pub forecast_trend: TrendLabel,
    pub expected_growth_pct: f64,
    pub forecast_demand: f64,
}

/// Customer-to-segment assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub customer_id: String,
    pub segment_label: String,
}

/// Per-segment rollup produced by the segmentation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSummaryRecord {
    pub segment_label: String,
    #[serde(rename = "Avg_Monetary")]
    pub avg_monetary: f64,
    #[serde(rename = "Customers")]
    pub customers: u64,
}

/// Pricing recommendation text per product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRecord {
    pub product_name: String,
    pub pricing_recommendation: String,
}

/// Production planning row per product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub product_name: String,
    pub production_action: String,
    pub final_production_qty: f64,
}

/// One what-if pricing scenario row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingScenarioRecord {
    pub product_name: String,
    pub price_change_pct: f64,
    pub projected_revenue: f64,
}

/// Invoice dates come both with and without a time-of-day component.
fn de_invoice_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.and_utc());
    }
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map(|d| d.and_time(chrono::NaiveTime::default()).and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid invoice_date `{raw}`: {e}")))
}

/// Forecast trend arrives as free text; unknown values read as `Stable`.
fn de_trend_label<'de, D>(deserializer: D) -> Result<TrendLabel, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    // FromStr is infallible for TrendLabel.
    Ok(raw.parse().unwrap_or(TrendLabel::Stable))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn de_sales(csv_text: &str) -> SalesRecord {
        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        reader
            .deserialize()
            .next()
            .expect("one row")
            .expect("row parses")
    }

    #[test]
    fn invoice_date_parses_with_time_component() {
        let row = de_sales(
            "product_name,invoice_date,quantity,revenue,customer_id\n\
             WHITE METAL LANTERN,2010-12-01 08:26:00,6,20.34,17850\n",
        );
        assert_eq!(row.invoice_date.hour(), 8);
        assert_eq!(row.quantity, 6);
    }

    #[test]
    fn invoice_date_parses_bare_date() {
        let row = de_sales(
            "product_name,invoice_date,quantity,revenue,customer_id\n\
             WHITE METAL LANTERN,2010-12-01,6,20.34,17850\n",
        );
        assert_eq!(row.invoice_date.hour(), 0);
    }

    #[test]
    fn forecast_trend_text_maps_onto_label() {
        let csv_text = "product_name,forecast_trend,expected_growth_pct,forecast_demand\n\
                        LANTERN,Increasing,12.5,420.0\n\
                        REGENCY CAKESTAND,Sideways,0.0,100.0\n";
        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let rows: Vec<ForecastRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows[0].forecast_trend, TrendLabel::Increasing);
        assert_eq!(rows[1].forecast_trend, TrendLabel::Stable);
    }
}
