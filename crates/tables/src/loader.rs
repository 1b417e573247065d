//! CSV loading for the seven input tables.

use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use marketlens_core::DatasetId;

use crate::error::LoadError;
use crate::records::{
    ForecastRecord, PricingRecord, PricingScenarioRecord, ProductionRecord, SalesRecord,
    SegmentRecord, SegmentSummaryRecord,
};

const SALES_FILE: &str = "master_sales_data.csv";
const FORECAST_FILE: &str = "forecast_results.csv";
const SEGMENTS_FILE: &str = "customer_segments.csv";
const SEGMENT_SUMMARY_FILE: &str = "customer_segment_summary.csv";
const PRICING_FILE: &str = "pricing_recommendation.csv";
const PRODUCTION_FILE: &str = "production_plan.csv";
const PRICING_SIM_FILE: &str = "pricing_simulation.csv";

const SALES_COLUMNS: &[&str] = &[
    "product_name",
    "invoice_date",
    "quantity",
    "revenue",
    "customer_id",
];
const FORECAST_COLUMNS: &[&str] = &[
    "product_name",
    "forecast_trend",
    "expected_growth_pct",
    "forecast_demand",
];
const SEGMENT_COLUMNS: &[&str] = &["customer_id", "segment_label"];
const SEGMENT_SUMMARY_COLUMNS: &[&str] = &["segment_label", "Avg_Monetary", "Customers"];
const PRICING_COLUMNS: &[&str] = &["product_name", "pricing_recommendation"];
const PRODUCTION_COLUMNS: &[&str] = &[
    "product_name",
    "production_action",
    "final_production_qty",
];
const PRICING_SIM_COLUMNS: &[&str] = &[
    "product_name",
    "price_change_pct",
    "projected_revenue",
];

/// One load of the seven input tables.
///
/// A fresh `DatasetId` is minted per load so downstream snapshots can record
/// which load they were derived from. The dataset is immutable after
/// loading; re-deriving anything requires a new load.
#[derive(Debug, Clone)]
pub struct Dataset {
    id: DatasetId,
    pub sales: Vec<SalesRecord>,
    pub forecast: Vec<ForecastRecord>,
    pub segments: Vec<SegmentRecord>,
    pub segment_summary: Vec<SegmentSummaryRecord>,
    pub pricing: Vec<PricingRecord>,
    pub production: Vec<ProductionRecord>,
    pub pricing_simulation: Vec<PricingScenarioRecord>,
}

impl Dataset {
    /// Load all seven tables from their conventional file names in `dir`.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        let dataset = Self {
            id: DatasetId::new(),
            sales: read_table(&dir.join(SALES_FILE), "sales", SALES_COLUMNS)?,
            forecast: read_table(&dir.join(FORECAST_FILE), "forecast", FORECAST_COLUMNS)?,
            segments: read_table(&dir.join(SEGMENTS_FILE), "segments", SEGMENT_COLUMNS)?,
            segment_summary: read_table(
                &dir.join(SEGMENT_SUMMARY_FILE),
                "segment_summary",
                SEGMENT_SUMMARY_COLUMNS,
            )?,
            pricing: read_table(&dir.join(PRICING_FILE), "pricing", PRICING_COLUMNS)?,
            production: read_table(&dir.join(PRODUCTION_FILE), "production", PRODUCTION_COLUMNS)?,
            pricing_simulation: read_table(
                &dir.join(PRICING_SIM_FILE),
                "pricing_simulation",
                PRICING_SIM_COLUMNS,
            )?,
        };
        debug!(
            dataset_id = %dataset.id,
            sales_rows = dataset.sales.len(),
            forecast_rows = dataset.forecast.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Assemble a dataset from already-typed rows (tests, non-CSV callers).
    #[allow(clippy::too_many_arguments)]
    pub fn from_rows(
        sales: Vec<SalesRecord>,
        forecast: Vec<ForecastRecord>,
        segments: Vec<SegmentRecord>,
        segment_summary: Vec<SegmentSummaryRecord>,
        pricing: Vec<PricingRecord>,
        production: Vec<ProductionRecord>,
        pricing_simulation: Vec<PricingScenarioRecord>,
    ) -> Self {
        Self {
            id: DatasetId::new(),
            sales,
            forecast,
            segments,
            segment_summary,
            pricing,
            production,
            pricing_simulation,
        }
    }

    pub fn id(&self) -> DatasetId {
        self.id
    }

    /// Total revenue across all sales rows (KPI header).
    pub fn total_revenue(&self) -> f64 {
        self.sales.iter().map(|r| r.revenue).sum()
    }

    /// Number of distinct products in the sales table.
    pub fn product_count(&self) -> usize {
        self.sales
            .iter()
            .map(|r| r.product_name.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Number of distinct customers in the sales table.
    pub fn customer_count(&self) -> usize {
        self.sales
            .iter()
            .map(|r| r.customer_id.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Number of products covered by the forecast table.
    pub fn forecasted_product_count(&self) -> usize {
        self.forecast.len()
    }

    /// What-if scenario rows for one product.
    pub fn scenarios_for(&self, product_name: &str) -> Vec<&PricingScenarioRecord> {
        self.pricing_simulation
            .iter()
            .filter(|r| r.product_name == product_name)
            .collect()
    }
}

fn read_table<T: DeserializeOwned>(
    path: &Path,
    table: &str,
    required: &[&str],
) -> Result<Vec<T>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Parse {
            table: table.to_string(),
            source,
        })?
        .clone();
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(LoadError::missing_column(table, *column));
        }
    }

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.map_err(|source| LoadError::Parse {
            table: table.to_string(),
            source,
        })?);
    }
    Ok(rows)
}
