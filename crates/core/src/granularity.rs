//! Reporting granularity shared by bucketing and projections.

use serde::{Deserialize, Serialize};

/// Calendar granularity selected by the presentation layer.
///
/// It controls the bucket width for historical series and supplies the
/// default horizon for future projections. The projector itself accepts any
/// period count; this mapping is only the conventional one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    Monthly,
    Quarterly,
    Yearly,
}

impl Granularity {
    /// Default projection horizon for this granularity.
    pub fn projection_periods(&self) -> usize {
        match self {
            Granularity::Monthly => 6,
            Granularity::Quarterly => 4,
            Granularity::Yearly => 3,
        }
    }

    /// Axis label for one projected period.
    pub fn period_label(&self) -> &'static str {
        match self {
            Granularity::Monthly => "Month",
            Granularity::Quarterly => "Quarter",
            Granularity::Yearly => "Year",
        }
    }
}

impl core::fmt::Display for Granularity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Granularity::Monthly => "Monthly",
            Granularity::Quarterly => "Quarterly",
            Granularity::Yearly => "Yearly",
        };
        f.write_str(s)
    }
}
