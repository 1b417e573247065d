//! Closed-form compounding demand projection.
//!
//! This is not a forecasting model: future values come from applying a
//! per-period fraction of the expected growth to a running value, so each
//! step compounds on the previous one rather than on the original base.

use serde::{Deserialize, Serialize};

use marketlens_core::Granularity;
use marketlens_tables::ForecastRecord;

/// One projected observation; periods index from 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub period: usize,
    pub value: f64,
}

/// Ordered projection output; its length always equals the requested
/// period count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSeries {
    points: Vec<ProjectionPoint>,
}

impl ProjectionSeries {
    /// Project a forecast row over the granularity's conventional horizon
    /// (6 monthly, 4 quarterly, 3 yearly periods).
    pub fn for_forecast(record: &ForecastRecord, granularity: Granularity) -> Self {
        project(
            record.forecast_demand,
            record.expected_growth_pct,
            granularity.projection_periods(),
        )
    }

    pub fn points(&self) -> &[ProjectionPoint] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Compound `base_value` by `growth_pct` spread across `periods` steps.
///
/// Emitted values are rounded to two decimals, but the running value
/// carries forward unrounded. Zero periods yields an empty series, not an
/// error; a negative growth percentage yields a decreasing series.
pub fn project(base_value: f64, growth_pct: f64, periods: usize) -> ProjectionSeries {
    let rate = growth_pct / 100.0;
    let mut points = Vec::with_capacity(periods);
    let mut current = base_value;

    for period in 1..=periods {
        current *= 1.0 + rate / periods as f64;
        points.push(ProjectionPoint {
            period,
            value: round2(current),
        });
    }

    ProjectionSeries { points }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketlens_core::TrendLabel;
    use proptest::prelude::*;

    #[test]
    fn compounds_on_the_running_value() {
        // 10% over 2 periods: 5% per step, compounded.
        let series = project(100.0, 10.0, 2);
        assert_eq!(series.values(), vec![105.0, 110.25]);
    }

    #[test]
    fn negative_growth_decreases_each_step() {
        let series = project(100.0, -10.0, 2);
        assert_eq!(series.values(), vec![95.0, 90.25]);
    }

    #[test]
    fn zero_periods_yields_an_empty_series() {
        let series = project(100.0, 25.0, 0);
        assert!(series.is_empty());
    }

    #[test]
    fn zero_base_stays_at_zero() {
        let series = project(0.0, 25.0, 4);
        assert_eq!(series.values(), vec![0.0; 4]);
    }

    #[test]
    fn period_indices_start_at_one() {
        let series = project(50.0, 12.0, 3);
        let periods: Vec<usize> = series.points().iter().map(|p| p.period).collect();
        assert_eq!(periods, vec![1, 2, 3]);
    }

    #[test]
    fn for_forecast_uses_the_granularity_horizon() {
        let record = ForecastRecord {
            product_name: "WHITE METAL LANTERN".to_string(),
            forecast_trend: TrendLabel::Increasing,
            expected_growth_pct: 12.5,
            forecast_demand: 420.0,
        };

        assert_eq!(
            ProjectionSeries::for_forecast(&record, Granularity::Monthly).len(),
            6
        );
        assert_eq!(
            ProjectionSeries::for_forecast(&record, Granularity::Quarterly).len(),
            4
        );
        assert_eq!(
            ProjectionSeries::for_forecast(&record, Granularity::Yearly).len(),
            3
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the series length always equals the requested period
        /// count, whatever the inputs.
        #[test]
        fn length_equals_requested_periods(
            base in 0.0f64..1e6,
            growth in -90.0f64..200.0,
            periods in 0usize..100
        ) {
            prop_assert_eq!(project(base, growth, periods).len(), periods);
        }

        /// Property: zero growth repeats the (rounded) base value.
        #[test]
        fn zero_growth_is_flat(
            base in 0.0f64..1e6,
            periods in 1usize..24
        ) {
            let series = project(base, 0.0, periods);
            let expected = (base * 100.0).round() / 100.0;
            for value in series.values() {
                prop_assert_eq!(value, expected);
            }
        }

        /// Property: positive growth produces a strictly increasing series.
        /// Bounds keep per-step increments well above rounding granularity.
        #[test]
        fn positive_growth_strictly_increases(
            base in 10.0f64..1e3,
            growth in 5.0f64..50.0,
            periods in 1usize..12
        ) {
            let values = project(base, growth, periods).values();
            for pair in values.windows(2) {
                prop_assert!(pair[1] > pair[0]);
            }
        }

        /// Property: negative growth with a positive base produces a
        /// strictly decreasing series.
        #[test]
        fn negative_growth_strictly_decreases(
            base in 100.0f64..1e3,
            growth in -40.0f64..-5.0,
            periods in 1usize..7
        ) {
            let values = project(base, growth, periods).values();
            for pair in values.windows(2) {
                prop_assert!(pair[1] < pair[0]);
            }
        }
    }
}
