//! Keyword-routed answers over the derived facts.
//!
//! Classification is a single pass over an ordered rule table; the first
//! rule able to produce an answer wins. Entity-specific rules only fire
//! when a product name actually matches inside the question, so later
//! rules stay reachable. Unmatched input always gets the fallback answer,
//! never an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use marketlens_core::TrendLabel;
use marketlens_insight::BusinessContext;
use marketlens_tables::ForecastRecord;

/// Classified intent of one question.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    FutureDemand,
    HistoricalTrend,
    OverallMarket,
    TopGrowth,
    Segments,
    Pricing,
    Production,
    Fallback,
}

/// One routed answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub intent: Intent,
    pub text: String,
}

/// Returned verbatim whenever no rule matches.
pub const FALLBACK_ANSWER: &str = "I can explain historical trends, future demand, pricing, \
     customer segments, and production planning.";

const FUTURE_KEYWORDS: &[&str] = &["after", "future", "next", "3 month", "3 months"];
const HISTORY_KEYWORDS: &[&str] = &["trend", "increasing", "decreasing"];

/// Stateless question router.
///
/// The forecast table is injected read-only at construction (future-tense
/// answers need it); the context snapshot and trend map arrive per call.
/// Each question is classified independently with no memory of prior
/// turns — the transcript lives in the caller-owned [`crate::ChatLog`].
#[derive(Debug, Clone)]
pub struct Router {
    forecast: Vec<ForecastRecord>,
}

struct Query<'a> {
    lowered: String,
    context: &'a BusinessContext,
    trends: &'a BTreeMap<String, TrendLabel>,
    forecast: &'a [ForecastRecord],
}

type Handler = for<'a> fn(&Query<'a>) -> Option<String>;

/// Ordered (intent, handler) pairs; evaluation order is the priority order.
const RULES: &[(Intent, Handler)] = &[
    (Intent::FutureDemand, future_demand),
    (Intent::HistoricalTrend, historical_trend),
    (Intent::OverallMarket, overall_market),
    (Intent::TopGrowth, top_growth),
    (Intent::Segments, segments),
    (Intent::Pricing, pricing),
    (Intent::Production, production),
];

impl Router {
    pub fn new(forecast: Vec<ForecastRecord>) -> Self {
        Self { forecast }
    }

    /// Answer one free-text question from the derived facts.
    pub fn answer(
        &self,
        question: &str,
        context: &BusinessContext,
        trends: &BTreeMap<String, TrendLabel>,
    ) -> Answer {
        let query = Query {
            lowered: question.to_lowercase(),
            context,
            trends,
            forecast: &self.forecast,
        };

        for (intent, handler) in RULES {
            if let Some(text) = handler(&query) {
                debug!(intent = ?intent, "question routed");
                return Answer {
                    intent: *intent,
                    text,
                };
            }
        }

        debug!(intent = ?Intent::Fallback, "question routed");
        Answer {
            intent: Intent::Fallback,
            text: FALLBACK_ANSWER.to_string(),
        }
    }
}

fn future_demand(q: &Query<'_>) -> Option<String> {
    if !contains_any(&q.lowered, FUTURE_KEYWORDS) {
        return None;
    }
    let name = match_entity(&q.lowered, q.forecast.iter().map(|r| r.product_name.as_str()))?;
    let row = q.forecast.iter().find(|r| r.product_name == name)?;

    Some(match row.forecast_trend {
        TrendLabel::Increasing => format!(
            "Yes. **{}** is expected to see an **increase in demand over the next 3 months**, \
             with projected growth of **{}%**.",
            row.product_name,
            fmt_pct(row.expected_growth_pct)
        ),
        TrendLabel::Decreasing => format!(
            "No. **{}** is expected to **decline in demand over the next 3 months**, \
             with projected change of **{}%**.",
            row.product_name,
            fmt_pct(row.expected_growth_pct)
        ),
        _ => format!(
            "Demand for **{}** is expected to remain **stable over the next 3 months**.",
            row.product_name
        ),
    })
}

fn historical_trend(q: &Query<'_>) -> Option<String> {
    if !contains_any(&q.lowered, HISTORY_KEYWORDS) {
        return None;
    }
    let name = match_entity(&q.lowered, q.trends.keys().map(String::as_str))?;
    let label = q.trends.get(name)?;

    Some(format!(
        "The historical demand trend for **{name}** is **{label}**, based on past sales data."
    ))
}

fn overall_market(q: &Query<'_>) -> Option<String> {
    if !(q.lowered.contains("overall") || q.lowered.contains("market")) {
        return None;
    }
    Some(format!(
        "The overall market trend is **{}**.",
        q.context.overall_trend
    ))
}

fn top_growth(q: &Query<'_>) -> Option<String> {
    if !(q.lowered.contains("fastest") || q.lowered.contains("top product")) {
        return None;
    }
    Some(format!(
        "**{}** is the fastest growing product with expected growth of **{}%**.",
        q.context.top_product,
        fmt_pct(q.context.top_growth_pct)
    ))
}

fn segments(q: &Query<'_>) -> Option<String> {
    if !(q.lowered.contains("customer") || q.lowered.contains("segment")) {
        return None;
    }
    Some(format!(
        "The most valuable customer segment is **{}**.",
        q.context.top_segment
    ))
}

fn pricing(q: &Query<'_>) -> Option<String> {
    if !(q.lowered.contains("pricing") || q.lowered.contains("price")) {
        return None;
    }
    Some(format!(
        "There are **{}** highly price-elastic products.",
        q.context.price_sensitive_count
    ))
}

fn production(q: &Query<'_>) -> Option<String> {
    if !(q.lowered.contains("production") || q.lowered.contains("capacity")) {
        return None;
    }
    Some(format!(
        "There are **{}** products constrained by production capacity.",
        q.context.capacity_constrained_count
    ))
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Case-insensitive substring scan for a product name inside the question.
///
/// When several names match, the longest wins, with the lexicographically
/// smallest breaking length ties — deterministic whatever the table's row
/// order happens to be.
fn match_entity<'a, I>(lowered: &str, names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<&'a str> = None;
    for name in names {
        if name.is_empty() || !lowered.contains(&name.to_lowercase()) {
            continue;
        }
        best = match best {
            Some(current)
                if current.len() > name.len()
                    || (current.len() == name.len() && current <= name) =>
            {
                Some(current)
            }
            _ => Some(name),
        };
    }
    best
}

/// Render a growth percentage without a trailing `.0`.
fn fmt_pct(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketlens_core::{DatasetId, MarketTrend};

    fn forecast_row(product: &str, trend: TrendLabel, growth: f64) -> ForecastRecord {
        ForecastRecord {
            product_name: product.to_string(),
            forecast_trend: trend,
            expected_growth_pct: growth,
            forecast_demand: 420.0,
        }
    }

    fn test_context() -> BusinessContext {
        BusinessContext {
            dataset_id: DatasetId::new(),
            overall_trend: MarketTrend::Growing,
            top_product: "LANTERN".to_string(),
            top_growth_pct: 30.0,
            top_segment: "Champions".to_string(),
            price_sensitive_count: 7,
            capacity_constrained_count: 3,
        }
    }

    fn test_trends() -> BTreeMap<String, TrendLabel> {
        let mut trends = BTreeMap::new();
        trends.insert("WHITE METAL LANTERN".to_string(), TrendLabel::Increasing);
        trends.insert("RED WOOLLY HOTTIE".to_string(), TrendLabel::InsufficientData);
        trends
    }

    fn test_router() -> Router {
        Router::new(vec![
            forecast_row("WHITE METAL LANTERN", TrendLabel::Increasing, 12.5),
            forecast_row("RED WOOLLY HOTTIE", TrendLabel::Decreasing, -4.2),
            forecast_row("REGENCY CAKESTAND", TrendLabel::Stable, 0.0),
        ])
    }

    #[test]
    fn future_question_answers_yes_for_increasing_forecast() {
        let answer = test_router().answer(
            "Will WHITE METAL LANTERN increase after 3 months?",
            &test_context(),
            &test_trends(),
        );
        assert_eq!(answer.intent, Intent::FutureDemand);
        assert!(answer.text.starts_with("Yes."));
        assert!(answer.text.contains("12.5%"));
    }

    #[test]
    fn future_question_answers_no_for_decreasing_forecast() {
        let answer = test_router().answer(
            "What happens to RED WOOLLY HOTTIE next quarter?",
            &test_context(),
            &test_trends(),
        );
        assert_eq!(answer.intent, Intent::FutureDemand);
        assert!(answer.text.starts_with("No."));
        assert!(answer.text.contains("-4.2%"));
    }

    #[test]
    fn future_question_reports_stable_otherwise() {
        let answer = test_router().answer(
            "regency cakestand demand in the future?",
            &test_context(),
            &test_trends(),
        );
        assert_eq!(answer.intent, Intent::FutureDemand);
        assert!(answer.text.contains("remain **stable"));
    }

    #[test]
    fn historical_question_embeds_the_trend_label() {
        let answer = test_router().answer(
            "What is the trend for white metal lantern?",
            &test_context(),
            &test_trends(),
        );
        assert_eq!(answer.intent, Intent::HistoricalTrend);
        assert!(answer.text.contains("WHITE METAL LANTERN"));
        assert!(answer.text.contains("Increasing"));
    }

    #[test]
    fn insufficient_history_is_reported_as_such() {
        let answer = test_router().answer(
            "trend for red woolly hottie?",
            &test_context(),
            &test_trends(),
        );
        assert!(answer.text.contains("Insufficient data"));
    }

    #[test]
    fn overall_market_question_embeds_the_direction() {
        let answer =
            test_router().answer("Overall market trend?", &test_context(), &test_trends());
        assert_eq!(answer.intent, Intent::OverallMarket);
        assert!(answer.text.contains("Growing"));
    }

    #[test]
    fn trend_keyword_without_entity_falls_through_to_market_rule() {
        // "trend" alone must not capture the question when no product name
        // matches; the overall-market rule answers instead.
        let answer =
            test_router().answer("market trend please", &test_context(), &test_trends());
        assert_eq!(answer.intent, Intent::OverallMarket);
    }

    #[test]
    fn fastest_growing_question_embeds_product_and_pct() {
        let answer = test_router().answer(
            "Which is the fastest growing product?",
            &test_context(),
            &test_trends(),
        );
        assert_eq!(answer.intent, Intent::TopGrowth);
        assert!(answer.text.contains("LANTERN"));
        assert!(answer.text.contains("30%"));
    }

    #[test]
    fn segment_question_embeds_top_segment() {
        let answer = test_router().answer(
            "most valuable customer segment?",
            &test_context(),
            &test_trends(),
        );
        assert_eq!(answer.intent, Intent::Segments);
        assert!(answer.text.contains("Champions"));
    }

    #[test]
    fn pricing_question_embeds_the_count() {
        let answer =
            test_router().answer("pricing recommendation?", &test_context(), &test_trends());
        assert_eq!(answer.intent, Intent::Pricing);
        assert!(answer.text.contains("7"));
    }

    #[test]
    fn production_question_embeds_the_count() {
        let answer = test_router().answer(
            "any capacity problems in production?",
            &test_context(),
            &test_trends(),
        );
        assert_eq!(answer.intent, Intent::Production);
        assert!(answer.text.contains("3"));
    }

    #[test]
    fn unmatched_question_returns_the_fallback_verbatim_every_time() {
        let router = test_router();
        for question in ["hello there", "what is the weather?", ""] {
            let answer = router.answer(question, &test_context(), &test_trends());
            assert_eq!(answer.intent, Intent::Fallback);
            assert_eq!(answer.text, FALLBACK_ANSWER);
        }
    }

    #[test]
    fn earlier_rules_win_over_later_ones() {
        // Mentions both the market and customers; the market rule comes
        // first in the table.
        let answer = test_router().answer(
            "overall market vs customer segments?",
            &test_context(),
            &test_trends(),
        );
        assert_eq!(answer.intent, Intent::OverallMarket);
    }

    #[test]
    fn entity_tie_break_prefers_the_longest_match() {
        let router = Router::new(vec![
            forecast_row("LANTERN", TrendLabel::Stable, 0.0),
            forecast_row("WHITE METAL LANTERN", TrendLabel::Increasing, 12.5),
        ]);
        let answer = router.answer(
            "Will WHITE METAL LANTERN grow after 3 months?",
            &test_context(),
            &test_trends(),
        );
        // Both names substring-match; the longer one is chosen.
        assert!(answer.text.contains("**WHITE METAL LANTERN**"));
        assert!(answer.text.starts_with("Yes."));
    }

    #[test]
    fn whole_percentages_render_without_decimals() {
        assert_eq!(fmt_pct(30.0), "30");
        assert_eq!(fmt_pct(12.5), "12.5");
        assert_eq!(fmt_pct(-4.2), "-4.2");
    }
}
