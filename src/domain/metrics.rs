// src/domain/metrics.rs
use crate::domain::comparables::{ComparableProperty, ListingStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketTrend {
    Hot,
    Stable,
    Cool,
}

impl MarketTrend {
    pub fn label(self) -> &'static str {
        match self {
            MarketTrend::Hot => "Hot",
            MarketTrend::Stable => "Stable",
            MarketTrend::Cool => "Cool",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn label(self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
        }
    }
}

/// Rule-of-thumb aggregate of the comparables relative to the estimate.
/// The trend and confidence labels are bucketed heuristics, not statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketMetrics {
    pub avg_price: i64,
    pub avg_price_per_sqft: i64,
    pub market_trend: MarketTrend,
    pub confidence: Confidence,
}

/// Summarizes a comparable list against the calculated estimate.
///
/// Returns `None` on an empty list; there is no meaningful average of
/// nothing, and callers render an explicit "insufficient data" state.
pub fn market_metrics(
    comparables: &[ComparableProperty],
    estimated_value: i64,
) -> Option<MarketMetrics> {
    if comparables.is_empty() {
        return None;
    }
    let count = comparables.len() as f64;

    let avg_price =
        (comparables.iter().map(|c| c.price as f64).sum::<f64>() / count).round() as i64;

    // Mean of the per-property price/sqft ratios, NOT avg_price divided by
    // the mean square footage; the two differ numerically.
    let avg_price_per_sqft = (comparables
        .iter()
        .map(|c| c.price as f64 / c.square_feet as f64)
        .sum::<f64>()
        / count)
        .round() as i64;

    let listed_days: Vec<u32> = comparables
        .iter()
        .filter_map(|c| match c.status {
            ListingStatus::Listed { days_on_market } => Some(days_on_market),
            ListingStatus::Sold { .. } => None,
        })
        .collect();
    let listed_count = listed_days.len();
    let avg_days_on_market = if listed_count > 0 {
        listed_days.iter().map(|&d| d as f64).sum::<f64>() / listed_count as f64
    } else {
        0.0
    };

    let market_trend = if avg_days_on_market < 20.0 && listed_count <= 1 {
        MarketTrend::Hot
    } else if avg_days_on_market > 40.0 || listed_count >= 3 {
        MarketTrend::Cool
    } else {
        MarketTrend::Stable
    };

    // A zero average price only happens with a zero estimate, which the
    // wizard gates out; bucket it as Low rather than dividing by zero.
    let confidence = if avg_price == 0 {
        Confidence::Low
    } else {
        let difference = (estimated_value - avg_price).abs() as f64 / avg_price as f64;
        if difference < 0.05 {
            Confidence::High
        } else if difference < 0.10 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    };

    Some(MarketMetrics {
        avg_price,
        avg_price_per_sqft,
        market_trend,
        confidence,
    })
}
