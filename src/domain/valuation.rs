// src/domain/valuation.rs
use crate::domain::property::{AgeBand, Flooring, PropertyRecord};

pub const ROOF_ADJUSTMENT: i64 = 15_000;
pub const WINDOWS_ADJUSTMENT: i64 = 15_000;
pub const HARDWOOD_ADJUSTMENT: i64 = 20_000;
pub const BATHROOM_RATE: f64 = 0.03;
pub const KITCHEN_RATE: f64 = 0.05;
const RANGE_LOWER: f64 = 0.92;
const RANGE_UPPER: f64 = 1.08;

/// The calculator's full breakdown, kept around so the condition step and
/// the exported report can show each adjustment separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Valuation {
    pub base_value: i64,
    pub roof_adjustment: i64,
    pub windows_adjustment: i64,
    pub flooring_adjustment: i64,
    pub bathroom_adjustment: i64,
    pub kitchen_adjustment: i64,
    pub final_value: i64,
    pub lower_range: i64,
    pub upper_range: i64,
}

/// Applies the condition adjustments to the municipal value.
///
/// Fixed adjustments are added to the base; the renovation percentages are
/// computed against the ORIGINAL base, not the fixed-adjusted subtotal.
/// The display range is a fixed ±8% band, not a statistical interval.
/// Never errors: an absent or unparsable municipal value yields a base of 0.
pub fn calculate_valuation(record: &PropertyRecord) -> Valuation {
    let base_value = record.municipal_value_amount();

    let age_adjustment = |band: Option<AgeBand>, magnitude: i64| match band {
        Some(AgeBand::LessThan20) => magnitude,
        Some(AgeBand::MoreThan20) => -magnitude,
        None => 0,
    };

    let roof_adjustment = age_adjustment(record.roof_age, ROOF_ADJUSTMENT);
    let windows_adjustment = age_adjustment(record.windows_age, WINDOWS_ADJUSTMENT);
    let flooring_adjustment = match record.flooring_type {
        Some(Flooring::Hardwood) => HARDWOOD_ADJUSTMENT,
        _ => 0,
    };

    let after_fixed = base_value + roof_adjustment + windows_adjustment + flooring_adjustment;

    let percentage_of_base = |rate: f64| (base_value as f64 * rate).round() as i64;
    let bathroom_adjustment = if record.bathroom_renovated == Some(true) {
        percentage_of_base(BATHROOM_RATE)
    } else {
        0
    };
    let kitchen_adjustment = if record.kitchen_renovated == Some(true) {
        percentage_of_base(KITCHEN_RATE)
    } else {
        0
    };

    let final_value = after_fixed + bathroom_adjustment + kitchen_adjustment;

    Valuation {
        base_value,
        roof_adjustment,
        windows_adjustment,
        flooring_adjustment,
        bathroom_adjustment,
        kitchen_adjustment,
        final_value,
        lower_range: (final_value as f64 * RANGE_LOWER).round() as i64,
        upper_range: (final_value as f64 * RANGE_UPPER).round() as i64,
    }
}
