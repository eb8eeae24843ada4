pub mod comparables;
pub mod extract;
pub mod metrics;
pub mod property;
pub mod units;
pub mod validate;
pub mod valuation;
