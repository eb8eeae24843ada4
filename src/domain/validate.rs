// src/domain/validate.rs
use crate::domain::property::PropertyRecord;

pub const MIN_MUNICIPAL_VALUE: i64 = 100_000;
pub const MAX_MUNICIPAL_VALUE: i64 = 10_000_000;
pub const MIN_LOT_SIZE: i64 = 100;
pub const MAX_LOT_SIZE: i64 = 50_000;
pub const MIN_YEAR_BUILT: i32 = 1800;

/// Per-field validation messages; `None` means the field passes.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PropertyValidation {
    pub municipal_value: Option<String>,
    pub land_value: Option<String>,
    pub lot_size: Option<String>,
    pub year_built: Option<String>,
}

impl PropertyValidation {
    pub fn has_errors(&self) -> bool {
        self.municipal_value.is_some()
            || self.land_value.is_some()
            || self.lot_size.is_some()
            || self.year_built.is_some()
    }
}

pub fn validate_municipal_value(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return Some("Property value is required".to_string());
    }

    let amount: i64 = match value.parse() {
        Ok(n) => n,
        Err(_) => return Some("Property value must be a number".to_string()),
    };

    if amount < MIN_MUNICIPAL_VALUE {
        return Some("Property value must be at least $100,000".to_string());
    }

    if amount > MAX_MUNICIPAL_VALUE {
        return Some("Property value cannot exceed $10,000,000".to_string());
    }

    None
}

pub fn validate_lot_size(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None; // Optional field
    }

    let size: i64 = match value.parse() {
        Ok(n) => n,
        Err(_) => return Some("Lot size must be a number".to_string()),
    };

    if size < MIN_LOT_SIZE {
        return Some("Lot size must be at least 100 sq ft".to_string());
    }

    if size > MAX_LOT_SIZE {
        return Some("Lot size cannot exceed 50,000 sq ft".to_string());
    }

    None
}

/// `current_year` is supplied by the caller at validation time, so the
/// bound moves with the calendar rather than the build.
pub fn validate_year_built(value: &str, current_year: i32) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None; // Optional field
    }

    let year: i32 = match value.parse() {
        Ok(n) => n,
        Err(_) => return Some("Year must be a number".to_string()),
    };

    if year < MIN_YEAR_BUILT {
        return Some("Year built cannot be before 1800".to_string());
    }

    if year > current_year {
        return Some(format!("Year built cannot be after {current_year}"));
    }

    None
}

pub fn validate_property_data(record: &PropertyRecord, current_year: i32) -> PropertyValidation {
    PropertyValidation {
        municipal_value: validate_municipal_value(&record.municipal_value),
        land_value: None, // Never validated
        lot_size: validate_lot_size(&record.lot_size),
        year_built: validate_year_built(&record.year_built, current_year),
    }
}

/// Whether the record is ready for a valuation.
///
/// An empty municipal value contributes no error message (nothing typed
/// yet, nothing to complain about) but still gates the record as invalid.
pub fn is_property_data_valid(record: &PropertyRecord, current_year: i32) -> bool {
    if record.municipal_value.trim().is_empty() {
        return false;
    }

    !validate_property_data(record, current_year).has_errors()
}
