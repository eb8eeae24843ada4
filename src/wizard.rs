// src/wizard.rs
//
// The estimate flow is a five-step form. Nothing is stored server-side:
// every POST carries the whole record in form fields, and this module is
// the state machine plus the form <-> record codec.

use crate::domain::property::{parse_yes_no, AgeBand, Flooring, PropertyRecord};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Address,
    Assessment,
    Condition,
    Market,
    Results,
}

impl Step {
    pub fn as_param(self) -> &'static str {
        match self {
            Step::Address => "address",
            Step::Assessment => "assessment",
            Step::Condition => "condition",
            Step::Market => "market",
            Step::Results => "results",
        }
    }

    /// Unknown or missing step parameters restart the wizard at the top.
    pub fn from_param(value: &str) -> Self {
        match value {
            "assessment" => Step::Assessment,
            "condition" => Step::Condition,
            "market" => Step::Market,
            "results" => Step::Results,
            _ => Step::Address,
        }
    }

    /// Forward transition, clamped at the last step.
    pub fn next(self) -> Self {
        match self {
            Step::Address => Step::Assessment,
            Step::Assessment => Step::Condition,
            Step::Condition => Step::Market,
            Step::Market | Step::Results => Step::Results,
        }
    }

    /// Backward transition, clamped at the first step.
    pub fn back(self) -> Self {
        match self {
            Step::Address | Step::Assessment => Step::Address,
            Step::Condition => Step::Assessment,
            Step::Market => Step::Condition,
            Step::Results => Step::Market,
        }
    }

    pub fn number(self) -> usize {
        match self {
            Step::Address => 1,
            Step::Assessment => 2,
            Step::Condition => 3,
            Step::Market => 4,
            Step::Results => 5,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Address => "Property Address",
            Step::Assessment => "Municipal Assessment",
            Step::Condition => "Property Condition",
            Step::Market => "Market Comparables",
            Step::Results => "Your Estimate",
        }
    }

    pub const ALL: [Step; 5] = [
        Step::Address,
        Step::Assessment,
        Step::Condition,
        Step::Market,
        Step::Results,
    ];
}

/// What the wizard form POSTs besides the record itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Next,
    Back,
    /// Run the field extractor over the pasted assessment text.
    Extract,
}

impl Action {
    pub fn from_param(value: &str) -> Self {
        match value {
            "back" => Action::Back,
            "extract" => Action::Extract,
            _ => Action::Next,
        }
    }
}

/// Decodes a posted form into the record, the current step, the action,
/// and the pasted assessment text (used only by the extract action).
pub fn parse_wizard_form(params: &HashMap<String, String>) -> (PropertyRecord, Step, Action, String) {
    let field = |name: &str| params.get(name).map(String::as_str).unwrap_or("").to_string();

    let record = PropertyRecord {
        address: field("address"),
        municipal_value: field("municipal_value"),
        land_value: field("land_value"),
        lot_size: field("lot_size"),
        year_built: field("year_built"),
        roof_age: params.get("roof_age").and_then(|v| AgeBand::from_param(v)),
        windows_age: params.get("windows_age").and_then(|v| AgeBand::from_param(v)),
        flooring_type: params
            .get("flooring_type")
            .and_then(|v| Flooring::from_param(v)),
        bathroom_renovated: params.get("bathroom_renovated").and_then(|v| parse_yes_no(v)),
        kitchen_renovated: params.get("kitchen_renovated").and_then(|v| parse_yes_no(v)),
    };

    let step = Step::from_param(params.get("step").map(String::as_str).unwrap_or(""));
    let action = Action::from_param(params.get("action").map(String::as_str).unwrap_or(""));
    let pasted_text = field("pasted_text");

    (record, step, action, pasted_text)
}
