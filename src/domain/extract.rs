// src/domain/extract.rs
use crate::domain::units::square_meters_to_feet;
use regex::Regex;
use serde::Serialize;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ExtractError {
    Pattern(String),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Pattern(msg) => write!(f, "Pattern compile error: {msg}"),
        }
    }
}

impl Error for ExtractError {}

/// Assessment fields recognized in a pasted or uploaded text block.
/// Each value is a normalized digit string, ready for the form.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipal_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub land_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_built: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_size: Option<String>,
}

impl ExtractedFields {
    pub fn is_empty(&self) -> bool {
        self.municipal_value.is_none()
            && self.land_value.is_none()
            && self.year_built.is_none()
            && self.lot_size.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    /// Municipal value found; anything else is a bonus.
    Success,
    /// Something found, but not the municipal value.
    Partial,
    /// Nothing recognized.
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    pub fields: ExtractedFields,
    pub status: ExtractionStatus,
}

/// Extracts the municipal assessment fields from unstructured text.
///
/// The contract is "given already-decoded plain text, extract fields":
/// obtaining the text (file upload, PDF text layer) is the caller's
/// problem, and a label that does not appear simply leaves its field
/// unset. The patterns match the wording of the Montreal assessment
/// roll ("Section 4: Valeurs au rôle d'évaluation").
pub struct FieldExtractor {
    municipal_value: Regex,
    land_value: Regex,
    year_built: Regex,
    lot_size: Regex,
}

impl FieldExtractor {
    pub fn new() -> Result<Self, ExtractError> {
        let compile =
            |pattern: &str| Regex::new(pattern).map_err(|e| ExtractError::Pattern(e.to_string()));

        Ok(Self {
            // "Valeur de l'immeuble : 1 022 400 $" (straight or typographic
            // apostrophe) or the roll's "Valeur totale" wording.
            municipal_value: compile(
                r"(?i)(?:Valeur\s+de\s+l['’]immeuble|Valeur\s+totale)[:\s]*\$?\s*([\d][\d\s,]*)",
            )?,
            land_value: compile(r"(?i)Valeur\s+du\s+terrain[:\s]*\$?\s*([\d][\d\s,]*)")?,
            // Exactly four digits.
            year_built: compile(r"(?i)Année\s+de\s+construction[:\s]*(\d{4})\b")?,
            // Number followed by a square-meter marker; converted to sq ft.
            lot_size: compile(
                r"(?i)Superficie(?:\s+du\s+terrain)?[:\s]*([\d][\d\s,]*(?:\.\d+)?)\s*(?:m²|m2)",
            )?,
        })
    }

    /// Pure text → fields transformation. Never fails: unrecognized input
    /// yields empty fields with `ExtractionStatus::Error`.
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let mut fields = ExtractedFields::default();

        if let Some(caps) = self.municipal_value.captures(text) {
            fields.municipal_value = Some(normalize_number(&caps[1]));
        }

        if let Some(caps) = self.land_value.captures(text) {
            fields.land_value = Some(normalize_number(&caps[1]));
        }

        if let Some(caps) = self.year_built.captures(text) {
            fields.year_built = Some(caps[1].to_string());
        }

        if let Some(caps) = self.lot_size.captures(text) {
            // Lot sizes on the roll may carry decimals ("483.1 m²").
            if let Ok(square_meters) = normalize_number(&caps[1]).parse::<f64>() {
                fields.lot_size = Some(square_meters_to_feet(square_meters).to_string());
            }
        }

        let status = if fields.municipal_value.is_some() {
            ExtractionStatus::Success
        } else if !fields.is_empty() {
            ExtractionStatus::Partial
        } else {
            ExtractionStatus::Error
        };

        ExtractionResult { fields, status }
    }
}

/// One normalization rule for every extraction site: spaces and commas are
/// thousands separators and are stripped; the decimal point is the only
/// decimal separator.
fn normalize_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect()
}
