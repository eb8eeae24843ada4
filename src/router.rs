use crate::domain::comparables::generate_comparables;
use crate::domain::extract::FieldExtractor;
use crate::domain::metrics::market_metrics;
use crate::domain::property::{PropertyRecord, DEFAULT_BATHROOMS, DEFAULT_BEDROOMS};
use crate::domain::validate::{is_property_data_valid, validate_property_data, PropertyValidation};
use crate::domain::valuation::calculate_valuation;
use crate::errors::{ResultResp, ServerError};
use crate::geos::GeoClient;
use crate::responses::{html_response, json_response};
use crate::spreadsheets::export_valuation_xlsx;
use crate::templates;
use crate::templates::pages::EstimateVm;
use crate::wizard::{parse_wizard_form, Action, Step};
use astra::{Body, Request};
use chrono::{Datelike, Utc};
use rand::thread_rng;
use serde_json::json;
use std::collections::HashMap;
use std::io::Read;

pub fn handle(req: Request, extractor: &FieldExtractor) -> ResultResp {
    let (parts, body) = req.into_parts();
    let method = parts.method.as_str();
    let path = parts.uri.path();
    let query = parts.uri.query().unwrap_or("");

    match (method, path) {
        ("GET", "/") => html_response(templates::pages::home_page()),

        ("GET", "/estimate") => {
            let record = PropertyRecord::default();
            render_wizard(&record, Step::Address, None, None, "")
        }

        ("POST", "/estimate") => {
            let params = parse_form(body)?;
            wizard_post(&params, extractor)
        }

        ("POST", "/api/extract") => {
            let params = parse_form(body)?;
            api_extract(&params, extractor)
        }

        ("GET", "/api/geocode") => {
            let params = parse_query(query);
            api_geocode(&params)
        }

        ("GET", "/api/autocomplete") => {
            let params = parse_query(query);
            api_autocomplete(&params)
        }

        ("POST", "/export") => {
            let params = parse_form(body)?;
            export_report(&params)
        }

        _ => Err(ServerError::NotFound),
    }
}

/// One POST drives the whole wizard: the form carries the record, the
/// current step, and the action.
fn wizard_post(params: &HashMap<String, String>, extractor: &FieldExtractor) -> ResultResp {
    let (mut record, step, action, pasted_text) = parse_wizard_form(params);
    let current_year = Utc::now().year();

    match action {
        Action::Back => render_wizard(&record, step.back(), None, None, ""),

        Action::Extract => {
            let extraction = extractor.extract(&pasted_text);
            let fields = &extraction.fields;
            if let Some(value) = &fields.municipal_value {
                record.municipal_value = value.clone();
            }
            if let Some(value) = &fields.land_value {
                record.land_value = value.clone();
            }
            if let Some(value) = &fields.lot_size {
                record.lot_size = value.clone();
            }
            if let Some(value) = &fields.year_built {
                record.year_built = value.clone();
            }
            render_wizard(&record, Step::Assessment, None, Some(&extraction), &pasted_text)
        }

        Action::Next => {
            // Advancing past the assessment is gated on a valid record; the
            // validator's messages come back to the same step.
            if step == Step::Assessment && !is_property_data_valid(&record, current_year) {
                let validation = validate_property_data(&record, current_year);
                return render_wizard(&record, Step::Assessment, Some(&validation), None, "");
            }
            render_wizard(&record, step.next(), None, None, "")
        }
    }
}

/// Renders the wizard at `step`, computing whatever that step displays.
fn render_wizard(
    record: &PropertyRecord,
    step: Step,
    validation: Option<&PropertyValidation>,
    extraction: Option<&crate::domain::extract::ExtractionResult>,
    pasted_text: &str,
) -> ResultResp {
    // The later steps recompute everything from the record on every render;
    // nothing is carried between requests.
    let valuation = match step {
        Step::Condition | Step::Market | Step::Results => Some(calculate_valuation(record)),
        _ => None,
    };

    let comparables = match (step, valuation) {
        (Step::Market | Step::Results, Some(valuation)) => generate_comparables(
            &mut thread_rng(),
            Utc::now().date_naive(),
            &record.address,
            valuation.final_value,
            DEFAULT_BEDROOMS,
            DEFAULT_BATHROOMS,
        ),
        _ => Vec::new(),
    };

    let metrics = valuation.and_then(|v| market_metrics(&comparables, v.final_value));

    let vm = EstimateVm {
        record,
        step,
        validation,
        extraction,
        pasted_text,
        valuation,
        comparables,
        metrics,
    };

    html_response(templates::pages::estimate_page(&vm))
}

/// The JSON boundary the upload flow calls once the document text has been
/// decoded client-side.
fn api_extract(params: &HashMap<String, String>, extractor: &FieldExtractor) -> ResultResp {
    let text = params
        .get("text")
        .ok_or_else(|| ServerError::ExtractionFailed("no text provided".to_string()))?;

    let result = extractor.extract(text);

    json_response(&json!({
        "success": true,
        "status": result.status,
        "data": result.fields,
    }))
}

fn api_geocode(params: &HashMap<String, String>) -> ResultResp {
    let address = params
        .get("address")
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| ServerError::BadRequest("address query parameter required".to_string()))?;

    let client = GeoClient::from_env().map_err(|e| ServerError::GeoError(e.to_string()))?;
    let point = client
        .geocode(address)
        .map_err(|e| ServerError::GeoError(e.to_string()))?;

    json_response(&point)
}

fn api_autocomplete(params: &HashMap<String, String>) -> ResultResp {
    let input = params
        .get("input")
        .filter(|i| !i.trim().is_empty())
        .ok_or_else(|| ServerError::BadRequest("input query parameter required".to_string()))?;

    let client = GeoClient::from_env().map_err(|e| ServerError::GeoError(e.to_string()))?;
    let suggestions = client
        .autocomplete(input)
        .map_err(|e| ServerError::GeoError(e.to_string()))?;

    json_response(&suggestions)
}

fn export_report(params: &HashMap<String, String>) -> ResultResp {
    let (record, _, _, _) = parse_wizard_form(params);
    let current_year = Utc::now().year();

    if !is_property_data_valid(&record, current_year) {
        return Err(ServerError::BadRequest(
            "a valid municipal value is required before exporting".to_string(),
        ));
    }

    let valuation = calculate_valuation(&record);
    let comparables = generate_comparables(
        &mut thread_rng(),
        Utc::now().date_naive(),
        &record.address,
        valuation.final_value,
        DEFAULT_BEDROOMS,
        DEFAULT_BATHROOMS,
    );
    let metrics = market_metrics(&comparables, valuation.final_value);

    export_valuation_xlsx(&record, &valuation, &comparables, metrics.as_ref())
}

/// Decode an application/x-www-form-urlencoded body.
fn parse_form(mut body: Body) -> Result<HashMap<String, String>, ServerError> {
    let mut buf = Vec::new();
    body.reader()
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("could not read body: {e}")))?;

    // Reject bodies that are not valid UTF-8 once decoded; for the extract
    // routes this is the "source text cannot be obtained at all" failure.
    if std::str::from_utf8(&buf).is_err() {
        return Err(ServerError::BadRequest("body is not valid UTF-8".to_string()));
    }

    Ok(url::form_urlencoded::parse(&buf).into_owned().collect())
}

fn parse_query(query: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}
