use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, post_form, test_extractor};

#[test]
fn extract_api_returns_the_parsed_fields() {
    let extractor = test_extractor();

    let resp = handle(
        post_form("/api/extract", "text=Valeur+totale%3A+525%2C000"),
        &extractor,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "application/json"
    );

    let body = body_string(resp);
    assert!(body.contains("\"status\":\"success\""));
    assert!(body.contains("\"municipalValue\":\"525000\""));
}

#[test]
fn extract_api_reports_partial_and_error_statuses() {
    let extractor = test_extractor();

    let resp = handle(
        post_form("/api/extract", "text=Valeur+du+terrain+%3A+402+900+%24"),
        &extractor,
    )
    .unwrap();
    let body = body_string(resp);
    assert!(body.contains("\"status\":\"partial\""));
    assert!(body.contains("\"landValue\":\"402900\""));

    let resp = handle(
        post_form("/api/extract", "text=nothing+to+see"),
        &extractor,
    )
    .unwrap();
    let body = body_string(resp);
    assert!(body.contains("\"status\":\"error\""));
}

#[test]
fn extract_api_without_text_is_the_generic_failure() {
    let extractor = test_extractor();

    let result = handle(post_form("/api/extract", "nope=1"), &extractor);
    assert!(matches!(result, Err(ServerError::ExtractionFailed(_))));
}

#[test]
fn geocode_requires_an_address() {
    let extractor = test_extractor();

    let result = handle(get("/api/geocode"), &extractor);
    assert!(matches!(result, Err(ServerError::BadRequest(_))));
}

#[test]
fn autocomplete_requires_an_input() {
    let extractor = test_extractor();

    let result = handle(get("/api/autocomplete?input=++"), &extractor);
    assert!(matches!(result, Err(ServerError::BadRequest(_))));
}

#[test]
fn unknown_routes_are_not_found() {
    let extractor = test_extractor();

    let result = handle(get("/definitely-not-a-page"), &extractor);
    assert!(matches!(result, Err(ServerError::NotFound)));
}
