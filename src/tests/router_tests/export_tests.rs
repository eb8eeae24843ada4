use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{post_form, test_extractor};
use std::io::Read;

#[test]
fn export_streams_an_xlsx_attachment() {
    let extractor = test_extractor();

    let resp = handle(
        post_form(
            "/export",
            "address=500+Rue+Test%2C+Montreal&municipal_value=450000&roof_age=less20",
        ),
        &extractor,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        resp.headers().get("Content-Disposition").unwrap(),
        "attachment; filename=\"valuation_report.xlsx\""
    );

    // XLSX files are zip archives; check the magic bytes.
    let mut bytes = Vec::new();
    resp.into_body().reader().read_to_end(&mut bytes).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn export_rejects_an_invalid_record() {
    let extractor = test_extractor();

    let result = handle(
        post_form("/export", "address=500+Rue+Test&municipal_value=12"),
        &extractor,
    );
    assert!(matches!(result, Err(ServerError::BadRequest(_))));
}
