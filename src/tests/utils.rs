use crate::domain::extract::FieldExtractor;
use astra::{Body, Response};
use http::{Method, Request};
use std::io::Read;

/// The shared extractor, built the same way `main` builds it.
pub fn test_extractor() -> FieldExtractor {
    FieldExtractor::new().expect("extraction patterns compile")
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

/// A POST with an application/x-www-form-urlencoded body.
pub fn post_form(path: &str, form_body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(form_body.as_bytes().to_vec()))
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}
