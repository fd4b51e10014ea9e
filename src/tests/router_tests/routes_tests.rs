// src/tests/router_tests/routes_tests.rs

use crate::errors::ServerError;
use crate::router::{handle, respond};
use crate::scraper::ExtractionMode;
use crate::tests::utils::{body_string, get, request, test_app, StubSource};
use http::Method;

#[test]
fn home_returns_welcome_text() {
    let app = test_app(StubSource::failing("unused"), ExtractionMode::Strict);

    let resp = handle(get("/"), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "text/plain; charset=utf-8"
    );
    assert!(body_string(resp).starts_with("Welcome"));
}

#[test]
fn unknown_route_is_not_found() {
    let app = test_app(StubSource::failing("unused"), ExtractionMode::Strict);

    assert!(matches!(
        handle(get("/listings"), &app),
        Err(ServerError::NotFound)
    ));

    let resp = respond(request(Method::POST, "/scrape/90210"), &app);
    assert_eq!(resp.status(), 404);
    assert_eq!(body_string(resp), "Not Found");
}

#[test]
fn every_response_allows_any_origin() {
    let app = test_app(StubSource::failing("down"), ExtractionMode::Strict);

    for resp in [
        respond(get("/"), &app),
        respond(get("/nope"), &app),
        respond(get("/scrape/90210"), &app),
    ] {
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
    }
}

#[test]
fn preflight_is_answered() {
    let app = test_app(StubSource::failing("unused"), ExtractionMode::Strict);

    let resp = respond(request(Method::OPTIONS, "/scrape/90210"), &app);
    assert_eq!(resp.status(), 204);
    assert_eq!(
        resp.headers().get("Access-Control-Allow-Methods").unwrap(),
        "GET, OPTIONS"
    );
}
