// src/tests/router_tests/scrape_tests.rs

use crate::router::respond;
use crate::scraper::ExtractionMode;
use crate::tests::utils::{body_string, get, next_data_html, test_app, StubSource};
use serde_json::{json, Value};
use std::sync::Arc;

fn results_page() -> String {
    let payload = json!({
        "props": { "pageProps": { "properties": [
            {
                "location": { "address": { "line": "1 Main St" } },
                "list_price": 500000,
                "description": { "beds": 3, "baths_consolidated": 2.5, "sqft": 1200 },
                "permalink": "1-Main-St_90210_M1"
            },
            {
                "location": { "address": { "line": "9 Hill Rd" } },
                "list_price": 1200000,
                "description": { "beds": 5, "baths_consolidated": "4", "sqft": 3400 },
                "permalink": "9-Hill-Rd_90210_M2"
            },
            {
                "location": { "address": { "line": "Lot 4 Canyon Dr" } },
                "list_price": 150000,
                "permalink": "Lot-4_90210_M3"
            }
        ]}}
    });
    next_data_html(&payload.to_string())
}

#[test]
fn unfiltered_scrape_returns_every_listing() {
    let source = Arc::new(StubSource::page(results_page()));
    let app = test_app(source.clone(), ExtractionMode::Strict);

    let resp = respond(get("/scrape/90210"), &app);
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "application/json"
    );

    let body: Value = serde_json::from_str(&body_string(resp)).unwrap();
    let listings = body.as_array().unwrap();
    assert_eq!(listings.len(), 3);

    assert_eq!(
        listings[0],
        json!({
            "address": "1 Main St",
            "price": 500000,
            "beds": 3,
            "baths": 2.5,
            "sqft": 1200,
            "link": "https://www.realtor.com/realestateandhomes-detail/1-Main-St_90210_M1"
        })
    );

    // Missing description degrades to nulls instead of failing the request.
    assert_eq!(listings[2]["beds"], Value::Null);
    assert_eq!(listings[2]["baths"], Value::Null);
    assert_eq!(listings[2]["sqft"], Value::Null);

    assert_eq!(
        *source.requested.lock().unwrap(),
        vec!["https://www.realtor.com/realestateandhomes-search/90210".to_string()]
    );
}

#[test]
fn filters_are_sent_to_site_and_applied_locally() {
    let source = Arc::new(StubSource::page(results_page()));
    let app = test_app(source.clone(), ExtractionMode::Strict);

    let resp = respond(
        get("/scrape/90210?min_price=100000&max_price=600000&min_beds=2"),
        &app,
    );
    assert_eq!(resp.status(), 200);

    let body: Value = serde_json::from_str(&body_string(resp)).unwrap();
    let addresses: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["address"].as_str().unwrap())
        .collect();

    // "Lot 4" is in the price range but has no beds, so the explicit beds bound drops it.
    assert_eq!(addresses, vec!["1 Main St"]);

    assert_eq!(
        *source.requested.lock().unwrap(),
        vec![
            "https://www.realtor.com/realestateandhomes-search/90210/price-100000-600000/beds-2-na"
                .to_string()
        ]
    );
}

#[test]
fn legacy_parameter_names_still_filter() {
    let app = test_app(StubSource::page(results_page()), ExtractionMode::Strict);

    let resp = respond(get("/scrape/90210?beds=4&baths=3.5"), &app);
    assert_eq!(resp.status(), 200);

    let body: Value = serde_json::from_str(&body_string(resp)).unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["address"], "9 Hill Rd");
}

#[test]
fn empty_results_are_an_empty_array() {
    let html = next_data_html(r#"{"props":{"pageProps":{"properties":[]}}}"#);
    let app = test_app(StubSource::page(html), ExtractionMode::Strict);

    let resp = respond(get("/scrape/99999"), &app);
    assert_eq!(resp.status(), 200);
    assert_eq!(body_string(resp), "[]");
}

#[test]
fn missing_data_block_is_404() {
    let app = test_app(
        StubSource::page("<html><body><h1>Pardon our interruption</h1></body></html>"),
        ExtractionMode::Strict,
    );

    let resp = respond(get("/scrape/90210"), &app);
    assert_eq!(resp.status(), 404);
    assert_eq!(body_string(resp), "__NEXT_DATA__ not found");
}

#[test]
fn missing_listings_array_is_404() {
    let html = next_data_html(r#"{"props":{"pageProps":{"seo":{}}}}"#);
    let app = test_app(StubSource::page(html), ExtractionMode::Strict);

    let resp = respond(get("/scrape/90210"), &app);
    assert_eq!(resp.status(), 404);
    assert_eq!(body_string(resp), "listings array not found in page data");
}

#[test]
fn malformed_payload_is_500_with_parser_message() {
    let html = next_data_html(r#"{"props":{"pageProps":{"properties":[}"#);
    let app = test_app(StubSource::page(html), ExtractionMode::Strict);

    let resp = respond(get("/scrape/90210"), &app);
    assert_eq!(resp.status(), 500);

    let body = body_string(resp);
    assert!(
        body.starts_with("Error fetching data: JSON parse error: "),
        "unexpected body: {body}"
    );
    assert!(body.contains("line 1"), "parser position missing: {body}");
}

#[test]
fn transport_failure_is_500() {
    let app = test_app(
        StubSource::failing("HTTP 403 Forbidden"),
        ExtractionMode::Strict,
    );

    let resp = respond(get("/scrape/90210"), &app);
    assert_eq!(resp.status(), 500);
    assert_eq!(
        body_string(resp),
        "Error fetching data: Network error: HTTP 403 Forbidden"
    );
}

#[test]
fn compat_mode_reads_legacy_cards() {
    let html = r#"<html><body>
        <div class="component_property-card">
          <div class="address">55 Palm Way</div>
          <div class="price">$725,000</div>
          <div class="beds">3</div>
          <div class="baths">2</div>
          <div class="sqft">1,650</div>
          <a href="https://www.realtor.com/realestateandhomes-detail/55-Palm-Way">view</a>
        </div>
    </body></html>"#;
    let app = test_app(StubSource::page(html), ExtractionMode::Compat);

    let resp = respond(get("/scrape/90210?max_price=800000"), &app);
    assert_eq!(resp.status(), 200);

    let body: Value = serde_json::from_str(&body_string(resp)).unwrap();
    assert_eq!(
        body,
        json!([{
            "address": "55 Palm Way",
            "price": 725000,
            "beds": 3,
            "baths": 2.0,
            "sqft": 1650,
            "link": "https://www.realtor.com/realestateandhomes-detail/55-Palm-Way"
        }])
    );
}

#[test]
fn bad_filter_values_are_400_and_skip_the_fetch() {
    let source = Arc::new(StubSource::page(results_page()));
    let app = test_app(source.clone(), ExtractionMode::Strict);

    let resp = respond(get("/scrape/90210?min_price=lots"), &app);
    assert_eq!(resp.status(), 400);
    assert_eq!(
        body_string(resp),
        "Bad Request: invalid value for min_price: \"lots\""
    );

    let resp = respond(get("/scrape/90210?min_baths=3&max_baths=1"), &app);
    assert_eq!(resp.status(), 400);

    assert!(source.requested.lock().unwrap().is_empty());
}

#[test]
fn bad_location_is_400() {
    let app = test_app(StubSource::page(results_page()), ExtractionMode::Strict);

    let resp = respond(get("/scrape/90210%2F..%2Fadmin"), &app);
    assert_eq!(resp.status(), 400);

    let resp = respond(get("/scrape/"), &app);
    assert_eq!(resp.status(), 400);
}
