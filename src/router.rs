use crate::domain::{filter, FilterSpec};
use crate::errors::ServerError;
use crate::responses::{
    error_to_response, json_response, preflight_response, text_response, ResultResp,
};
use crate::scraper::{
    build_search_path, search_url, validate_location_key, Extractor, PageSource, RawPage,
};
use astra::{Request, Response};
use std::collections::HashMap;
use tracing::{error, info, warn};
use url::Url;

const WELCOME: &str = "Welcome to the listings scraper. Try GET /scrape/<zip code>.";

/// Everything a request needs, built once at startup and shared read-only by all workers.
pub struct App {
    pub site: Url,
    pub extractor: Extractor,
    pub source: Box<dyn PageSource>,
}

/// Runs `handle` and turns any error into its plain-text response.
pub fn respond(req: Request, app: &App) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match handle(req, app) {
        Ok(resp) => resp,
        Err(err) => {
            let status = err.status();
            if status >= 500 {
                error!(%method, %path, status, "{err}");
            } else {
                warn!(%method, %path, status, "{err}");
            }
            error_to_response(err)
        }
    }
}

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/") => text_response(WELCOME),
        ("GET", p) if p.starts_with("/scrape/") => {
            let location = &p["/scrape/".len()..];
            let params = parse_query(&req);
            scrape(app, location, &params)
        }
        ("OPTIONS", _) => preflight_response(),
        _ => Err(ServerError::NotFound),
    }
}

fn scrape(app: &App, location: &str, params: &HashMap<String, String>) -> ResultResp {
    let spec = FilterSpec::from_query(params)?;
    validate_location_key(location).map_err(ServerError::BadRequest)?;

    let url = search_url(&app.site, &build_search_path(location, &spec));
    info!(%url, "scraping");

    let html = app.source.fetch(&url)?;
    let page = RawPage::parse(&html);
    let listings = app.extractor.extract(&page)?;
    let found = listings.len();

    let listings = filter(listings, &spec);
    info!(found, kept = listings.len(), strategy = ?page.strategy(), "scrape complete");

    json_response(&listings)
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
