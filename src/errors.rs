// errors.rs
use crate::domain::FilterError;
use crate::scraper::ScraperError;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, bad query input) or the scrape pipeline underneath it.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Scrape(#[from] ScraperError),
    #[error("Internal Server Error")]
    InternalError,
}

impl From<FilterError> for ServerError {
    fn from(err: FilterError) -> Self {
        ServerError::BadRequest(err.to_string())
    }
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Scrape(e) if e.is_not_found() => 404,
            ServerError::Scrape(_) => 500,
            ServerError::InternalError => 500,
        }
    }

    /// Plain-text body sent to the client.
    pub fn body(&self) -> String {
        match self {
            ServerError::Scrape(e) if !e.is_not_found() => format!("Error fetching data: {e}"),
            other => other.to_string(),
        }
    }
}
