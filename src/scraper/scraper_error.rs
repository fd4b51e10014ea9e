use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("HTML parse error: {0}")]
    HtmlParse(String),
    #[error("__NEXT_DATA__ not found")]
    DataBlockNotFound,
    #[error("JSON parse error: {0}")]
    MalformedPayload(String),
    #[error("listings array not found in page data")]
    ListingsArrayNotFound,
}

impl ScraperError {
    /// The page was fetched and parsed, but the data we look for is not on it.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ScraperError::DataBlockNotFound | ScraperError::ListingsArrayNotFound
        )
    }

    /// Only the fetch can succeed on a second try; parsing the same bytes fails the same way.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ScraperError::Transport(_))
    }
}
