use crate::errors::ServerError;
use crate::responses::{ResultResp, ALLOW_ORIGIN};
use astra::{Body, ResponseBuilder};

pub fn text_response(content: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header(ALLOW_ORIGIN.0, ALLOW_ORIGIN.1)
        .body(Body::from(content.to_string()))
        .map_err(|_| ServerError::InternalError)
}

/// Answer for CORS preflight requests.
pub fn preflight_response() -> ResultResp {
    ResponseBuilder::new()
        .status(204)
        .header(ALLOW_ORIGIN.0, ALLOW_ORIGIN.1)
        .header("Access-Control-Allow-Methods", "GET, OPTIONS")
        .header("Access-Control-Allow-Headers", "*")
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}
