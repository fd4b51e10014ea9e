use crate::errors::ServerError;
use crate::responses::{ResultResp, ALLOW_ORIGIN};
use astra::{Body, ResponseBuilder};
use serde::Serialize;

/// Serialize `value` as the response body.
pub fn json_response<T: Serialize + ?Sized>(value: &T) -> ResultResp {
    let body = serde_json::to_string(value).map_err(|_| ServerError::InternalError)?;

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "application/json")
        .header(ALLOW_ORIGIN.0, ALLOW_ORIGIN.1)
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}
