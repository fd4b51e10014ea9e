use crate::errors::ServerError;
use crate::responses::ALLOW_ORIGIN;
use astra::{Body, Response, ResponseBuilder};

pub type ResultResp = Result<Response, ServerError>;

/// Convert a ServerError into a plain-text response with the matching status.
pub fn error_to_response(err: ServerError) -> Response {
    let status = err.status();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header(ALLOW_ORIGIN.0, ALLOW_ORIGIN.1)
        .body(Body::from(err.body()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
