pub mod errors;
pub mod json;
pub mod text;

pub use errors::{error_to_response, ResultResp};

pub use json::json_response;
pub use text::{preflight_response, text_response};

/// Every response allows any origin, matching the permissive CORS of the public API.
pub const ALLOW_ORIGIN: (&str, &str) = ("Access-Control-Allow-Origin", "*");
