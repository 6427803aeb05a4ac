//! API response types

mod api_response;
mod status;

pub use api_response::{ApiErrorBody, ApiResponse};
pub use status::StatusCode;
