//! Middleware components for request processing.
//!
//! This module contains middleware for logging, request ID tracking,
//! error handling, and the authentication extractors.

mod auth;
mod error_handler;
mod logging;
mod request_id;

pub use auth::{bearer_token, AdminPrincipal};
pub use error_handler::{error_to_response_body, error_to_status_code, global_error_handler};
pub use logging::logging_middleware;
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
