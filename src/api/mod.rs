//! Board API layer
//!
//! Ties the validator, the reorder engine and the query façade together
//! behind one handler shared by the HTTP server and the CLI.
//!
//! # Supported Operations
//!
//! - list (optionally one lane)
//! - get
//! - move
//! - add (seeding only)

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiResult};
pub use handler::BoardApi;
pub use request::{parse_body, MoveRequest};
pub use response::{ErrorBody, ErrorResponse, SuccessResponse};
