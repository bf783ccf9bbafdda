//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{StatusCode, ViewError};

/// Map a query error to a one-line message prefixed with its status.
pub fn map_error(e: &ViewError) -> String {
    let status = match e.status() {
        StatusCode::NotFound => "not found",
        StatusCode::InvalidArgument => "invalid argument",
        StatusCode::Internal => "internal",
    };
    format!("Error ({}): {}", status, e)
}
