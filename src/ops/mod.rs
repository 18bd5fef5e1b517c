//! Operation handlers. Each follows the same protocol: emit a start event,
//! validate inputs (no external call is made past a validation failure), run
//! the remote step where one exists, run the local mutation scoped to the
//! owning user, emit the outcome, return `Result<Payload, OpError>`.

pub mod avatar;
pub mod media;
pub mod video;
pub mod voice;

use sea_orm::prelude::Uuid;

use crate::error::OpError;

/// Trimmed, non-blank required field.
pub(crate) fn require(value: &str, what: &str) -> Result<String, OpError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(OpError::Validation(format!("{what} is required")));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn parse_uuid(value: &str, what: &str) -> Result<Uuid, OpError> {
    Uuid::parse_str(value.trim())
        .map_err(|_| OpError::Validation(format!("{what} is not a valid id")))
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
