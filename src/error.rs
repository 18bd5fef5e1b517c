use thiserror::Error;

/// Failure categories for operation handlers. Display strings are flat,
/// user-facing messages; they end up verbatim in the `error` field of the
/// response envelope, so no stack traces or internal identifiers belong here.
#[derive(Debug, Error)]
pub enum OpError {
    /// A required input is missing or blank. Raised before any external call.
    #[error("{0}")]
    Validation(String),

    /// A required environment value is absent.
    #[error("{key} is not set")]
    Config { key: &'static str },

    /// Non-success response from the avatar/voice vendor, excluding the
    /// tolerated not-found-on-delete case.
    #[error("{0}")]
    Vendor(String),

    /// Object storage call failure.
    #[error("{0}")]
    Storage(String),

    /// The data store reported an error.
    #[error("{0}")]
    Database(String),

    /// The store reported success but expected data is absent
    /// (e.g. no matching row where one is required to proceed).
    #[error("{0}")]
    MissingData(String),

    /// Anything that does not match the categories above.
    #[error("{0}")]
    Unknown(String),
}
