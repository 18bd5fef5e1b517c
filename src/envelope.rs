use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::error::OpError;

/// Uniform return shape for every operation: `{"success": true, ...payload}`
/// or `{"success": false, "error": "..."}`. Callers branch only on the
/// `success` discriminant; a response never carries both shapes.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Envelope<T: Serialize> {
    Success {
        success: bool,
        #[serde(flatten)]
        payload: T,
    },
    Failure {
        success: bool,
        error: String,
    },
}

/// Payload for operations that return nothing beyond the discriminant.
/// Flattens to an empty object, so the body is just `{"success": true}`.
#[derive(Debug, Default, Serialize)]
pub struct Empty {}

impl<T: Serialize> Envelope<T> {
    pub fn ok(payload: T) -> Self {
        Envelope::Success {
            success: true,
            payload,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Envelope::Failure {
            success: false,
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }
}

/// The single adapter between handler results and the wire shape. Handlers
/// themselves return `Result<T, OpError>` and never construct envelopes.
impl<T: Serialize> From<Result<T, OpError>> for Envelope<T> {
    fn from(result: Result<T, OpError>) -> Self {
        match result {
            Ok(payload) => Envelope::ok(payload),
            Err(err) => Envelope::fail(err.to_string()),
        }
    }
}

/// Always HTTP 200; the envelope itself carries the outcome.
impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Created {
        id: &'static str,
    }

    #[test]
    fn success_flattens_payload_beside_discriminant() {
        let envelope = Envelope::ok(Created { id: "abc" });
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"success": true, "id": "abc"}));
    }

    #[test]
    fn empty_payload_serializes_to_bare_discriminant() {
        let envelope = Envelope::ok(Empty {});
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"success": true}));
    }

    #[test]
    fn failure_carries_single_error_string() {
        let envelope: Envelope<Empty> = Envelope::fail("voice not found");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"success": false, "error": "voice not found"}));
    }

    #[test]
    fn converts_from_handler_result() {
        let ok: Envelope<Created> = Ok(Created { id: "x" }).into();
        assert!(ok.is_success());

        let err: Envelope<Empty> =
            Envelope::from(Err(OpError::Database("connection reset".into())));
        assert!(!err.is_success());
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["error"], "connection reset");
    }
}
