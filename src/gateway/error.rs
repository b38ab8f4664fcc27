//! HTTP mapping for RCON errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::RconError;

/// An RCON failure surfaced through an HTTP endpoint.
///
/// Status codes distinguish the operator-actionable cases: a rejected
/// credential is the gateway's own misconfiguration (500), an unreachable
/// or misbehaving upstream is a bad gateway (502), and an unresponsive one
/// is a gateway timeout (504). Error bodies never contain the credential —
/// [`RconError`] messages are credential-free by construction.
#[derive(Debug)]
pub struct GatewayError(pub RconError);

impl From<RconError> for GatewayError {
    fn from(error: RconError) -> Self {
        Self(error)
    }
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self.0 {
            RconError::WrongPassword | RconError::Command(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RconError::Connection(_) | RconError::Protocol(_) => StatusCode::BAD_GATEWAY,
            RconError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn detail(&self) -> String {
        match &self.0 {
            // Named distinctly so operators can tell a credential
            // misconfiguration from a generic upstream failure.
            RconError::WrongPassword => "Wrong password for RCON.".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "RCON command failed");
        (self.status_code(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_by_kind() {
        assert_eq!(
            GatewayError(RconError::WrongPassword).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError(RconError::Timeout).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            GatewayError(RconError::Protocol("bad frame".into())).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn wrong_password_detail_is_distinct_and_credential_free() {
        let detail = GatewayError(RconError::WrongPassword).detail();
        assert_eq!(detail, "Wrong password for RCON.");
    }
}
