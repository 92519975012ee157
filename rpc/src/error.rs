//! API error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use artchain_orchestrator::OrchestratorError;

/// Orchestrator error carried to the HTTP boundary.
///
/// Every failure response carries a machine-readable `code` alongside the
/// human-readable `details`.
#[derive(Debug)]
pub struct ApiError(pub OrchestratorError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            OrchestratorError::MalformedInput(_) | OrchestratorError::AlreadyVoted => {
                StatusCode::BAD_REQUEST
            }
            OrchestratorError::LedgerUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            OrchestratorError::LedgerRejected { .. }
            | OrchestratorError::ConfirmationTimeout { .. }
            | OrchestratorError::Reconciliation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn label(&self) -> &'static str {
        match &self.0 {
            OrchestratorError::MalformedInput(_) => "Missing required fields",
            OrchestratorError::AlreadyVoted => "Validation failed",
            OrchestratorError::LedgerUnavailable(_) => "Ledger unavailable",
            OrchestratorError::LedgerRejected { .. } => "Ledger rejected the transaction",
            OrchestratorError::ConfirmationTimeout { .. } => "Transaction unconfirmed",
            OrchestratorError::Reconciliation { .. } => "Cache reconciliation failed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.0.code(), error = %self.0, "request failed");
        } else {
            tracing::warn!(code = self.0.code(), error = %self.0, "request rejected");
        }
        let body = json!({
            "error": self.label(),
            "details": self.0.to_string(),
            "code": self.0.code(),
        });
        (status, Json(body)).into_response()
    }
}

impl From<OrchestratorError> for ApiError {
    fn from(e: OrchestratorError) -> Self {
        Self(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_voted_is_a_client_error() {
        assert_eq!(
            ApiError(OrchestratorError::AlreadyVoted).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn unavailable_ledger_is_service_unavailable() {
        assert_eq!(
            ApiError(OrchestratorError::LedgerUnavailable("down".into())).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn reconciliation_failure_is_a_server_error() {
        let err = ApiError(OrchestratorError::Reconciliation {
            content_id: artchain_types::ContentId::ZERO,
            source_msg: "overflow".into(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
