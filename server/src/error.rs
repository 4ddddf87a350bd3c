use std::collections::BTreeMap;
use std::process::{ExitCode, Termination};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use serde::Serialize;

use kernel::{FieldViolation, KernelError};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl ErrorStatus {
    pub fn new(context: KernelError) -> Self {
        Self(Report::new(context))
    }
}

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    fields: BTreeMap<String, Vec<String>>,
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let context = self.0.current_context();
        let status = match context {
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
            KernelError::Unauthorized => StatusCode::UNAUTHORIZED,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!("{:?}", self.0);
        }

        let mut fields = BTreeMap::<String, Vec<String>>::new();
        for violation in FieldViolation::collect(&self.0) {
            fields
                .entry(violation.field().to_string())
                .or_default()
                .push(violation.message().to_string());
        }
        let body = ErrorBody {
            error: context.to_string(),
            fields,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;

    use kernel::{FieldViolation, KernelError, Violations};

    use super::ErrorStatus;

    async fn body_of(status: ErrorStatus) -> (StatusCode, serde_json::Value) {
        let response = status.into_response();
        let code = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (code, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn violations_become_unprocessable_fields() {
        let mut violations = Violations::default();
        violations.push(FieldViolation::new("booking_date", "Booking date cannot be earlier than today."));
        violations.push(FieldViolation::new("customer_age", "Ensure this value is less than or equal to 120."));
        let (code, body) = body_of(ErrorStatus::from(violations.into_report())).await;
        assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["fields"]["booking_date"][0],
            "Booking date cannot be earlier than today."
        );
        assert!(body["fields"]["customer_age"].is_array());
    }

    #[tokio::test]
    async fn contexts_map_to_status_codes() {
        let (code, body) = body_of(ErrorStatus::new(KernelError::NotFound)).await;
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert!(body.get("fields").is_none());

        let (code, _) = body_of(ErrorStatus::new(KernelError::Unauthorized)).await;
        assert_eq!(code, StatusCode::UNAUTHORIZED);

        let report = Report::new(KernelError::Internal).attach_printable("database exploded");
        let (code, body) = body_of(ErrorStatus::from(report)).await;
        assert_eq!(code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal kernel error");
    }
}
