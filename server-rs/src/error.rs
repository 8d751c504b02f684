use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Why a statistics report was refused.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The body could not be read as JSON.
    #[error(transparent)]
    Body(#[from] JsonRejection),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` must be a string")]
    InvalidField(&'static str),
}

impl ReportError {
    pub fn status(&self) -> StatusCode {
        match self {
            ReportError::Body(rejection) => rejection.status(),
            ReportError::MissingField(_) | ReportError::InvalidField(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(error = %self, status = status.as_u16(), "Rejected statistics report");
        match self {
            ReportError::Body(rejection) => rejection.into_response(),
            other => (status, other.to_string()).into_response(),
        }
    }
}
