//! Mapping from core and extractor failures to HTTP error responses.
//!
//! Every error leaves the API as `{"detail": "<message>"}`.

use api_shared::ErrorRes;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pms_core::PatientError;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<PatientError> for ApiError {
    fn from(err: PatientError) -> Self {
        let status = match &err {
            PatientError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PatientError::InvalidQuery(_) | PatientError::AlreadyExists(_) => {
                StatusCode::BAD_REQUEST
            }
            PatientError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if err.is_storage_fault() {
            tracing::error!("Patient store error: {:?}", err);
            return Self::new(status, "Internal error");
        }

        tracing::warn!("Request rejected ({}): {}", status, err);
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Invalid JSON body: {}", rejection);
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!("Invalid query string: {}", rejection);
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorRes {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_statuses() {
        let cases = [
            (
                PatientError::InvalidInput("age must be greater than 0".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                PatientError::InvalidQuery("Invalid order".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                PatientError::AlreadyExists("P001".into()),
                StatusCode::BAD_REQUEST,
            ),
            (PatientError::NotFound("P001".into()), StatusCode::NOT_FOUND),
            (
                PatientError::StoreMissing("patients.json".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn test_storage_fault_detail_is_not_leaked() {
        let err = ApiError::from(PatientError::StoreMissing("/secret/patients.json".into()));
        assert_eq!(err.detail, "Internal error");
    }

    #[test]
    fn test_not_found_detail() {
        let err = ApiError::from(PatientError::NotFound("P9".into()));
        assert_eq!(err.detail, "Patient not found");
    }
}
