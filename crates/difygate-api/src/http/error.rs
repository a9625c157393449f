//! Application error type mapping to HTTP status codes and the
//! `{error, status?}` failure body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use difygate_types::error::{ErrorBody, GatewayError};

/// Gateway failure on its way out as an HTTP response.
#[derive(Debug)]
pub struct AppError(pub GatewayError);

impl From<GatewayError> for AppError {
    fn from(e: GatewayError) -> Self {
        AppError(e)
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Configuration(_)
            | GatewayError::Upstream { .. }
            | GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(kind = self.0.kind(), error = %self.0, "Request failed");
        } else {
            warn!(kind = self.0.kind(), error = %self.0, "Request rejected");
        }

        (status, Json(ErrorBody::from(&self.0))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (GatewayError::Validation("missing".to_string()), 400),
            (GatewayError::Configuration("no key".to_string()), 500),
            (GatewayError::Upstream { status: 404 }, 500),
            (GatewayError::internal("boom"), 500),
        ];
        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status_code().as_u16(), expected);
        }
    }
}
