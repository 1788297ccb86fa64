//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::OrderNotFound => StatusCode::NOT_FOUND,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            // 403 Forbidden
            Self::PermissionDenied => StatusCode::FORBIDDEN,

            // 503 Service Unavailable (transient, caller decides whether to retry)
            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            // 400 Bad Request (validation, bad references, bad status)
            Self::ValidationFailed | Self::OrderInvalidStatus | Self::MenuItemNotFound => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}
