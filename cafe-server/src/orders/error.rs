use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::db::RepoError;

/// Order store errors
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unknown menu items: {}", .0.join(", "))]
    InvalidReference(Vec<String>),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<RepoError> for OrderError {
    fn from(err: RepoError) -> Self {
        tracing::error!(error = %err, "Order storage failure");
        OrderError::StoreUnavailable(err.to_string())
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Validation(msg) => AppError::validation(msg),
            OrderError::InvalidReference(ids) => AppError::with_message(
                ErrorCode::MenuItemNotFound,
                "Some items are invalid",
            )
            .with_detail("menu_item_ids", ids),
            OrderError::InvalidStatus(status) => AppError::with_message(
                ErrorCode::OrderInvalidStatus,
                format!("Invalid status: {}", status),
            )
            .with_detail("allowed", vec!["preparing", "done", "canceled"]),
            OrderError::NotFound(id) => {
                AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", id)
            }
            OrderError::StoreUnavailable(msg) => AppError::store_unavailable(msg),
        }
    }
}

pub type OrderResult<T> = Result<T, OrderError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_error_mapping() {
        let err: AppError = OrderError::InvalidReference(vec!["m9".to_string()]).into();
        assert_eq!(err.code, ErrorCode::MenuItemNotFound);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.details.unwrap().get("menu_item_ids"),
            Some(&serde_json::json!(["m9"]))
        );

        let err: AppError = OrderError::NotFound("o1".to_string()).into();
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);

        let err: AppError = OrderError::InvalidStatus("pending".to_string()).into();
        assert_eq!(err.code, ErrorCode::OrderInvalidStatus);

        let err: AppError = OrderError::StoreUnavailable("io".to_string()).into();
        assert_eq!(err.http_status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_invalid_reference_display() {
        let err = OrderError::InvalidReference(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Unknown menu items: a, b");
    }
}
