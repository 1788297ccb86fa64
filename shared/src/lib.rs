//! Shared types for the café service
//!
//! Wire and domain types used by cafe-server and its clients:
//! order/menu models, real-time order events, and the unified error system.

pub mod error;
pub mod message;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use message::{OrderEvent, OrderEventKind};
