//! Data models
//!
//! Shared between cafe-server and frontend (via API / WebSocket).
//! All IDs are opaque strings; timestamps are Unix millis.

pub mod menu_item;
pub mod order;

// Re-exports
pub use menu_item::*;
pub use order::*;
