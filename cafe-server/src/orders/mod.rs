//! Order lifecycle
//!
//! # Architecture
//!
//! ```text
//! HTTP handler → OrderStore → OrderRepository (redb)
//!                    │
//!                    ▼
//!              BroadcastHub → all subscribers
//! ```
//!
//! # Data Flow
//!
//! 1. Handler calls an `OrderStore` operation
//! 2. Input is validated (numbers, references, status)
//! 3. The change is persisted in one redb transaction
//! 4. The reference-resolved order is returned and published

pub mod error;
pub mod store;


pub use error::{OrderError, OrderResult};
pub use store::OrderStore;
