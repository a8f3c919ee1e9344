//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems (storage, dispatch).
//!
//! Implementations of these traits live in the infrastructure layer.

pub mod dispatch;
pub mod repositories;

// Re-exports
pub use dispatch::*;
pub use repositories::*;
