//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod delete_policy;
mod message_status;
mod separator_spacing;

pub use delete_policy::*;
pub use message_status::*;
pub use separator_spacing::*;
