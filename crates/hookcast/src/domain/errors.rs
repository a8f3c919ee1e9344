//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::value_objects::MessageStatus;
use crate::validation::ValidationError;

/// Storage constraint categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    NotNull,
    Check,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unique => write!(f, "unique"),
            Self::ForeignKey => write!(f, "foreign key"),
            Self::NotNull => write!(f, "not null"),
            Self::Check => write!(f, "check"),
        }
    }
}

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Constraint violation ({kind}): {detail}")]
    ConstraintViolation { kind: ConstraintKind, detail: String },

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: MessageStatus,
        to: MessageStatus,
    },

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: Uuid) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn constraint(kind: ConstraintKind, detail: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            kind,
            detail: detail.into(),
        }
    }
}
