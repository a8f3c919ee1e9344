//! sqlx error mapping

use hookcast::{ConstraintKind, DomainError};
use sqlx::error::ErrorKind;

/// Convert a sqlx error into a DomainError
///
/// Constraint failures reported by Postgres become `ConstraintViolation`;
/// everything else (connection, pool, protocol) is a `Persistence` error.
pub fn map_sqlx_error(e: sqlx::Error) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        let kind = match db_err.kind() {
            ErrorKind::UniqueViolation => Some(ConstraintKind::Unique),
            ErrorKind::ForeignKeyViolation => Some(ConstraintKind::ForeignKey),
            ErrorKind::NotNullViolation => Some(ConstraintKind::NotNull),
            ErrorKind::CheckViolation => Some(ConstraintKind::Check),
            _ => None,
        };
        if let Some(kind) = kind {
            let detail = match db_err.constraint() {
                Some(constraint) => format!("{} ({})", db_err.message(), constraint),
                None => db_err.message().to_string(),
            };
            return DomainError::constraint(kind, detail);
        }
    }
    DomainError::Persistence(e.to_string())
}
