//! Translation of SQLx failures into domain errors

use sf_core::errors::DomainError;

/// Map a failed statement to a domain error.
///
/// Unique violations become `Conflict` and foreign key violations `BadRequest`;
/// services refine the message. Everything else is a `Database` error.
pub(crate) fn map_sqlx_error(context: &str, error: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &error {
        if db_err.is_unique_violation() {
            return DomainError::conflict(format!("{}: duplicate value", context));
        }
        if db_err.is_foreign_key_violation() {
            return DomainError::bad_request(format!("{}: unknown reference", context));
        }
    }
    tracing::error!(error = %error, "{}", context);
    DomainError::database(format!("{}: {}", context, error))
}

/// Shorthand for a closure passed to `map_err`
pub(crate) fn db_err(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |error| map_sqlx_error(context, error)
}
