//! Diesel and pool error translation shared by the repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{BlogRepositoryError, UserRepositoryError};

use super::pool::PoolError;

pub(super) fn blog_pool_error(error: PoolError) -> BlogRepositoryError {
    BlogRepositoryError::connection(error.message())
}

pub(super) fn user_pool_error(error: PoolError) -> UserRepositoryError {
    UserRepositoryError::connection(error.message())
}

/// Classification of a Diesel failure before it becomes a port error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum DieselFailure {
    Connection(&'static str),
    Query(&'static str),
    UniqueViolation,
}

pub(super) fn classify(error: &DieselError) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DieselFailure::UniqueViolation
        }
        _ => DieselFailure::Query("database error"),
    }
}

pub(super) fn blog_diesel_error(error: DieselError) -> BlogRepositoryError {
    match classify(&error) {
        DieselFailure::Connection(message) => BlogRepositoryError::connection(message),
        DieselFailure::Query(message) => BlogRepositoryError::query(message),
        DieselFailure::UniqueViolation => BlogRepositoryError::query("duplicate blog id"),
    }
}

/// `username` is reported on unique violations.
pub(super) fn user_diesel_error(error: DieselError, username: &str) -> UserRepositoryError {
    match classify(&error) {
        DieselFailure::Connection(message) => UserRepositoryError::connection(message),
        DieselFailure::Query(message) => UserRepositoryError::query(message),
        DieselFailure::UniqueViolation => UserRepositoryError::duplicate_username(username),
    }
}
