//! Translation of pool and Diesel failures into repository port errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::ProductRepositoryError;

use super::pool::PoolError;

/// Pool failures always mean the database could not be reached.
pub(crate) fn map_pool_error(error: PoolError) -> ProductRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ProductRepositoryError::connection(message)
        }
    }
}

/// Closed connections map to `Connection`; everything else to `Query`.
///
/// Raw database messages are logged at debug level and replaced with a
/// stable summary.
pub(crate) fn map_diesel_error(error: DieselError) -> ProductRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => ProductRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => ProductRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            ProductRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            ProductRepositoryError::query("database constraint violated")
        }
        DieselError::DeserializationError(_) => {
            ProductRepositoryError::query("database row could not be decoded")
        }
        _ => ProductRepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(PoolError::checkout("connection refused"))]
    #[case(PoolError::build("invalid url"))]
    fn pool_errors_map_to_connection(#[case] error: PoolError) {
        assert!(matches!(
            map_pool_error(error),
            ProductRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn not_found_maps_to_query() {
        let mapped = map_diesel_error(DieselError::NotFound);
        assert_eq!(mapped, ProductRepositoryError::query("record not found"));
    }

    #[rstest]
    fn broken_transaction_manager_maps_to_connection() {
        let mapped = map_diesel_error(DieselError::BrokenTransactionManager);
        assert!(matches!(mapped, ProductRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        let mapped = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        ));
        assert!(matches!(mapped, ProductRepositoryError::Connection { .. }));
    }
}
