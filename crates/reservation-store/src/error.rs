use common::OrderId;
use thiserror::Error;

/// Errors that can occur when interacting with the backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The order id already exists in the reservation table.
    ///
    /// Order-id allocation reads the current maximum and the insert carries
    /// the computed id, so two concurrent bookings can race to the same id.
    /// The uniqueness constraint surfaces that race as this variant instead
    /// of silently double-booking.
    #[error("duplicate order id: {0}")]
    DuplicateOrderId(OrderId),

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The store could not be reached.
    #[error("connection failure: {0}")]
    Connection(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
