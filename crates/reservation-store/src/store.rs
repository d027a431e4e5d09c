use async_trait::async_trait;

use common::{OrderId, WorkId};

use crate::record::{Reservation, Work};
use crate::Result;

/// Persistence operations for reservations.
///
/// All implementations must be thread-safe (Send + Sync). Allocation of a
/// new order id reads `max_order_id` and the subsequent insert carries the
/// computed id; implementations guarantee single-row, single-statement
/// semantics for the insert but do not serialize the two calls.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Returns the maximum existing order id, or None for an empty table.
    async fn max_order_id(&self) -> Result<Option<OrderId>>;

    /// Persists a new reservation as a single row.
    ///
    /// A colliding order id fails with `StoreError::DuplicateOrderId`;
    /// nothing is partially persisted.
    async fn insert_reservation(&self, reservation: &Reservation) -> Result<()>;

    /// Returns the work id recorded on an order, or None if the order
    /// does not exist.
    async fn find_work_id(&self, order_id: &OrderId) -> Result<Option<WorkId>>;
}

/// Read-only access to the work catalog.
#[async_trait]
pub trait WorkCatalog: Send + Sync {
    /// Returns the highest existing work id, or None for an empty catalog.
    async fn latest_work_id(&self) -> Result<Option<WorkId>>;

    /// Looks up a work's display name and price.
    async fn find_work(&self, work_id: WorkId) -> Result<Option<Work>>;

    /// Returns the status recorded on a work, or None if the work row
    /// is missing.
    async fn work_status(&self, work_id: WorkId) -> Result<Option<String>>;
}

/// Access to the trade table backing order status and cancellation.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Returns true if the order's trade is currently active.
    async fn in_trade(&self, order_id: &OrderId) -> Result<bool>;

    /// Cancels the order's trade if and only if it is currently active.
    ///
    /// Returns the number of rows updated: 0 means the order was already
    /// cancelled or never existed, 1 or more means the cancellation took
    /// effect.
    async fn cancel_active_trade(&self, order_id: &OrderId) -> Result<u64>;
}

/// Access to merchant credentials.
#[async_trait]
pub trait MerchantStore: Send + Sync {
    /// Commits a new password for the named merchant.
    ///
    /// Returns the number of rows updated; 0 means no such merchant.
    async fn update_password(&self, merchant_name: &str, new_password: &str) -> Result<u64>;
}
