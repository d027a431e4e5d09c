//! Row-level records persisted by the store.

use chrono::{DateTime, Utc};
use common::{OrderId, WorkId};
use serde::{Deserialize, Serialize};

/// Status values shared by the work and trade tables.
pub mod status {
    /// The work is reservable / the trade is still open.
    pub const ACTIVE: &str = "active";

    /// The trade finished normally.
    pub const COMPLETED: &str = "completed";

    /// The trade was cancelled.
    pub const CANCELLED: &str = "cancelled";
}

/// A catalog work available for reservation.
///
/// Read-only reference data owned by the catalog; the reservation core
/// looks works up but never mutates them. The price is kept as text the
/// way the catalog stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    pub id: WorkId,
    pub name: String,
    pub price: String,
}

impl Work {
    /// Creates a new work record.
    pub fn new(id: impl Into<WorkId>, name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: price.into(),
        }
    }
}

/// A buyer's reservation of a work, as persisted.
///
/// Created exactly once per successful booking. The order id is the primary
/// key; inserting a duplicate surfaces `StoreError::DuplicateOrderId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub order_id: OrderId,
    pub work_id: WorkId,
    pub buyer_name: String,
    pub buyer_phone: String,
    pub trade_address: String,
    /// Agreed trade time, kept as validated `YYYY-MM-DD HH:MM` text.
    pub trade_time: String,
    pub created_at: DateTime<Utc>,
}
