use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{OrderId, WorkId};

use crate::record::{Reservation, Work, status};
use crate::store::{MerchantStore, ReservationStore, TradeStore, WorkCatalog};
use crate::{Result, StoreError};

#[derive(Debug, Clone)]
struct WorkRow {
    work: Work,
    status: String,
}

#[derive(Default)]
struct Inner {
    reservations: BTreeMap<OrderId, Reservation>,
    works: BTreeMap<i32, WorkRow>,
    trades: HashMap<OrderId, String>,
    merchants: HashMap<String, String>,
    fail_next: Option<String>,
}

impl Inner {
    /// Consumes a pending injected failure, if any.
    fn take_failure(&mut self) -> Result<()> {
        match self.fail_next.take() {
            Some(message) => Err(StoreError::Connection(message)),
            None => Ok(()),
        }
    }
}

/// In-memory store implementation for testing.
///
/// Backs all four store traits with plain maps and provides the same
/// observable semantics as the PostgreSQL implementation, including the
/// order-id uniqueness constraint. Seed methods populate the tables and
/// `fail_next_operation` injects a one-shot connection failure to exercise
/// error paths.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a catalog work with the given status.
    pub async fn seed_work(&self, work: Work, work_status: impl Into<String>) {
        let mut inner = self.inner.write().await;
        inner.works.insert(
            work.id.as_i32(),
            WorkRow {
                work,
                status: work_status.into(),
            },
        );
    }

    /// Seeds a trade row for an order with the given status.
    pub async fn seed_trade(&self, order_id: OrderId, trade_status: impl Into<String>) {
        let mut inner = self.inner.write().await;
        inner.trades.insert(order_id, trade_status.into());
    }

    /// Seeds a merchant credential row.
    pub async fn seed_merchant(&self, name: impl Into<String>, password: impl Into<String>) {
        let mut inner = self.inner.write().await;
        inner.merchants.insert(name.into(), password.into());
    }

    /// Makes the next store operation fail with a connection error.
    pub async fn fail_next_operation(&self, message: impl Into<String>) {
        let mut inner = self.inner.write().await;
        inner.fail_next = Some(message.into());
    }

    /// Returns the number of persisted reservations.
    pub async fn reservation_count(&self) -> usize {
        self.inner.read().await.reservations.len()
    }

    /// Returns a persisted reservation by order id.
    pub async fn reservation(&self, order_id: &OrderId) -> Option<Reservation> {
        self.inner.read().await.reservations.get(order_id).cloned()
    }

    /// Returns the current trade status for an order.
    pub async fn trade_status(&self, order_id: &OrderId) -> Option<String> {
        self.inner.read().await.trades.get(order_id).cloned()
    }

    /// Returns the stored password for a merchant.
    pub async fn merchant_password(&self, name: &str) -> Option<String> {
        self.inner.read().await.merchants.get(name).cloned()
    }
}

#[async_trait]
impl ReservationStore for InMemoryStore {
    async fn max_order_id(&self) -> Result<Option<OrderId>> {
        let mut inner = self.inner.write().await;
        inner.take_failure()?;
        Ok(inner.reservations.keys().next_back().cloned())
    }

    async fn insert_reservation(&self, reservation: &Reservation) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.take_failure()?;
        if inner.reservations.contains_key(&reservation.order_id) {
            return Err(StoreError::DuplicateOrderId(reservation.order_id.clone()));
        }
        inner
            .reservations
            .insert(reservation.order_id.clone(), reservation.clone());
        Ok(())
    }

    async fn find_work_id(&self, order_id: &OrderId) -> Result<Option<WorkId>> {
        let mut inner = self.inner.write().await;
        inner.take_failure()?;
        Ok(inner.reservations.get(order_id).map(|r| r.work_id))
    }
}

#[async_trait]
impl WorkCatalog for InMemoryStore {
    async fn latest_work_id(&self) -> Result<Option<WorkId>> {
        let mut inner = self.inner.write().await;
        inner.take_failure()?;
        Ok(inner.works.keys().next_back().map(|id| WorkId::new(*id)))
    }

    async fn find_work(&self, work_id: WorkId) -> Result<Option<Work>> {
        let mut inner = self.inner.write().await;
        inner.take_failure()?;
        Ok(inner.works.get(&work_id.as_i32()).map(|row| row.work.clone()))
    }

    async fn work_status(&self, work_id: WorkId) -> Result<Option<String>> {
        let mut inner = self.inner.write().await;
        inner.take_failure()?;
        Ok(inner.works.get(&work_id.as_i32()).map(|row| row.status.clone()))
    }
}

#[async_trait]
impl TradeStore for InMemoryStore {
    async fn in_trade(&self, order_id: &OrderId) -> Result<bool> {
        let mut inner = self.inner.write().await;
        inner.take_failure()?;
        Ok(inner
            .trades
            .get(order_id)
            .is_some_and(|s| s == status::ACTIVE))
    }

    async fn cancel_active_trade(&self, order_id: &OrderId) -> Result<u64> {
        let mut inner = self.inner.write().await;
        inner.take_failure()?;
        match inner.trades.get_mut(order_id) {
            Some(trade) if *trade == status::ACTIVE => {
                *trade = status::CANCELLED.to_string();
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[async_trait]
impl MerchantStore for InMemoryStore {
    async fn update_password(&self, merchant_name: &str, new_password: &str) -> Result<u64> {
        let mut inner = self.inner.write().await;
        inner.take_failure()?;
        match inner.merchants.get_mut(merchant_name) {
            Some(password) => {
                *password = new_password.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
