//! The cancellation workflow.

use common::OrderId;
use reservation_store::{StoreError, TradeStore};

use crate::forward::{Forward, keys, views};
use crate::validate::parse_order_id;

/// Outcome of a cancellation attempt.
///
/// `rows_affected` of zero means the order was already cancelled or never
/// existed; one or more means the cancellation took effect. A store failure
/// is carried in `cause` and reported, never re-thrown on this path.
#[derive(Debug)]
pub struct CancellationResult {
    pub rows_affected: u64,
    pub cause: Option<StoreError>,
}

impl CancellationResult {
    /// Returns true if at least one row was cancelled.
    pub fn succeeded(&self) -> bool {
        self.cause.is_none() && self.rows_affected >= 1
    }
}

/// Service cancelling an order's active trade.
pub struct CancellationService<S> {
    store: S,
}

impl<S: TradeStore> CancellationService<S> {
    /// Creates a cancellation service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Executes the conditional update for a validated order id.
    pub async fn try_cancel(&self, order_id: &OrderId) -> CancellationResult {
        match self.store.cancel_active_trade(order_id).await {
            Ok(rows_affected) => CancellationResult {
                rows_affected,
                cause: None,
            },
            Err(e) => CancellationResult {
                rows_affected: 0,
                cause: Some(e),
            },
        }
    }

    /// Handles a raw cancellation request end to end.
    ///
    /// The order id is syntax-checked before any store access. All outcomes
    /// come back as messages on the lookup view; store failures are
    /// downgraded, never propagated.
    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self, raw_order_id: &str) -> Forward {
        let order_id = match parse_order_id(raw_order_id) {
            Ok(id) => id,
            Err(e) => {
                return Forward::to(views::ORDER_LOOKUP)
                    .with_attribute(keys::ERROR_MESSAGE, e.to_string());
            }
        };

        let result = self.try_cancel(&order_id).await;
        if let Some(cause) = &result.cause {
            tracing::warn!(%order_id, error = %cause, "cancellation failed");
            metrics::counter!("cancellations_failed").increment(1);
            return Forward::to(views::ORDER_LOOKUP).with_attribute(
                keys::ERROR_MESSAGE,
                "cancellation failed, please try again later",
            );
        }

        if result.rows_affected == 0 {
            return Forward::to(views::ORDER_LOOKUP)
                .with_attribute(keys::ERROR_MESSAGE, "order already cancelled or not found");
        }

        metrics::counter!("cancellations_total").increment(1);
        tracing::info!(%order_id, "order cancelled");
        Forward::to(views::ORDER_LOOKUP)
            .with_attribute(keys::SUCCESS_MESSAGE, "order cancelled successfully")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reservation_store::{InMemoryStore, ReservationStore, status};

    #[tokio::test]
    async fn active_order_is_cancelled() {
        let store = InMemoryStore::new();
        let order = OrderId::new("0000000001");
        store.seed_trade(order.clone(), status::ACTIVE).await;
        let service = CancellationService::new(store.clone());

        let forward = service.cancel("0000000001").await;

        assert_eq!(forward.view(), views::ORDER_LOOKUP);
        assert_eq!(
            forward.attribute(keys::SUCCESS_MESSAGE),
            Some("order cancelled successfully")
        );
        assert_eq!(
            store.trade_status(&order).await.as_deref(),
            Some(status::CANCELLED)
        );
    }

    #[tokio::test]
    async fn zero_rows_reports_nothing_to_cancel() {
        let store = InMemoryStore::new();
        let service = CancellationService::new(store.clone());

        // Unknown order.
        let forward = service.cancel("0000000009").await;
        assert_eq!(
            forward.attribute(keys::ERROR_MESSAGE),
            Some("order already cancelled or not found")
        );

        // Already cancelled order.
        store
            .seed_trade(OrderId::new("0000000001"), status::CANCELLED)
            .await;
        let forward = service.cancel("0000000001").await;
        assert_eq!(
            forward.attribute(keys::ERROR_MESSAGE),
            Some("order already cancelled or not found")
        );
    }

    #[tokio::test]
    async fn invalid_order_id_skips_the_store() {
        let store = InMemoryStore::new();
        store.fail_next_operation("must not be reached").await;
        let service = CancellationService::new(store.clone());

        let forward = service.cancel("").await;

        assert_eq!(
            forward.attribute(keys::ERROR_MESSAGE),
            Some("order id must be a non-empty string of digits")
        );
        // The injected failure was never consumed.
        assert!(store.max_order_id().await.is_err());
    }

    #[tokio::test]
    async fn store_error_downgrades_to_message() {
        let store = InMemoryStore::new();
        store
            .seed_trade(OrderId::new("0000000001"), status::ACTIVE)
            .await;
        store.fail_next_operation("connection reset").await;
        let service = CancellationService::new(store.clone());

        let forward = service.cancel("0000000001").await;

        assert_eq!(
            forward.attribute(keys::ERROR_MESSAGE),
            Some("cancellation failed, please try again later")
        );
        // The trade is untouched and can still be cancelled afterwards.
        let forward = service.cancel("0000000001").await;
        assert!(forward.has_attribute(keys::SUCCESS_MESSAGE));
    }

    #[tokio::test]
    async fn try_cancel_reports_rows_and_cause() {
        let store = InMemoryStore::new();
        let order = OrderId::new("0000000001");
        store.seed_trade(order.clone(), status::ACTIVE).await;
        let service = CancellationService::new(store.clone());

        let result = service.try_cancel(&order).await;
        assert!(result.succeeded());
        assert_eq!(result.rows_affected, 1);

        let result = service.try_cancel(&order).await;
        assert!(!result.succeeded());
        assert_eq!(result.rows_affected, 0);
        assert!(result.cause.is_none());

        store.fail_next_operation("connection reset").await;
        let result = service.try_cancel(&order).await;
        assert!(!result.succeeded());
        assert!(result.cause.is_some());
    }
}
