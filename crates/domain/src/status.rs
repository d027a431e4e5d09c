//! Order status resolution.

use common::{OrderId, WorkId};
use reservation_store::{ReservationStore, StoreError, TradeStore, WorkCatalog, status};

use crate::forward::{Forward, keys, views};
use crate::validate::parse_order_id;

/// Facts backing a status decision, assembled per query from three
/// sequential lookups and never stored.
///
/// `work_id` is meaningful only when `order_exists`; `work_status` only
/// when `work_exists`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderStatusFacts {
    pub order_exists: bool,
    pub work_id: Option<WorkId>,
    pub work_exists: bool,
    pub work_status: Option<String>,
    pub in_trade: bool,
}

/// The rendered, human-facing status decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    /// Attribute the message is published under.
    pub attribute: &'static str,
    pub message: String,
    pub show_cancel_button: bool,
}

/// Service deriving an order's display status from stored facts.
pub struct OrderStatusService<S> {
    store: S,
}

impl<S: ReservationStore + WorkCatalog + TradeStore> OrderStatusService<S> {
    /// Creates a status service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Assembles the status facts for an order.
    ///
    /// The three lookups run in a fixed order — order, then work, then
    /// trade flag — because each key comes from the previous result.
    pub async fn resolve(&self, order_id: &OrderId) -> Result<OrderStatusFacts, StoreError> {
        let Some(work_id) = self.store.find_work_id(order_id).await? else {
            return Ok(OrderStatusFacts::default());
        };

        let Some(work_status) = self.store.work_status(work_id).await? else {
            return Ok(OrderStatusFacts {
                order_exists: true,
                work_id: Some(work_id),
                ..OrderStatusFacts::default()
            });
        };

        let in_trade = self.store.in_trade(order_id).await?;

        Ok(OrderStatusFacts {
            order_exists: true,
            work_id: Some(work_id),
            work_exists: true,
            work_status: Some(work_status),
            in_trade,
        })
    }

    /// Maps facts to the display message and cancel-button decision.
    ///
    /// Only an order whose work is active and whose trade is still open is
    /// offered a cancel button; terminal statuses report without one.
    pub fn render(facts: &OrderStatusFacts) -> StatusView {
        if !facts.order_exists {
            return StatusView {
                attribute: keys::ERROR_MESSAGE,
                message: "order not found".to_string(),
                show_cancel_button: false,
            };
        }
        if !facts.work_exists {
            return StatusView {
                attribute: keys::ERROR_MESSAGE,
                message: "work information unavailable".to_string(),
                show_cancel_button: false,
            };
        }

        let work_status = facts.work_status.as_deref().unwrap_or_default();
        let (message, show_cancel_button) = match (work_status, facts.in_trade) {
            (status::ACTIVE, true) => (
                "order is in an active trade and may be cancelled".to_string(),
                true,
            ),
            (status::ACTIVE, false) => (
                "order is not currently in an active trade".to_string(),
                false,
            ),
            (status::COMPLETED, _) => ("order is completed".to_string(), false),
            (status::CANCELLED, _) => ("order is cancelled".to_string(), false),
            (other, _) => (format!("order status: {other}"), false),
        };

        StatusView {
            attribute: keys::QUERY_RESULT,
            message,
            show_cancel_button,
        }
    }

    /// Handles a raw lookup request end to end.
    ///
    /// Syntax failures and store errors both come back as messages on the
    /// lookup view; this path never propagates an error.
    #[tracing::instrument(skip(self))]
    pub async fn query(&self, raw_order_id: &str) -> Forward {
        let order_id = match parse_order_id(raw_order_id) {
            Ok(id) => id,
            Err(e) => {
                return Forward::to(views::ORDER_LOOKUP)
                    .with_attribute(keys::ERROR_MESSAGE, e.to_string());
            }
        };

        let facts = match self.resolve(&order_id).await {
            Ok(facts) => facts,
            Err(e) => {
                // Downgraded by design: the lookup path reports instead of
                // propagating, unlike booking.
                tracing::warn!(error = %e, "order status lookup failed");
                metrics::counter!("order_lookups_failed").increment(1);
                return Forward::to(views::ORDER_LOOKUP).with_attribute(
                    keys::ERROR_MESSAGE,
                    "order lookup failed, please try again later",
                );
            }
        };

        let view = Self::render(&facts);
        let mut forward =
            Forward::to(views::ORDER_LOOKUP).with_attribute(view.attribute, view.message);
        if view.show_cancel_button {
            forward = forward
                .with_attribute(keys::SHOW_CANCEL_BUTTON, "true")
                .with_attribute(keys::ORDER_ID_TO_CANCEL, raw_order_id);
        }
        forward
    }
}
