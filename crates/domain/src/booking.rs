//! The booking workflow.

use chrono::Utc;
use common::WorkId;
use reservation_store::{ReservationStore, WorkCatalog};

use crate::error::{BookingCause, BookingError};
use crate::forward::{Forward, keys, views};
use crate::order_id::{OrderIdStrategy, SequentialIdStrategy};
use crate::validate::BuyerInfo;

/// Raw form fields for a booking, as supplied by the handler collaborator.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub buyer_name: String,
    pub phone: String,
    pub address: String,
    pub trade_time: String,
}

impl BookingRequest {
    /// Creates a booking request from raw string parameters.
    pub fn new(
        buyer_name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        trade_time: impl Into<String>,
    ) -> Self {
        Self {
            buyer_name: buyer_name.into(),
            phone: phone.into(),
            address: address.into(),
            trade_time: trade_time.into(),
        }
    }
}

/// Service reserving a catalog work for a buyer.
///
/// Steps, in the fixed order the persistence layer expects: validate input,
/// resolve the latest catalog work, allocate the next order id from the
/// current maximum, insert the reservation, look up the work's display
/// details for the success view.
///
/// Validation failures forward back to the input form. Everything else that
/// goes wrong — an empty catalog, a lost connection, an order-id collision
/// under concurrent bookings — propagates as [`BookingError`] with the
/// cause retained.
pub struct BookingService<S> {
    store: S,
    ids: Box<dyn OrderIdStrategy>,
}

impl<S: ReservationStore + WorkCatalog> BookingService<S> {
    /// Creates a booking service with the default sequential id strategy.
    pub fn new(store: S) -> Self {
        Self::with_strategy(store, Box::new(SequentialIdStrategy::default()))
    }

    /// Creates a booking service with a custom id strategy.
    pub fn with_strategy(store: S, ids: Box<dyn OrderIdStrategy>) -> Self {
        Self { store, ids }
    }

    /// Books a reservation from raw form input.
    #[tracing::instrument(skip(self, request))]
    pub async fn book(&self, request: &BookingRequest) -> Result<Forward, BookingError> {
        let result = self.execute(request).await;
        match &result {
            Ok(forward) if forward.view() == views::BOOKING_SUCCESS => {
                metrics::counter!("bookings_total").increment(1);
            }
            Ok(_) => {
                metrics::counter!("bookings_rejected").increment(1);
            }
            Err(e) => {
                metrics::counter!("bookings_failed").increment(1);
                tracing::warn!(cause = %e.cause, "booking failed");
            }
        }
        result
    }

    async fn execute(&self, request: &BookingRequest) -> Result<Forward, BookingError> {
        let buyer = match BuyerInfo::parse(
            &request.buyer_name,
            &request.phone,
            &request.address,
            &request.trade_time,
        ) {
            Ok(buyer) => buyer,
            Err(e) => {
                tracing::info!(field_error = %e, "booking input rejected");
                return Ok(Forward::to(views::BUYER_FORM)
                    .with_attribute(keys::ERROR_MESSAGE, e.to_string()));
            }
        };

        let work_id = self
            .store
            .latest_work_id()
            .await?
            .filter(WorkId::is_valid)
            .ok_or(BookingCause::NoWorkAvailable)?;

        let latest = self.store.max_order_id().await?;
        let order_id = self.ids.next(latest.as_ref());

        let reservation = buyer.to_reservation(order_id.clone(), work_id, Utc::now());
        self.store.insert_reservation(&reservation).await?;

        let work = self
            .store
            .find_work(work_id)
            .await?
            .ok_or(BookingCause::NoWorkAvailable)?;

        tracing::info!(%order_id, %work_id, "reservation booked");
        Ok(Forward::to(views::BOOKING_SUCCESS)
            .with_attribute(keys::ORDER_ID, order_id.to_string())
            .with_attribute(keys::WORK_NAME, work.name)
            .with_attribute(keys::WORK_PRICE, work.price))
    }
}
