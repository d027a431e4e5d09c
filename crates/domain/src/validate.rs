//! Field validation and the `BuyerInfo` value object.

use chrono::{DateTime, NaiveDateTime, Utc};
use common::{OrderId, WorkId};
use reservation_store::Reservation;
use serde::Serialize;
use thiserror::Error;

/// Format the agreed trade time must match.
const TRADE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A user-facing validation failure, carrying the field-specific message
/// the input form displays. These never propagate as hard errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("buyer name must be 1 to 5 letters or digits")]
    BuyerName,

    #[error("phone number must be exactly 11 digits")]
    Phone,

    #[error("address must be 1 to 20 letters or digits")]
    Address,

    #[error("trade time must match the format YYYY-MM-DD HH:MM")]
    TradeTime,

    #[error("order id must be a non-empty string of digits")]
    OrderId,
}

/// Validated buyer details for a booking.
///
/// Immutable; constructed once per request through [`BuyerInfo::parse`] and
/// only ever embedded in a [`Reservation`], never persisted standalone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuyerInfo {
    buyer_name: String,
    phone: String,
    address: String,
    trade_time: String,
}

impl BuyerInfo {
    /// Validates the raw form fields and builds a `BuyerInfo`.
    ///
    /// Rules, first failure reported:
    /// - name: 1 to 5 characters, Unicode letters (incl. CJK) or digits
    /// - phone: exactly 11 ASCII digits
    /// - address: 1 to 20 characters, same charset as the name
    /// - trade time: `YYYY-MM-DD HH:MM` with valid calendar values
    pub fn parse(
        buyer_name: &str,
        phone: &str,
        address: &str,
        trade_time: &str,
    ) -> Result<Self, ValidationError> {
        if !char_count_in(buyer_name, 1, 5) || !is_alphanumeric(buyer_name) {
            return Err(ValidationError::BuyerName);
        }
        if phone.len() != 11 || !phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::Phone);
        }
        if !char_count_in(address, 1, 20) || !is_alphanumeric(address) {
            return Err(ValidationError::Address);
        }
        if NaiveDateTime::parse_from_str(trade_time, TRADE_TIME_FORMAT).is_err() {
            return Err(ValidationError::TradeTime);
        }

        Ok(Self {
            buyer_name: buyer_name.to_string(),
            phone: phone.to_string(),
            address: address.to_string(),
            trade_time: trade_time.to_string(),
        })
    }

    /// Returns the buyer's name.
    pub fn buyer_name(&self) -> &str {
        &self.buyer_name
    }

    /// Returns the buyer's phone number.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Returns the trade address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the agreed trade time.
    pub fn trade_time(&self) -> &str {
        &self.trade_time
    }

    /// Embeds this buyer into a reservation record.
    pub fn to_reservation(
        &self,
        order_id: OrderId,
        work_id: WorkId,
        created_at: DateTime<Utc>,
    ) -> Reservation {
        Reservation {
            order_id,
            work_id,
            buyer_name: self.buyer_name.clone(),
            buyer_phone: self.phone.clone(),
            trade_address: self.address.clone(),
            trade_time: self.trade_time.clone(),
            created_at,
        }
    }
}

/// Checks the syntax of an order id supplied by the lookup/cancel form.
///
/// Runs before any store access; a failure here is a user-facing message,
/// not a storage round trip.
pub fn parse_order_id(raw: &str) -> Result<OrderId, ValidationError> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::OrderId);
    }
    Ok(OrderId::new(raw))
}

fn char_count_in(s: &str, min: usize, max: usize) -> bool {
    let count = s.chars().count();
    count >= min && count <= max
}

fn is_alphanumeric(s: &str) -> bool {
    s.chars().all(char::is_alphanumeric)
}
