//! Order lifecycle workflows for the work reservation system.
//!
//! This crate provides the core booking engine:
//! - Field validation producing immutable `BuyerInfo` values
//! - Pluggable order-id allocation
//! - The booking, status-lookup, cancellation and password-change workflows
//! - The `Forward` outcome consumed by the request-handler collaborator
//!
//! Storage and session state are external collaborators: workflows receive
//! a store implementation and an explicit `SessionContext`, never ambient
//! state.

pub mod booking;
pub mod cancel;
pub mod error;
pub mod forward;
pub mod order_id;
pub mod password;
pub mod session;
pub mod status;
pub mod validate;

pub use booking::{BookingRequest, BookingService};
pub use cancel::{CancellationResult, CancellationService};
pub use error::{BookingCause, BookingError};
pub use forward::{Forward, keys, views};
pub use order_id::{OrderIdStrategy, SequentialIdStrategy};
pub use password::{PasswordChangeOutcome, PasswordService};
pub use session::SessionContext;
pub use status::{OrderStatusFacts, OrderStatusService, StatusView};
pub use validate::{BuyerInfo, ValidationError, parse_order_id};
