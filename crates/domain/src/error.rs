//! Error policy for the booking path.
//!
//! Booking is the only workflow that propagates infrastructure failures to
//! the caller; the lookup, cancellation and password paths downgrade them
//! to user-facing messages instead. That asymmetry is part of the observable
//! contract and is kept deliberately.

use reservation_store::StoreError;
use thiserror::Error;

/// Hard failure raised by the booking workflow.
///
/// The top-level message is fixed; the originating failure is retained as
/// the source so callers can inspect what actually went wrong.
#[derive(Debug, Error)]
#[error("database operation failed")]
pub struct BookingError {
    #[source]
    pub cause: BookingCause,
}

/// The underlying cause of a booking failure.
#[derive(Debug, Error)]
pub enum BookingCause {
    /// The catalog has no reservable work.
    #[error("no catalog item available")]
    NoWorkAvailable,

    /// The store failed during one of the booking's reads or the insert.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<BookingCause> for BookingError {
    fn from(cause: BookingCause) -> Self {
        Self { cause }
    }
}

impl From<StoreError> for BookingError {
    fn from(e: StoreError) -> Self {
        Self {
            cause: BookingCause::Store(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn top_level_message_is_fixed() {
        let err = BookingError::from(BookingCause::NoWorkAvailable);
        assert_eq!(err.to_string(), "database operation failed");

        let err = BookingError::from(StoreError::Connection("refused".to_string()));
        assert_eq!(err.to_string(), "database operation failed");
    }

    #[test]
    fn cause_is_retained_as_source() {
        let err = BookingError::from(BookingCause::NoWorkAvailable);
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "no catalog item available");

        let err = BookingError::from(StoreError::Connection("refused".to_string()));
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "connection failure: refused");
    }
}
