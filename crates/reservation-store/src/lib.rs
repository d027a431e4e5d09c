pub mod config;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod store;

pub use common::{OrderId, WorkId};
pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use record::{Reservation, Work, status};
pub use store::{MerchantStore, ReservationStore, TradeStore, WorkCatalog};
