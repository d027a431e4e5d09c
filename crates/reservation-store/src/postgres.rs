use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use common::{OrderId, WorkId};

use crate::record::{Reservation, Work, status};
use crate::store::{MerchantStore, ReservationStore, TradeStore, WorkCatalog};
use crate::{Result, StoreError};

/// PostgreSQL-backed store implementation.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_work(row: PgRow) -> Result<Work> {
        Ok(Work {
            id: WorkId::new(row.try_get("work_id")?),
            name: row.try_get("work_name")?,
            price: row.try_get("work_price")?,
        })
    }
}

#[async_trait]
impl ReservationStore for PostgresStore {
    async fn max_order_id(&self) -> Result<Option<OrderId>> {
        let max: Option<String> =
            sqlx::query_scalar("SELECT MAX(order_id) FROM reservation")
                .fetch_one(&self.pool)
                .await?;

        Ok(max.map(OrderId::new))
    }

    async fn insert_reservation(&self, reservation: &Reservation) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reservation (order_id, work_id, buyer_name, buyer_phone, trade_address, trade_time, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(reservation.order_id.as_str())
        .bind(reservation.work_id.as_i32())
        .bind(&reservation.buyer_name)
        .bind(&reservation.buyer_phone)
        .bind(&reservation.trade_address)
        .bind(&reservation.trade_time)
        .bind(reservation.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // A primary-key violation means a concurrent booking won the
            // race for this order id.
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some("reservation_pkey")
            {
                return StoreError::DuplicateOrderId(reservation.order_id.clone());
            }
            StoreError::Database(e)
        })?;

        Ok(())
    }

    async fn find_work_id(&self, order_id: &OrderId) -> Result<Option<WorkId>> {
        let work_id: Option<i32> =
            sqlx::query_scalar("SELECT work_id FROM reservation WHERE order_id = $1")
                .bind(order_id.as_str())
                .fetch_optional(&self.pool)
                .await?;

        Ok(work_id.map(WorkId::new))
    }
}

#[async_trait]
impl WorkCatalog for PostgresStore {
    async fn latest_work_id(&self) -> Result<Option<WorkId>> {
        let max: Option<i32> = sqlx::query_scalar("SELECT MAX(work_id) FROM work")
            .fetch_one(&self.pool)
            .await?;

        Ok(max.map(WorkId::new))
    }

    async fn find_work(&self, work_id: WorkId) -> Result<Option<Work>> {
        let row: Option<PgRow> = sqlx::query(
            "SELECT work_id, work_name, work_price FROM work WHERE work_id = $1",
        )
        .bind(work_id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_work).transpose()
    }

    async fn work_status(&self, work_id: WorkId) -> Result<Option<String>> {
        let work_status: Option<String> =
            sqlx::query_scalar("SELECT work_status FROM work WHERE work_id = $1")
                .bind(work_id.as_i32())
                .fetch_optional(&self.pool)
                .await?;

        Ok(work_status)
    }
}

#[async_trait]
impl TradeStore for PostgresStore {
    async fn in_trade(&self, order_id: &OrderId) -> Result<bool> {
        let in_trade: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM trade WHERE order_id = $1 AND status = $2)",
        )
        .bind(order_id.as_str())
        .bind(status::ACTIVE)
        .fetch_one(&self.pool)
        .await?;

        Ok(in_trade)
    }

    async fn cancel_active_trade(&self, order_id: &OrderId) -> Result<u64> {
        let result = sqlx::query("UPDATE trade SET status = $1 WHERE order_id = $2 AND status = $3")
            .bind(status::CANCELLED)
            .bind(order_id.as_str())
            .bind(status::ACTIVE)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl MerchantStore for PostgresStore {
    async fn update_password(&self, merchant_name: &str, new_password: &str) -> Result<u64> {
        let result =
            sqlx::query("UPDATE merchant SET merchant_password = $1 WHERE merchant_name = $2")
                .bind(new_password)
                .bind(merchant_name)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }
}
