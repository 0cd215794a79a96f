use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Payment, PaymentStatus},
    error::{AppError, Result},
    repository::PaymentRepository,
};

// Database row struct that matches the SQLite schema
#[derive(FromRow)]
struct PaymentRow {
    id: String,
    booking_id: String,
    user_id: String,
    amount: f64,
    status: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqlitePaymentRepository {
    pool: SqlitePool,
}

impl SqlitePaymentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_payment(row: PaymentRow) -> Result<Payment> {
        Ok(Payment {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            booking_id: Uuid::parse_str(&row.booking_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            user_id: Uuid::parse_str(&row.user_id).map_err(|e| AppError::Database(e.to_string()))?,
            amount: row.amount,
            status: PaymentStatus::parse(&row.status).ok_or_else(|| {
                AppError::Database(format!("Invalid payment status: {}", row.status))
            })?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, booking_id, user_id, amount, status, created_at, updated_at
            FROM payments
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_payment(r)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PaymentRepository for SqlitePaymentRepository {
    async fn find_by_booking(&self, booking_id: Uuid) -> Result<Option<Payment>> {
        let booking_id_str = booking_id.to_string();
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, booking_id, user_id, amount, status, created_at, updated_at
            FROM payments
            WHERE booking_id = ?
            "#,
        )
        .bind(booking_id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_payment(r)?)),
            None => Ok(None),
        }
    }

    async fn update_status(&self, id: Uuid, status: PaymentStatus) -> Result<Payment> {
        let existing = self.find_by_id(id).await?;
        if existing.is_none() {
            return Err(AppError::NotFound("Payment not found".to_string()));
        }

        let now = Utc::now().naive_utc();
        let id_str = id.to_string();

        sqlx::query("UPDATE payments SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(now)
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated payment".to_string())
        })
    }

    async fn total_completed(&self) -> Result<f64> {
        let total = sqlx::query_scalar::<_, Option<f64>>(
            "SELECT SUM(amount) FROM payments WHERE status = ?",
        )
        .bind(PaymentStatus::Completed.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(total.unwrap_or(0.0))
    }
}
