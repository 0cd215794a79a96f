use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{
        Booking, BookingDetail, BookingStatus, CustomerSummary, Payment, PaymentStatus,
        PaymentSummary, ServiceSummary, ServiceType, UpdateBookingRequest, WorkerSummary,
    },
    error::{AppError, Result},
    repository::BookingRepository,
};

// Database row struct that matches the SQLite schema
#[derive(FromRow)]
struct BookingRow {
    id: String,
    user_id: String,
    service_id: String,
    worker_id: Option<String>,
    scheduled_at: NaiveDateTime,
    duration_hours: i64,
    guest_count: Option<i64>,
    address: String,
    notes: Option<String>,
    base_price: f64,
    final_price: f64,
    status: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

// Booking joined with its service, owner, worker and payment.
#[derive(FromRow)]
struct BookingDetailRow {
    id: String,
    user_id: String,
    service_id: String,
    worker_id: Option<String>,
    scheduled_at: NaiveDateTime,
    duration_hours: i64,
    guest_count: Option<i64>,
    address: String,
    notes: Option<String>,
    base_price: f64,
    final_price: f64,
    status: String,
    created_at: NaiveDateTime,
    service_name: String,
    service_type: String,
    customer_name: String,
    customer_email: String,
    customer_phone: Option<String>,
    worker_name: Option<String>,
    worker_phone: Option<String>,
    payment_status: Option<String>,
    payment_amount: Option<f64>,
}

const DETAIL_QUERY: &str = r#"
    SELECT b.id, b.user_id, b.service_id, b.worker_id, b.scheduled_at,
           b.duration_hours, b.guest_count, b.address, b.notes,
           b.base_price, b.final_price, b.status, b.created_at,
           s.name AS service_name, s.service_type,
           u.name AS customer_name, u.email AS customer_email, u.phone AS customer_phone,
           w.name AS worker_name, w.phone AS worker_phone,
           p.status AS payment_status, p.amount AS payment_amount
    FROM bookings b
    JOIN services s ON s.id = b.service_id
    JOIN users u ON u.id = b.user_id
    LEFT JOIN workers w ON w.id = b.worker_id
    LEFT JOIN payments p ON p.booking_id = b.id
"#;

pub struct SqliteBookingRepository {
    pool: SqlitePool,
}

impl SqliteBookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_booking(row: BookingRow) -> Result<Booking> {
        Ok(Booking {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            user_id: Uuid::parse_str(&row.user_id).map_err(|e| AppError::Database(e.to_string()))?,
            service_id: Uuid::parse_str(&row.service_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            worker_id: parse_optional_uuid(row.worker_id)?,
            scheduled_at: DateTime::from_naive_utc_and_offset(row.scheduled_at, Utc),
            duration_hours: row.duration_hours,
            guest_count: row.guest_count,
            address: row.address,
            notes: row.notes,
            base_price: row.base_price,
            final_price: row.final_price,
            status: parse_status(&row.status)?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    fn row_to_detail(row: BookingDetailRow) -> Result<BookingDetail> {
        let worker = match (&row.worker_id, row.worker_name, row.worker_phone) {
            (Some(id), Some(name), Some(phone)) => Some(WorkerSummary {
                id: Uuid::parse_str(id).map_err(|e| AppError::Database(e.to_string()))?,
                name,
                phone,
            }),
            _ => None,
        };

        let payment = match (row.payment_status, row.payment_amount) {
            (Some(status), Some(amount)) => Some(PaymentSummary {
                status: PaymentStatus::parse(&status).ok_or_else(|| {
                    AppError::Database(format!("Invalid payment status: {}", status))
                })?,
                amount,
            }),
            _ => None,
        };

        Ok(BookingDetail {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            user_id: Uuid::parse_str(&row.user_id).map_err(|e| AppError::Database(e.to_string()))?,
            service_id: Uuid::parse_str(&row.service_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            worker_id: parse_optional_uuid(row.worker_id)?,
            scheduled_at: DateTime::from_naive_utc_and_offset(row.scheduled_at, Utc),
            duration_hours: row.duration_hours,
            guest_count: row.guest_count,
            address: row.address,
            notes: row.notes,
            base_price: row.base_price,
            final_price: row.final_price,
            status: parse_status(&row.status)?,
            service: ServiceSummary {
                name: row.service_name,
                service_type: ServiceType::parse(&row.service_type).ok_or_else(|| {
                    AppError::Database(format!("Invalid service type: {}", row.service_type))
                })?,
            },
            customer: CustomerSummary {
                name: row.customer_name,
                email: row.customer_email,
                phone: row.customer_phone,
            },
            worker,
            payment,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }
}

fn parse_optional_uuid(raw: Option<String>) -> Result<Option<Uuid>> {
    match raw {
        Some(s) => Uuid::parse_str(&s)
            .map(Some)
            .map_err(|e| AppError::Database(e.to_string())),
        None => Ok(None),
    }
}

fn parse_status(s: &str) -> Result<BookingStatus> {
    BookingStatus::parse(s)
        .ok_or_else(|| AppError::Database(format!("Invalid booking status: {}", s)))
}

#[async_trait]
impl BookingRepository for SqliteBookingRepository {
    async fn create_with_payment(&self, booking: &Booking, payment: &Payment) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, user_id, service_id, worker_id, scheduled_at,
                duration_hours, guest_count, address, notes,
                base_price, final_price, status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(booking.id.to_string())
        .bind(booking.user_id.to_string())
        .bind(booking.service_id.to_string())
        .bind(booking.worker_id.map(|id| id.to_string()))
        .bind(booking.scheduled_at.naive_utc())
        .bind(booking.duration_hours)
        .bind(booking.guest_count)
        .bind(&booking.address)
        .bind(&booking.notes)
        .bind(booking.base_price)
        .bind(booking.final_price)
        .bind(booking.status.as_str())
        .bind(booking.created_at.naive_utc())
        .bind(booking.updated_at.naive_utc())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO payments (
                id, booking_id, user_id, amount, status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(payment.id.to_string())
        .bind(payment.booking_id.to_string())
        .bind(payment.user_id.to_string())
        .bind(payment.amount)
        .bind(payment.status.as_str())
        .bind(payment.created_at.naive_utc())
        .bind(payment.updated_at.naive_utc())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, user_id, service_id, worker_id, scheduled_at,
                   duration_hours, guest_count, address, notes,
                   base_price, final_price, status, created_at, updated_at
            FROM bookings
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_booking(r)?)),
            None => Ok(None),
        }
    }

    async fn find_detail(&self, id: Uuid) -> Result<Option<BookingDetail>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, BookingDetailRow>(&format!("{} WHERE b.id = ?", DETAIL_QUERY))
            .bind(id_str)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_detail(r)?)),
            None => Ok(None),
        }
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<BookingDetail>> {
        let user_id_str = user_id.to_string();
        let rows = sqlx::query_as::<_, BookingDetailRow>(&format!(
            "{} WHERE b.user_id = ? ORDER BY b.scheduled_at DESC",
            DETAIL_QUERY
        ))
        .bind(user_id_str)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_detail).collect()
    }

    async fn list_all(&self, status: Option<BookingStatus>) -> Result<Vec<BookingDetail>> {
        let rows = match status {
            Some(s) => {
                sqlx::query_as::<_, BookingDetailRow>(&format!(
                    "{} WHERE b.status = ? ORDER BY b.scheduled_at DESC",
                    DETAIL_QUERY
                ))
                .bind(s.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, BookingDetailRow>(&format!(
                    "{} ORDER BY b.scheduled_at DESC",
                    DETAIL_QUERY
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_detail).collect()
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<BookingDetail>> {
        let rows = sqlx::query_as::<_, BookingDetailRow>(&format!(
            "{} ORDER BY b.created_at DESC LIMIT ?",
            DETAIL_QUERY
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_detail).collect()
    }

    async fn update(&self, id: Uuid, update: &UpdateBookingRequest) -> Result<Booking> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        let status = update.status.unwrap_or(existing.status);
        // Outer None leaves the assignment untouched; Some(None) clears it.
        let worker_id = match update.worker_id {
            Some(assignment) => assignment,
            None => existing.worker_id,
        };

        let now = Utc::now().naive_utc();
        let id_str = id.to_string();

        sqlx::query(
            r#"
            UPDATE bookings
            SET status = ?,
                worker_id = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(status.as_str())
        .bind(worker_id.map(|w| w.to_string()))
        .bind(now)
        .bind(&id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated booking".to_string())
        })
    }

    async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count)
    }
}
