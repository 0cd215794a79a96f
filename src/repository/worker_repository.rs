use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{
        CreateWorkerRequest, ServiceType, UpdateWorkerRequest, Worker, WorkerStatus,
        WorkerWithBookings,
    },
    error::{AppError, Result},
    repository::WorkerRepository,
};

// Database row struct that matches the SQLite schema. service_types is
// a JSON array of type names.
#[derive(FromRow)]
struct WorkerRow {
    id: String,
    name: String,
    email: String,
    phone: String,
    service_types: String,
    hourly_rate: f64,
    status: String,
    bio: Option<String>,
    experience_years: Option<i64>,
    avg_rating: Option<f64>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

#[derive(FromRow)]
struct WorkerCountRow {
    id: String,
    name: String,
    email: String,
    phone: String,
    service_types: String,
    hourly_rate: f64,
    status: String,
    bio: Option<String>,
    experience_years: Option<i64>,
    avg_rating: Option<f64>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    booking_count: i64,
}

pub struct SqliteWorkerRepository {
    pool: SqlitePool,
}

impl SqliteWorkerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_worker(row: WorkerRow) -> Result<Worker> {
        Ok(Worker {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            name: row.name,
            email: row.email,
            phone: row.phone,
            service_types: parse_service_types(&row.service_types)?,
            hourly_rate: row.hourly_rate,
            status: WorkerStatus::parse(&row.status)
                .ok_or_else(|| AppError::Database(format!("Invalid worker status: {}", row.status)))?,
            bio: row.bio,
            experience_years: row.experience_years,
            avg_rating: row.avg_rating,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

fn parse_service_types(raw: &str) -> Result<Vec<ServiceType>> {
    let names: Vec<String> = serde_json::from_str(raw)
        .map_err(|e| AppError::Database(format!("Invalid service_types column: {}", e)))?;

    names
        .iter()
        .map(|name| {
            ServiceType::parse(name)
                .ok_or_else(|| AppError::Database(format!("Invalid service type: {}", name)))
        })
        .collect()
}

fn encode_service_types(types: &[ServiceType]) -> Result<String> {
    let names: Vec<&str> = types.iter().map(|t| t.as_str()).collect();
    serde_json::to_string(&names)
        .map_err(|e| AppError::Database(format!("Failed to encode service_types: {}", e)))
}

const WORKER_COLUMNS: &str = "id, name, email, phone, service_types, hourly_rate, status, bio, experience_years, avg_rating, created_at, updated_at";

#[async_trait]
impl WorkerRepository for SqliteWorkerRepository {
    async fn create(&self, request: CreateWorkerRequest) -> Result<Worker> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();
        let id_str = id.to_string();
        let service_types = encode_service_types(&request.service_types)?;

        // New workers start INACTIVE until an admin activates them.
        sqlx::query(
            r#"
            INSERT INTO workers (
                id, name, email, phone, service_types, hourly_rate,
                status, bio, experience_years, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&service_types)
        .bind(request.hourly_rate)
        .bind(WorkerStatus::Inactive.as_str())
        .bind(&request.bio)
        .bind(request.experience_years)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created worker".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Worker>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, WorkerRow>(&format!(
            "SELECT {} FROM workers WHERE id = ?",
            WORKER_COLUMNS
        ))
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_worker(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, status: Option<WorkerStatus>) -> Result<Vec<WorkerWithBookings>> {
        let base = r#"
            SELECT w.id, w.name, w.email, w.phone, w.service_types, w.hourly_rate,
                   w.status, w.bio, w.experience_years, w.avg_rating,
                   w.created_at, w.updated_at,
                   COUNT(b.id) AS booking_count
            FROM workers w
            LEFT JOIN bookings b ON b.worker_id = w.id
        "#;

        let rows = match status {
            Some(s) => {
                sqlx::query_as::<_, WorkerCountRow>(&format!(
                    "{} WHERE w.status = ? GROUP BY w.id ORDER BY w.created_at DESC",
                    base
                ))
                .bind(s.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, WorkerCountRow>(&format!(
                    "{} GROUP BY w.id ORDER BY w.created_at DESC",
                    base
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(|row| {
                let booking_count = row.booking_count;
                let worker = Self::row_to_worker(WorkerRow {
                    id: row.id,
                    name: row.name,
                    email: row.email,
                    phone: row.phone,
                    service_types: row.service_types,
                    hourly_rate: row.hourly_rate,
                    status: row.status,
                    bio: row.bio,
                    experience_years: row.experience_years,
                    avg_rating: row.avg_rating,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                })?;
                Ok(WorkerWithBookings {
                    worker,
                    booking_count,
                })
            })
            .collect()
    }

    async fn update(&self, id: Uuid, update: UpdateWorkerRequest) -> Result<Worker> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Worker not found".to_string()))?;

        let now = Utc::now().naive_utc();
        let id_str = id.to_string();

        let status = update.status.unwrap_or(existing.status);
        let service_types = encode_service_types(
            update
                .service_types
                .as_deref()
                .unwrap_or(&existing.service_types),
        )?;

        sqlx::query(
            r#"
            UPDATE workers
            SET name = COALESCE(?, name),
                phone = COALESCE(?, phone),
                service_types = ?,
                hourly_rate = COALESCE(?, hourly_rate),
                status = ?,
                bio = COALESCE(?, bio),
                experience_years = COALESCE(?, experience_years),
                avg_rating = COALESCE(?, avg_rating),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&update.name)
        .bind(&update.phone)
        .bind(&service_types)
        .bind(update.hourly_rate)
        .bind(status.as_str())
        .bind(&update.bio)
        .bind(update.experience_years)
        .bind(update.avg_rating)
        .bind(now)
        .bind(&id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated worker".to_string())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        sqlx::query("DELETE FROM workers WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn count_by_status(&self, status: WorkerStatus) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM workers WHERE status = ?")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count)
    }
}
