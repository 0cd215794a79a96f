use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{CreateServiceRequest, Service, ServiceType, UpdateServiceRequest},
    error::{AppError, Result},
    repository::ServiceRepository,
};

// Database row struct that matches the SQLite schema. The included and
// excluded lists are stored as JSON arrays of strings.
#[derive(FromRow)]
struct ServiceRow {
    id: String,
    name: String,
    service_type: String,
    starting_price: f64,
    description: String,
    long_description: Option<String>,
    included: Option<String>,
    excluded: Option<String>,
    image: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteServiceRepository {
    pool: SqlitePool,
}

impl SqliteServiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_service(row: ServiceRow) -> Result<Service> {
        Ok(Service {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            name: row.name,
            service_type: ServiceType::parse(&row.service_type).ok_or_else(|| {
                AppError::Database(format!("Invalid service type: {}", row.service_type))
            })?,
            starting_price: row.starting_price,
            description: row.description,
            long_description: row.long_description,
            included: parse_string_list(row.included)?,
            excluded: parse_string_list(row.excluded)?,
            image: row.image,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

fn parse_string_list(raw: Option<String>) -> Result<Option<Vec<String>>> {
    match raw {
        Some(s) => serde_json::from_str(&s)
            .map(Some)
            .map_err(|e| AppError::Database(format!("Invalid list column: {}", e))),
        None => Ok(None),
    }
}

fn encode_string_list(list: &Option<Vec<String>>) -> Result<Option<String>> {
    match list {
        Some(items) => serde_json::to_string(items)
            .map(Some)
            .map_err(|e| AppError::Database(format!("Failed to encode list column: {}", e))),
        None => Ok(None),
    }
}

const SERVICE_COLUMNS: &str = "id, name, service_type, starting_price, description, long_description, included, excluded, image, created_at, updated_at";

#[async_trait]
impl ServiceRepository for SqliteServiceRepository {
    async fn create(&self, request: CreateServiceRequest) -> Result<Service> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();
        let id_str = id.to_string();
        let included = encode_string_list(&request.included)?;
        let excluded = encode_string_list(&request.excluded)?;

        sqlx::query(
            r#"
            INSERT INTO services (
                id, name, service_type, starting_price, description,
                long_description, included, excluded, image, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&request.name)
        .bind(request.service_type.as_str())
        .bind(request.starting_price)
        .bind(&request.description)
        .bind(&request.long_description)
        .bind(&included)
        .bind(&excluded)
        .bind(&request.image)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created service".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Service>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {} FROM services WHERE id = ?",
            SERVICE_COLUMNS
        ))
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_service(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_type(&self, service_type: ServiceType) -> Result<Option<Service>> {
        let row = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {} FROM services WHERE service_type = ?",
            SERVICE_COLUMNS
        ))
        .bind(service_type.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_service(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, service_type: Option<ServiceType>) -> Result<Vec<Service>> {
        let rows = match service_type {
            Some(ty) => {
                sqlx::query_as::<_, ServiceRow>(&format!(
                    "SELECT {} FROM services WHERE service_type = ? ORDER BY name",
                    SERVICE_COLUMNS
                ))
                .bind(ty.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, ServiceRow>(&format!(
                    "SELECT {} FROM services ORDER BY name",
                    SERVICE_COLUMNS
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_service).collect()
    }

    async fn update(&self, id: Uuid, update: UpdateServiceRequest) -> Result<Service> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;

        let now = Utc::now().naive_utc();
        let id_str = id.to_string();

        let service_type = update.service_type.unwrap_or(existing.service_type);
        let included = encode_string_list(&update.included.or(existing.included))?;
        let excluded = encode_string_list(&update.excluded.or(existing.excluded))?;

        sqlx::query(
            r#"
            UPDATE services
            SET name = COALESCE(?, name),
                service_type = ?,
                starting_price = COALESCE(?, starting_price),
                description = COALESCE(?, description),
                long_description = COALESCE(?, long_description),
                included = ?,
                excluded = ?,
                image = COALESCE(?, image),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&update.name)
        .bind(service_type.as_str())
        .bind(update.starting_price)
        .bind(&update.description)
        .bind(&update.long_description)
        .bind(&included)
        .bind(&excluded)
        .bind(&update.image)
        .bind(now)
        .bind(&id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated service".to_string())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn upsert_by_type(&self, request: CreateServiceRequest) -> Result<Service> {
        match self.find_by_type(request.service_type).await? {
            Some(existing) => {
                self.update(
                    existing.id,
                    UpdateServiceRequest {
                        name: Some(request.name),
                        service_type: Some(request.service_type),
                        starting_price: Some(request.starting_price),
                        description: Some(request.description),
                        long_description: request.long_description,
                        included: request.included,
                        excluded: request.excluded,
                        image: request.image,
                    },
                )
                .await
            }
            None => self.create(request).await,
        }
    }

    async fn count_bookings(&self, id: Uuid) -> Result<i64> {
        let id_str = id.to_string();
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings WHERE service_id = ?")
                .bind(&id_str)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count)
    }
}
