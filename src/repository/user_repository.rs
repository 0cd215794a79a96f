use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{CustomerAccount, NewUser, User, UserRole},
    error::{AppError, Result},
    repository::UserRepository,
};

// Database row struct that matches the SQLite schema
#[derive(FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    password_hash: String,
    phone: Option<String>,
    address: Option<String>,
    city: Option<String>,
    role: String,
    is_active: i32,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

#[derive(FromRow)]
struct CustomerAccountRow {
    id: String,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    city: Option<String>,
    is_active: i32,
    booking_count: i64,
    created_at: NaiveDateTime,
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: UserRow) -> Result<User> {
        Ok(User {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            phone: row.phone,
            address: row.address,
            city: row.city,
            role: UserRole::parse(&row.role)
                .ok_or_else(|| AppError::Database(format!("Invalid user role: {}", row.role)))?,
            is_active: row.is_active != 0,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

const USER_COLUMNS: &str = "id, name, email, password_hash, phone, address, city, role, is_active, created_at, updated_at";

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: NewUser) -> Result<User> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();
        let id_str = id.to_string();

        sqlx::query(
            r#"
            INSERT INTO users (
                id, name, email, password_hash, phone, address, city,
                role, is_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(&user.city)
        .bind(user.role.as_str())
        .bind(1i32)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created user".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = ?",
            USER_COLUMNS
        ))
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_user(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = ?",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_user(r)?)),
            None => Ok(None),
        }
    }

    async fn list_customers(&self) -> Result<Vec<CustomerAccount>> {
        let rows = sqlx::query_as::<_, CustomerAccountRow>(
            r#"
            SELECT u.id, u.name, u.email, u.phone, u.address, u.city,
                   u.is_active, u.created_at,
                   COUNT(b.id) AS booking_count
            FROM users u
            LEFT JOIN bookings b ON b.user_id = u.id
            WHERE u.role = 'CUSTOMER'
            GROUP BY u.id
            ORDER BY u.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(|row| {
                Ok(CustomerAccount {
                    id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
                    name: row.name,
                    email: row.email,
                    phone: row.phone,
                    address: row.address,
                    city: row.city,
                    is_active: row.is_active != 0,
                    booking_count: row.booking_count,
                    created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
                })
            })
            .collect()
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<User> {
        let existing = self.find_by_id(id).await?;
        if existing.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let now = Utc::now().naive_utc();
        let id_str = id.to_string();

        sqlx::query("UPDATE users SET is_active = ?, updated_at = ? WHERE id = ?")
            .bind(if is_active { 1i32 } else { 0i32 })
            .bind(now)
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated user".to_string())
        })
    }

    async fn count_by_role(&self, role: UserRole) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = ?")
            .bind(role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count)
    }
}
