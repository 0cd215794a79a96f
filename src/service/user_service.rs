use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::AuthService,
    domain::{LoginRequest, NewUser, RegisterRequest, UserProfile, UserRole},
    error::{AppError, Result},
    repository::UserRepository,
};

/// A sanitized user together with a freshly issued bearer token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub user: UserProfile,
    pub token: String,
}

pub struct UserService {
    repo: Arc<dyn UserRepository>,
    auth: Arc<AuthService>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, auth: Arc<AuthService>) -> Self {
        Self { repo, auth }
    }

    /// Registration always produces a CUSTOMER account.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthenticatedUser> {
        request.validate()?;

        if self.repo.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let password_hash = AuthService::hash_password(&request.password)?;

        let user = self
            .repo
            .create(NewUser {
                name: request.name,
                email: request.email,
                password_hash,
                phone: request.phone,
                address: request.address,
                city: None,
                role: UserRole::Customer,
            })
            .await?;

        let token = self.auth.issue_token(&user)?;

        Ok(AuthenticatedUser {
            user: user.into(),
            token,
        })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthenticatedUser> {
        request.validate()?;

        let user = self
            .repo
            .find_by_email(&request.email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !user.is_active {
            return Err(AppError::Forbidden);
        }

        if !AuthService::verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        let token = self.auth.issue_token(&user)?;

        Ok(AuthenticatedUser {
            user: user.into(),
            token,
        })
    }

    pub async fn get_profile(&self, id: Uuid) -> Result<UserProfile> {
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }
}
