use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::{CreateWorkerRequest, UpdateWorkerRequest, Worker, WorkerStatus, WorkerWithBookings},
    error::{AppError, Result},
    repository::WorkerRepository,
};

pub struct WorkerService {
    repo: Arc<dyn WorkerRepository>,
}

impl WorkerService {
    pub fn new(repo: Arc<dyn WorkerRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, status: Option<WorkerStatus>) -> Result<Vec<WorkerWithBookings>> {
        self.repo.list(status).await
    }

    pub async fn create(&self, request: CreateWorkerRequest) -> Result<Worker> {
        request.validate()?;

        if request.service_types.is_empty() {
            return Err(AppError::field_error(
                "serviceType",
                "At least one service type is required",
            ));
        }

        self.repo.create(request).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateWorkerRequest) -> Result<Worker> {
        request.validate()?;

        if let Some(ref types) = request.service_types {
            if types.is_empty() {
                return Err(AppError::field_error(
                    "serviceType",
                    "At least one service type is required",
                ));
            }
        }

        self.repo.update(id, request).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let _worker = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Worker not found".to_string()))?;

        self.repo.delete(id).await
    }
}
