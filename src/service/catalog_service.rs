use std::sync::Arc;

use uuid::Uuid;

use crate::{
    domain::{CreateServiceRequest, Service, ServiceType, UpdateServiceRequest},
    error::{AppError, Result},
    repository::ServiceRepository,
};

pub struct CatalogService {
    repo: Arc<dyn ServiceRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn ServiceRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, service_type: Option<ServiceType>) -> Result<Vec<Service>> {
        self.repo.list(service_type).await
    }

    pub async fn create(&self, request: CreateServiceRequest) -> Result<Service> {
        if request.starting_price < 0.0 {
            return Err(AppError::field_error(
                "startingPrice",
                "Starting price cannot be negative",
            ));
        }

        if self.repo.find_by_type(request.service_type).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "A service of type {} already exists",
                request.service_type.as_str()
            )));
        }

        self.repo.create(request).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateServiceRequest) -> Result<Service> {
        if let Some(price) = request.starting_price {
            if price < 0.0 {
                return Err(AppError::field_error(
                    "startingPrice",
                    "Starting price cannot be negative",
                ));
            }
        }

        self.repo.update(id, request).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let _service = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;

        // A service with bookings on record cannot be removed without
        // orphaning them.
        let usage_count = self.repo.count_bookings(id).await?;
        if usage_count > 0 {
            return Err(AppError::Conflict(format!(
                "Cannot delete service: {} bookings reference it",
                usage_count
            )));
        }

        self.repo.delete(id).await
    }
}
