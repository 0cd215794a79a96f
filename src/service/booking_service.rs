use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    config::BookingConfig,
    domain::{
        pricing, rules, Booking, BookingDetail, BookingStatus, CreateBookingRequest, Payment,
        PaymentStatus, UpdateBookingRequest, WorkerStatus,
    },
    error::{AppError, Result},
    repository::{BookingRepository, ServiceRepository, WorkerRepository},
};

pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    services: Arc<dyn ServiceRepository>,
    workers: Arc<dyn WorkerRepository>,
    config: BookingConfig,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        services: Arc<dyn ServiceRepository>,
        workers: Arc<dyn WorkerRepository>,
        config: BookingConfig,
    ) -> Self {
        Self {
            bookings,
            services,
            workers,
            config,
        }
    }

    /// Create a booking for a customer. Prices the request against the
    /// service's configured rate and writes the booking with its
    /// payment record atomically.
    pub async fn create_booking(
        &self,
        user_id: Uuid,
        request: CreateBookingRequest,
    ) -> Result<BookingDetail> {
        let service = self
            .services
            .find_by_id(request.service_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;

        let scheduled_at = rules::validate_booking(
            service.service_type,
            &request.date,
            &request.time,
            request.duration_hours,
            request.guest_count,
            &request.address,
            Utc::now().date_naive(),
        )
        .map_err(AppError::Validation)?;

        let quote = pricing::quote(
            service.service_type,
            service.starting_price,
            request.duration_hours,
            request.guest_count,
        );

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            user_id,
            service_id: service.id,
            worker_id: None,
            scheduled_at: DateTime::from_naive_utc_and_offset(scheduled_at, Utc),
            duration_hours: request.duration_hours,
            guest_count: request.guest_count,
            address: request.address,
            notes: request.notes,
            base_price: quote.base_price,
            final_price: quote.final_price,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let payment = Payment {
            id: Uuid::new_v4(),
            booking_id: booking.id,
            user_id,
            amount: quote.final_price,
            status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        self.bookings.create_with_payment(&booking, &payment).await?;

        tracing::info!(
            booking_id = %booking.id,
            service_type = service.service_type.as_str(),
            final_price = booking.final_price,
            "booking created"
        );

        self.bookings.find_detail(booking.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created booking".to_string())
        })
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<BookingDetail>> {
        self.bookings.list_for_user(user_id).await
    }

    /// Owner-scoped fetch: a customer can only read their own booking.
    pub async fn get_for_user(&self, id: Uuid, user_id: Uuid) -> Result<BookingDetail> {
        let detail = self
            .bookings
            .find_detail(id)
            .await?
            .filter(|b| b.user_id == user_id)
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        Ok(detail)
    }

    pub async fn list_all(&self, status: Option<BookingStatus>) -> Result<Vec<BookingDetail>> {
        self.bookings.list_all(status).await
    }

    /// Admin mutation of status and/or worker assignment.
    pub async fn update_booking(
        &self,
        id: Uuid,
        update: UpdateBookingRequest,
    ) -> Result<BookingDetail> {
        let existing = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if let Some(next) = update.status {
            if self.config.enforce_status_transitions
                && !existing.status.can_transition_to(next)
            {
                return Err(AppError::field_error(
                    "status",
                    format!(
                        "Cannot move a {} booking to {}",
                        existing.status.as_str(),
                        next.as_str()
                    ),
                ));
            }
        }

        if let Some(Some(worker_id)) = update.worker_id {
            self.check_assignable(worker_id, existing.service_id).await?;
        }

        self.bookings.update(id, &update).await?;

        self.bookings.find_detail(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated booking".to_string())
        })
    }

    /// A worker must exist, be ACTIVE, and offer the booking's service
    /// type before it can be assigned.
    async fn check_assignable(&self, worker_id: Uuid, service_id: Uuid) -> Result<()> {
        let worker = self
            .workers
            .find_by_id(worker_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Worker not found".to_string()))?;

        if worker.status != WorkerStatus::Active {
            return Err(AppError::field_error(
                "workerId",
                "Worker is not active and cannot be assigned",
            ));
        }

        let service = self
            .services
            .find_by_id(service_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;

        if !worker.covers(service.service_type) {
            return Err(AppError::field_error(
                "workerId",
                format!(
                    "Worker does not offer {} services",
                    service.service_type.as_str()
                ),
            ));
        }

        Ok(())
    }
}
