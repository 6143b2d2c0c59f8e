//! Catalog operations exposed to the transport layer.

use std::sync::Arc;

use velora_core::{AppError, AppResult, ServiceId, StoreError};

use crate::model::{self, Service, ServiceInput};
use crate::repository::ServiceRepository;

const RESOURCE: &str = "service";

#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn ServiceRepository>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn ServiceRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, input: &ServiceInput) -> AppResult<Service> {
        let draft = model::validate_input(input)?;

        let service = self.repository.insert(draft).await.map_err(internal)?;
        tracing::info!(service_id = %service.id, "catalog entry created");
        Ok(service)
    }

    pub async fn get(&self, id: ServiceId) -> AppResult<Service> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or(AppError::not_found(RESOURCE))
    }

    pub async fn list_all(&self) -> AppResult<Vec<Service>> {
        self.repository.find_all().await.map_err(internal)
    }

    pub async fn update(&self, id: ServiceId, input: &ServiceInput) -> AppResult<Service> {
        let draft = model::validate_input(input)?;

        self.repository
            .update(id, draft)
            .await
            .map_err(internal)?
            .ok_or(AppError::not_found(RESOURCE))
    }

    pub async fn delete(&self, id: ServiceId) -> AppResult<()> {
        match self.repository.delete(id).await {
            Ok(true) => {
                tracing::info!(service_id = %id, "catalog entry deleted");
                Ok(())
            }
            Ok(false) => Err(AppError::not_found(RESOURCE)),
            Err(StoreError::ForeignKeyViolation { .. }) => {
                Err(AppError::conflict("service has associated bookings"))
            }
            Err(other) => Err(internal(other)),
        }
    }
}

fn internal(err: StoreError) -> AppError {
    AppError::internal(err.to_string())
}
