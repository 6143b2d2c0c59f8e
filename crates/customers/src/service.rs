//! Customer lifecycle orchestration.

use std::sync::Arc;

use velora_core::{AppError, AppResult, CustomerId, StoreError};

use crate::model::{Customer, CustomerRole, CustomerStatus, Decision, NewCustomer};
use crate::repository::CustomerRepository;
use crate::validate::{self, CreateCustomerInput, UpdateCustomerInput};

/// Bcrypt work factor applied to incoming passwords.
const HASH_COST: u32 = 10;

const RESOURCE: &str = "customer";

/// Drives customer records through their lifecycle: creation, the one-shot
/// approval decision, merge-on-update, and deletion under referential
/// constraints.
///
/// Business-rule failures are raised directly as taxonomy errors. Exactly two
/// store categories are re-classified — a unique violation on insert becomes
/// a conflict on the email, a foreign key violation on delete becomes a
/// conflict on the bookings reference — and everything else the store reports
/// surfaces as internal.
#[derive(Clone)]
pub struct CustomerService {
    repository: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    /// Validate, hash the password, and insert a new `pending` customer.
    ///
    /// The plaintext password is moved into the hashing task and dropped
    /// there; it is never logged or persisted.
    pub async fn create(&self, input: &CreateCustomerInput) -> AppResult<Customer> {
        let valid = validate::validate_create(input)?;

        let password_hash = hash_password(valid.password).await?;

        let data = NewCustomer {
            first_name: valid.first_name,
            last_name: valid.last_name,
            email: valid.email,
            password_hash,
            phone: valid.phone,
            birth_date: valid.birth_date,
            status: CustomerStatus::Pending,
            role: CustomerRole::Customer,
        };

        let customer = self.repository.insert(data).await.map_err(|err| match err {
            StoreError::UniqueViolation { .. } => AppError::conflict("email already registered"),
            other => internal(other),
        })?;

        let email_domain = customer.email.split_once('@').map(|(_, d)| d).unwrap_or("");
        tracing::info!(customer_id = %customer.id, email_domain, "customer created");
        Ok(customer)
    }

    /// Apply the one-shot approval decision to a pending customer.
    pub async fn approve_or_reject(
        &self,
        id: CustomerId,
        decision: Decision,
    ) -> AppResult<Customer> {
        let customer = self.load(id).await?;

        if customer.status != CustomerStatus::Pending {
            return Err(AppError::validation("customer is not pending"));
        }

        // The row can vanish between the read and the write; the store's
        // answer wins.
        let updated = self
            .repository
            .update_status(id, decision)
            .await
            .map_err(internal)?
            .ok_or(AppError::not_found(RESOURCE))?;

        tracing::info!(customer_id = %id, status = %updated.status, "customer status updated");
        Ok(updated)
    }

    /// Overlay the supplied mutable fields onto the existing record.
    ///
    /// Fields absent from the input keep their current value exactly; email,
    /// password, status, and role never change through this path.
    pub async fn partial_update(
        &self,
        id: CustomerId,
        input: &UpdateCustomerInput,
    ) -> AppResult<Customer> {
        self.load(id).await?;

        let patch = validate::validate_update(input)?;

        let updated = self
            .repository
            .merge_update(id, patch)
            .await
            .map_err(internal)?
            .ok_or(AppError::not_found(RESOURCE))?;

        tracing::debug!(customer_id = %id, "customer updated");
        Ok(updated)
    }

    /// Remove a customer, unless bookings still reference it.
    pub async fn delete(&self, id: CustomerId) -> AppResult<()> {
        self.load(id).await?;

        match self.repository.delete(id).await {
            Ok(_) => {
                tracing::info!(customer_id = %id, "customer deleted");
                Ok(())
            }
            Err(StoreError::ForeignKeyViolation { .. }) => {
                // Advisory only; the store's rejection is the conflict signal.
                if let Ok(count) = self.repository.count_bookings_for(id).await {
                    tracing::debug!(customer_id = %id, bookings = count, "delete blocked");
                }
                Err(AppError::conflict("customer has associated bookings"))
            }
            Err(other) => Err(internal(other)),
        }
    }

    pub async fn get(&self, id: CustomerId) -> AppResult<Customer> {
        self.load(id).await
    }

    pub async fn list_all(&self) -> AppResult<Vec<Customer>> {
        self.repository.find_all().await.map_err(internal)
    }

    pub async fn list_pending(&self) -> AppResult<Vec<Customer>> {
        self.repository.find_pending().await.map_err(internal)
    }

    async fn load(&self, id: CustomerId) -> AppResult<Customer> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or(AppError::not_found(RESOURCE))
    }
}

/// Hash on a blocking worker so the runtime never stalls on bcrypt.
async fn hash_password(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, HASH_COST))
        .await
        .map_err(|err| AppError::internal(format!("hashing task failed: {err}")))?
        .map_err(|err| AppError::internal(format!("password hashing failed: {err}")))
}

fn internal(err: StoreError) -> AppError {
    AppError::internal(err.to_string())
}
