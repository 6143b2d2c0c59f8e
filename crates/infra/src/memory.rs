//! In-memory repository implementations.
//!
//! Default run mode and test backing. One shared database keeps all three
//! tables behind a single mutex so the cross-table constraints — the unique
//! customer email, the booking foreign keys — can be enforced with the same
//! failure categories Postgres reports. Not optimized for performance.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use velora_bookings::model::{Booking, BookingDraft};
use velora_bookings::repository::BookingRepository;
use velora_catalog::model::{Service, ServiceDraft};
use velora_catalog::repository::ServiceRepository;
use velora_core::{BookingId, CustomerId, ServiceId, StoreError, StoreResult};
use velora_customers::model::{Customer, CustomerPatch, CustomerStatus, Decision, NewCustomer};
use velora_customers::repository::CustomerRepository;

#[derive(Debug, Default)]
struct Tables {
    customers: BTreeMap<i64, Customer>,
    bookings: BTreeMap<i64, Booking>,
    services: BTreeMap<i64, Service>,
    next_customer_id: i64,
    next_booking_id: i64,
    next_service_id: i64,
}

/// Shared in-memory database. Cloning shares the underlying tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customers(&self) -> MemoryCustomerStore {
        MemoryCustomerStore { db: self.clone() }
    }

    pub fn bookings(&self) -> MemoryBookingStore {
        MemoryBookingStore { db: self.clone() }
    }

    pub fn services(&self) -> MemoryServiceStore {
        MemoryServiceStore { db: self.clone() }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| StoreError::other("lock poisoned"))
    }
}

#[derive(Debug, Clone)]
pub struct MemoryCustomerStore {
    db: MemoryDatabase,
}

#[async_trait]
impl CustomerRepository for MemoryCustomerStore {
    async fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
        Ok(self.db.lock()?.customers.get(&id.as_i64()).cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<Customer>> {
        // BTreeMap iteration is already ascending by id.
        Ok(self.db.lock()?.customers.values().cloned().collect())
    }

    async fn find_pending(&self) -> StoreResult<Vec<Customer>> {
        Ok(self
            .db
            .lock()?
            .customers
            .values()
            .filter(|c| c.status == CustomerStatus::Pending)
            .cloned()
            .collect())
    }

    async fn insert(&self, data: NewCustomer) -> StoreResult<Customer> {
        let mut tables = self.db.lock()?;

        if tables.customers.values().any(|c| c.email == data.email) {
            return Err(StoreError::unique_violation(Some(
                "customers_email_key".to_string(),
            )));
        }

        tables.next_customer_id += 1;
        let now = Utc::now();
        let customer = Customer {
            id: CustomerId::from_i64(tables.next_customer_id),
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            password_hash: data.password_hash,
            phone: data.phone,
            birth_date: data.birth_date,
            status: data.status,
            role: data.role,
            created_at: now,
            updated_at: now,
        };
        tables.customers.insert(customer.id.as_i64(), customer.clone());
        Ok(customer)
    }

    async fn update_status(
        &self,
        id: CustomerId,
        decision: Decision,
    ) -> StoreResult<Option<Customer>> {
        let mut tables = self.db.lock()?;
        Ok(tables.customers.get_mut(&id.as_i64()).map(|customer| {
            customer.status = decision.status();
            customer.updated_at = Utc::now();
            customer.clone()
        }))
    }

    async fn merge_update(
        &self,
        id: CustomerId,
        patch: CustomerPatch,
    ) -> StoreResult<Option<Customer>> {
        let mut tables = self.db.lock()?;
        Ok(tables.customers.get_mut(&id.as_i64()).map(|customer| {
            *customer = patch.apply_to(customer);
            customer.updated_at = Utc::now();
            customer.clone()
        }))
    }

    async fn delete(&self, id: CustomerId) -> StoreResult<bool> {
        let mut tables = self.db.lock()?;

        if tables
            .bookings
            .values()
            .any(|b| b.client_id.as_i64() == id.as_i64())
        {
            return Err(StoreError::foreign_key_violation(Some(
                "bookings_client_id_fkey".to_string(),
            )));
        }

        Ok(tables.customers.remove(&id.as_i64()).is_some())
    }

    async fn count_bookings_for(&self, id: CustomerId) -> StoreResult<i64> {
        let tables = self.db.lock()?;
        let count = tables
            .bookings
            .values()
            .filter(|b| b.client_id.as_i64() == id.as_i64())
            .count();
        Ok(count as i64)
    }
}

#[derive(Debug, Clone)]
pub struct MemoryBookingStore {
    db: MemoryDatabase,
}

#[async_trait]
impl BookingRepository for MemoryBookingStore {
    async fn insert(&self, draft: BookingDraft) -> StoreResult<Booking> {
        let mut tables = self.db.lock()?;

        check_booking_references(&tables, &draft)?;

        tables.next_booking_id += 1;
        let now = Utc::now();
        let booking = Booking {
            id: BookingId::from_i64(tables.next_booking_id),
            client_id: draft.client_id,
            client_name: draft.client_name,
            service_id: draft.service_id,
            booking_date: draft.booking_date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            booking_status: draft.booking_status,
            treatment_id: draft.treatment_id,
            created_at: now,
            updated_at: now,
        };
        tables.bookings.insert(booking.id.as_i64(), booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: BookingId) -> StoreResult<Option<Booking>> {
        Ok(self.db.lock()?.bookings.get(&id.as_i64()).cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<Booking>> {
        Ok(self.db.lock()?.bookings.values().cloned().collect())
    }

    async fn find_for_date(&self, date: NaiveDate) -> StoreResult<Vec<Booking>> {
        Ok(self
            .db
            .lock()?
            .bookings
            .values()
            .filter(|b| b.booking_date == date)
            .cloned()
            .collect())
    }

    async fn update(&self, id: BookingId, draft: BookingDraft) -> StoreResult<Option<Booking>> {
        let mut tables = self.db.lock()?;

        if !tables.bookings.contains_key(&id.as_i64()) {
            return Ok(None);
        }
        check_booking_references(&tables, &draft)?;

        Ok(tables.bookings.get_mut(&id.as_i64()).map(|booking| {
            booking.client_id = draft.client_id;
            booking.client_name = draft.client_name.clone();
            booking.service_id = draft.service_id;
            booking.booking_date = draft.booking_date;
            booking.start_time = draft.start_time.clone();
            booking.end_time = draft.end_time.clone();
            booking.booking_status = draft.booking_status;
            booking.treatment_id = draft.treatment_id;
            booking.updated_at = Utc::now();
            booking.clone()
        }))
    }

    async fn delete(&self, id: BookingId) -> StoreResult<bool> {
        Ok(self.db.lock()?.bookings.remove(&id.as_i64()).is_some())
    }
}

fn check_booking_references(tables: &Tables, draft: &BookingDraft) -> StoreResult<()> {
    if !tables.customers.contains_key(&draft.client_id.as_i64()) {
        return Err(StoreError::foreign_key_violation(Some(
            "bookings_client_id_fkey".to_string(),
        )));
    }
    if !tables.services.contains_key(&draft.service_id.as_i64()) {
        return Err(StoreError::foreign_key_violation(Some(
            "bookings_service_id_fkey".to_string(),
        )));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct MemoryServiceStore {
    db: MemoryDatabase,
}

#[async_trait]
impl ServiceRepository for MemoryServiceStore {
    async fn insert(&self, draft: ServiceDraft) -> StoreResult<Service> {
        let mut tables = self.db.lock()?;

        tables.next_service_id += 1;
        let now = Utc::now();
        let service = Service {
            id: ServiceId::from_i64(tables.next_service_id),
            name: draft.name,
            description: draft.description,
            duration: draft.duration,
            price: draft.price,
            image_url: draft.image_url,
            created_at: now,
            updated_at: now,
        };
        tables.services.insert(service.id.as_i64(), service.clone());
        Ok(service)
    }

    async fn find_by_id(&self, id: ServiceId) -> StoreResult<Option<Service>> {
        Ok(self.db.lock()?.services.get(&id.as_i64()).cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<Service>> {
        Ok(self.db.lock()?.services.values().cloned().collect())
    }

    async fn update(&self, id: ServiceId, draft: ServiceDraft) -> StoreResult<Option<Service>> {
        let mut tables = self.db.lock()?;
        Ok(tables.services.get_mut(&id.as_i64()).map(|service| {
            service.name = draft.name.clone();
            service.description = draft.description.clone();
            service.duration = draft.duration;
            service.price = draft.price;
            service.image_url = draft.image_url.clone();
            service.updated_at = Utc::now();
            service.clone()
        }))
    }

    async fn delete(&self, id: ServiceId) -> StoreResult<bool> {
        let mut tables = self.db.lock()?;

        if tables
            .services
            .contains_key(&id.as_i64())
            && tables
                .bookings
                .values()
                .any(|b| b.service_id.as_i64() == id.as_i64())
        {
            return Err(StoreError::foreign_key_violation(Some(
                "bookings_service_id_fkey".to_string(),
            )));
        }

        Ok(tables.services.remove(&id.as_i64()).is_some())
    }
}
