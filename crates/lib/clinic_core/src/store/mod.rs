//! Record store abstraction.
//!
//! `ClinicStore` is the single seam between domain logic and persistence.
//! It is built once at startup and handed to every component that needs it
//! as an `Arc<dyn ClinicStore>`. Two backends are provided: [`PgStore`] for
//! PostgreSQL and [`MemoryStore`] for tests and local development.

pub mod memory;
pub mod pg;

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    Booking, CatalogError, ContactMessage, Doctor, Payment, Role, Specialty, TreatmentOption,
    User,
};

pub use memory::MemoryStore;
pub use pg::PgStore;

/// Record store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Rejected catalog entry: {0}")]
    Catalog(#[from] CatalogError),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Which uniqueness rule a rejected booking insert ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingConflict {
    /// The patient already holds a booking for this date and treatment.
    SamePatient,
    /// Somebody else already holds this slot.
    SlotTaken,
}

/// Outcome of a conditional booking insert.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingInsert {
    Inserted(Booking),
    Rejected(BookingConflict),
}

/// Outcome of a conditional user insert keyed on email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInsert {
    Inserted(User),
    AlreadyExists,
}

/// Counters reported by an update-with-upsert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<Uuid>,
}

impl UpdateOutcome {
    pub fn modified(changed: bool) -> Self {
        Self {
            matched_count: 1,
            modified_count: u64::from(changed),
            ..Self::default()
        }
    }

    pub fn upserted(id: Uuid) -> Self {
        Self {
            upserted_count: 1,
            upserted_id: Some(id),
            ..Self::default()
        }
    }
}

/// Persistence operations required by the clinic backend.
///
/// Conditional writes (`insert_booking_if_absent`, `insert_user_if_absent`)
/// must be atomic with respect to their uniqueness keys: two concurrent
/// callers with the same key never both observe `Inserted`.
#[async_trait]
pub trait ClinicStore: Send + Sync {
    /// Cheap connectivity probe.
    async fn ping(&self) -> StoreResult<()>;

    // -- catalog ------------------------------------------------------------

    async fn list_treatments(&self) -> StoreResult<Vec<TreatmentOption>>;

    async fn list_specialties(&self) -> StoreResult<Vec<Specialty>>;

    async fn find_treatment(&self, name: &str) -> StoreResult<Option<TreatmentOption>>;

    /// Insert or replace a catalog entry keyed on its name. Entries that
    /// fail [`TreatmentOption::validate`] are rejected with
    /// [`StoreError::Catalog`].
    async fn upsert_treatment(&self, option: TreatmentOption) -> StoreResult<TreatmentOption>;

    /// Catalog with booked slots for `date` already removed, computed by
    /// the store itself. Slot order is preserved and no label is repeated.
    async fn available_treatments(&self, date: &str) -> StoreResult<Vec<TreatmentOption>>;

    // -- bookings -----------------------------------------------------------

    async fn bookings_on(&self, date: &str) -> StoreResult<Vec<Booking>>;

    async fn bookings_for(&self, email: &str) -> StoreResult<Vec<Booking>>;

    async fn find_booking(&self, id: Uuid) -> StoreResult<Option<Booking>>;

    /// Insert unless a booking already exists for the same
    /// (email, appointment date, treatment) or (appointment date, treatment,
    /// slot).
    async fn insert_booking_if_absent(&self, booking: Booking) -> StoreResult<BookingInsert>;

    // -- users --------------------------------------------------------------

    async fn list_users(&self) -> StoreResult<Vec<User>>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn insert_user_if_absent(&self, user: User) -> StoreResult<UserInsert>;

    /// Set a user's role. With `upsert`, an unknown id creates a bare record.
    async fn set_user_role(&self, id: Uuid, role: Role, upsert: bool)
    -> StoreResult<UpdateOutcome>;

    // -- doctors, contact, payments -----------------------------------------

    async fn list_doctors(&self) -> StoreResult<Vec<Doctor>>;

    async fn insert_doctor(&self, doctor: Doctor) -> StoreResult<Doctor>;

    /// Returns the number of deleted records (0 or 1).
    async fn delete_doctor(&self, id: Uuid) -> StoreResult<u64>;

    async fn insert_contact(&self, message: ContactMessage) -> StoreResult<ContactMessage>;

    async fn insert_payment(&self, payment: Payment) -> StoreResult<Payment>;
}
