//! In-memory record store.
//!
//! All tables live behind one `RwLock`. Conditional writes take the write
//! lock for the whole check-and-insert, which makes them atomic per key.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    BookingConflict, BookingInsert, ClinicStore, StoreResult, UpdateOutcome, UserInsert,
};
use crate::availability::compute_availability;
use crate::models::{
    Booking, ContactMessage, Doctor, Payment, Role, Specialty, TreatmentOption, User,
};

#[derive(Debug, Default)]
struct Tables {
    treatments: Vec<TreatmentOption>,
    bookings: Vec<Booking>,
    users: Vec<User>,
    doctors: Vec<Doctor>,
    contacts: Vec<ContactMessage>,
    payments: Vec<Payment>,
}

/// Store backed by process memory. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a treatment catalog.
    pub fn with_treatments(treatments: Vec<TreatmentOption>) -> Self {
        Self {
            tables: RwLock::new(Tables {
                treatments,
                ..Tables::default()
            }),
        }
    }

    /// Number of stored bookings.
    pub async fn booking_count(&self) -> usize {
        self.tables.read().await.bookings.len()
    }

    /// Number of stored payments.
    pub async fn payment_count(&self) -> usize {
        self.tables.read().await.payments.len()
    }

    /// Number of stored contact messages.
    pub async fn contact_count(&self) -> usize {
        self.tables.read().await.contacts.len()
    }
}

#[async_trait]
impl ClinicStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_treatments(&self) -> StoreResult<Vec<TreatmentOption>> {
        Ok(self.tables.read().await.treatments.clone())
    }

    async fn list_specialties(&self) -> StoreResult<Vec<Specialty>> {
        let tables = self.tables.read().await;
        Ok(tables
            .treatments
            .iter()
            .map(|t| Specialty {
                name: t.name.clone(),
            })
            .collect())
    }

    async fn find_treatment(&self, name: &str) -> StoreResult<Option<TreatmentOption>> {
        let tables = self.tables.read().await;
        Ok(tables.treatments.iter().find(|t| t.name == name).cloned())
    }

    async fn upsert_treatment(&self, option: TreatmentOption) -> StoreResult<TreatmentOption> {
        option.validate()?;
        let mut tables = self.tables.write().await;
        match tables.treatments.iter_mut().find(|t| t.name == option.name) {
            Some(existing) => {
                existing.slots = option.slots;
                existing.price = option.price;
                Ok(existing.clone())
            }
            None => {
                tables.treatments.push(option.clone());
                Ok(option)
            }
        }
    }

    async fn available_treatments(&self, date: &str) -> StoreResult<Vec<TreatmentOption>> {
        let tables = self.tables.read().await;
        Ok(compute_availability(
            date,
            tables.treatments.clone(),
            &tables.bookings,
        ))
    }

    async fn bookings_on(&self, date: &str) -> StoreResult<Vec<Booking>> {
        let tables = self.tables.read().await;
        Ok(tables
            .bookings
            .iter()
            .filter(|b| b.appointment_date == date)
            .cloned()
            .collect())
    }

    async fn bookings_for(&self, email: &str) -> StoreResult<Vec<Booking>> {
        let tables = self.tables.read().await;
        Ok(tables
            .bookings
            .iter()
            .filter(|b| b.email == email)
            .cloned()
            .collect())
    }

    async fn find_booking(&self, id: Uuid) -> StoreResult<Option<Booking>> {
        let tables = self.tables.read().await;
        Ok(tables.bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn insert_booking_if_absent(&self, booking: Booking) -> StoreResult<BookingInsert> {
        let mut tables = self.tables.write().await;
        let same_patient = tables.bookings.iter().any(|b| {
            b.email == booking.email
                && b.appointment_date == booking.appointment_date
                && b.treatment == booking.treatment
        });
        if same_patient {
            return Ok(BookingInsert::Rejected(BookingConflict::SamePatient));
        }
        let slot_taken = tables.bookings.iter().any(|b| {
            b.appointment_date == booking.appointment_date
                && b.treatment == booking.treatment
                && b.slot == booking.slot
        });
        if slot_taken {
            return Ok(BookingInsert::Rejected(BookingConflict::SlotTaken));
        }
        tables.bookings.push(booking.clone());
        Ok(BookingInsert::Inserted(booking))
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.tables.read().await.users.clone())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn insert_user_if_absent(&self, user: User) -> StoreResult<UserInsert> {
        let mut tables = self.tables.write().await;
        let exists = user.email.is_some() && tables.users.iter().any(|u| u.email == user.email);
        if exists {
            return Ok(UserInsert::AlreadyExists);
        }
        tables.users.push(user.clone());
        Ok(UserInsert::Inserted(user))
    }

    async fn set_user_role(
        &self,
        id: Uuid,
        role: Role,
        upsert: bool,
    ) -> StoreResult<UpdateOutcome> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            let changed = user.role != role;
            user.role = role;
            return Ok(UpdateOutcome::modified(changed));
        }
        if !upsert {
            return Ok(UpdateOutcome::default());
        }
        tables.users.push(User {
            id,
            name: None,
            email: None,
            role,
        });
        Ok(UpdateOutcome::upserted(id))
    }

    async fn list_doctors(&self) -> StoreResult<Vec<Doctor>> {
        Ok(self.tables.read().await.doctors.clone())
    }

    async fn insert_doctor(&self, doctor: Doctor) -> StoreResult<Doctor> {
        self.tables.write().await.doctors.push(doctor.clone());
        Ok(doctor)
    }

    async fn delete_doctor(&self, id: Uuid) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.doctors.len();
        tables.doctors.retain(|d| d.id != id);
        Ok((before - tables.doctors.len()) as u64)
    }

    async fn insert_contact(&self, message: ContactMessage) -> StoreResult<ContactMessage> {
        self.tables.write().await.contacts.push(message.clone());
        Ok(message)
    }

    async fn insert_payment(&self, payment: Payment) -> StoreResult<Payment> {
        self.tables.write().await.payments.push(payment.clone());
        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::new_id;
    use crate::models::{CatalogError, NewUser};
    use crate::store::StoreError;

    fn booking(email: &str, slot: &str) -> Booking {
        Booking {
            id: new_id(),
            appointment_date: "2024-01-01".into(),
            treatment: "Cleaning".into(),
            patient: "Pat".into(),
            slot: slot.into(),
            email: email.into(),
            phone: String::new(),
            price: 50.0,
        }
    }

    #[tokio::test]
    async fn conditional_booking_insert_reports_conflict_kind() {
        let store = MemoryStore::new();
        let first = store
            .insert_booking_if_absent(booking("a@x.com", "9am"))
            .await
            .unwrap();
        assert!(matches!(first, BookingInsert::Inserted(_)));

        let again = store
            .insert_booking_if_absent(booking("a@x.com", "10am"))
            .await
            .unwrap();
        assert_eq!(again, BookingInsert::Rejected(BookingConflict::SamePatient));

        let other = store
            .insert_booking_if_absent(booking("b@x.com", "9am"))
            .await
            .unwrap();
        assert_eq!(other, BookingInsert::Rejected(BookingConflict::SlotTaken));

        assert_eq!(store.booking_count().await, 1);
    }

    #[tokio::test]
    async fn set_user_role_updates_then_reports_no_change() {
        let store = MemoryStore::new();
        let user = NewUser {
            name: "Ann".into(),
            email: "ann@x.com".into(),
        }
        .into_user();
        let id = user.id;
        store.insert_user_if_absent(user).await.unwrap();

        let first = store.set_user_role(id, Role::Admin, true).await.unwrap();
        assert_eq!(first, UpdateOutcome::modified(true));

        let second = store.set_user_role(id, Role::Admin, true).await.unwrap();
        assert_eq!(second.matched_count, 1);
        assert_eq!(second.modified_count, 0);
    }

    #[tokio::test]
    async fn set_user_role_upserts_unknown_id() {
        let store = MemoryStore::new();
        let id = new_id();

        let skipped = store.set_user_role(id, Role::Admin, false).await.unwrap();
        assert_eq!(skipped, UpdateOutcome::default());
        assert!(store.list_users().await.unwrap().is_empty());

        let outcome = store.set_user_role(id, Role::Admin, true).await.unwrap();
        assert_eq!(outcome.upserted_id, Some(id));
        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, Role::Admin);
        assert!(users[0].email.is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_not_inserted_twice() {
        let store = MemoryStore::new();
        let make = || {
            NewUser {
                name: "Ann".into(),
                email: "ann@x.com".into(),
            }
            .into_user()
        };
        assert!(matches!(
            store.insert_user_if_absent(make()).await.unwrap(),
            UserInsert::Inserted(_)
        ));
        assert_eq!(
            store.insert_user_if_absent(make()).await.unwrap(),
            UserInsert::AlreadyExists
        );
    }

    #[tokio::test]
    async fn upsert_treatment_rejects_repeated_slot() {
        let store = MemoryStore::new();
        let err = store
            .upsert_treatment(TreatmentOption {
                id: new_id(),
                name: "Cleaning".into(),
                slots: vec!["9am".into(), "9am".into()],
                price: 50.0,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Catalog(CatalogError::DuplicateSlot { .. })
        ));
        assert!(store.list_treatments().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upsert_treatment_replaces_by_name() {
        let store = MemoryStore::new();
        let first = TreatmentOption {
            id: new_id(),
            name: "Cleaning".into(),
            slots: vec!["9am".into()],
            price: 50.0,
        };
        let kept_id = first.id;
        store.upsert_treatment(first).await.unwrap();
        let replaced = store
            .upsert_treatment(TreatmentOption {
                id: new_id(),
                name: "Cleaning".into(),
                slots: vec!["9am".into(), "10am".into()],
                price: 60.0,
            })
            .await
            .unwrap();
        assert_eq!(replaced.id, kept_id);
        assert_eq!(store.list_treatments().await.unwrap().len(), 1);
        assert_eq!(
            store.list_specialties().await.unwrap(),
            vec![Specialty {
                name: "Cleaning".into()
            }]
        );
    }
}
