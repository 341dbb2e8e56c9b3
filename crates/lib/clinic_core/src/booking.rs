//! Booking guard.
//!
//! Validates a booking request against the catalog and writes it with a
//! single conditional insert, so concurrent duplicates cannot both land.
//! A duplicate is an expected outcome, reported as [`BookingOutcome::Conflict`]
//! rather than an error.

use thiserror::Error;
use tracing::info;

use crate::ids::new_id;
use crate::models::{Booking, NewBooking};
use crate::store::{BookingConflict, BookingInsert, ClinicStore, StoreError};

/// Booking errors.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result of a booking attempt that reached the store.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    Created(Booking),
    Conflict {
        reason: BookingConflict,
        message: String,
    },
}

/// Validate and store a booking.
///
/// The price is taken from the catalog entry, not from the request.
pub async fn create_booking(
    store: &dyn ClinicStore,
    request: NewBooking,
) -> Result<BookingOutcome, BookingError> {
    validate_shape(&request)?;

    let option = store
        .find_treatment(&request.treatment)
        .await?
        .ok_or_else(|| {
            BookingError::Validation(format!("Unknown treatment '{}'", request.treatment))
        })?;
    if !option.slots.iter().any(|s| *s == request.slot) {
        return Err(BookingError::Validation(format!(
            "'{}' is not a slot of {}",
            request.slot, option.name
        )));
    }

    let booking = request.into_booking(new_id(), option.price);
    match store.insert_booking_if_absent(booking.clone()).await? {
        BookingInsert::Inserted(created) => {
            info!(
                id = %created.id,
                date = %created.appointment_date,
                treatment = %created.treatment,
                slot = %created.slot,
                "booking created"
            );
            Ok(BookingOutcome::Created(created))
        }
        BookingInsert::Rejected(reason) => {
            info!(date = %booking.appointment_date, treatment = %booking.treatment, ?reason, "booking declined");
            Ok(BookingOutcome::Conflict {
                reason,
                message: conflict_message(reason, &booking),
            })
        }
    }
}

fn validate_shape(request: &NewBooking) -> Result<(), BookingError> {
    let required = [
        ("appointmentDate", &request.appointment_date),
        ("email", &request.email),
        ("treatment", &request.treatment),
        ("slot", &request.slot),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(BookingError::Validation(format!("{field} is required")));
        }
    }
    Ok(())
}

fn conflict_message(reason: BookingConflict, booking: &Booking) -> String {
    match reason {
        BookingConflict::SamePatient => {
            format!("You already have a booking on {}", booking.appointment_date)
        }
        BookingConflict::SlotTaken => format!(
            "{} is already booked for {} on {}",
            booking.slot, booking.treatment, booking.appointment_date
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::TreatmentOption;
    use crate::store::MemoryStore;

    fn catalog_store() -> MemoryStore {
        MemoryStore::with_treatments(vec![TreatmentOption {
            id: new_id(),
            name: "Cleaning".into(),
            slots: vec!["9am".into(), "10am".into()],
            price: 50.0,
        }])
    }

    fn request(email: &str, slot: &str) -> NewBooking {
        NewBooking {
            appointment_date: "2024-01-01".into(),
            treatment: "Cleaning".into(),
            patient: "Pat".into(),
            slot: slot.into(),
            email: email.into(),
            phone: "555-0100".into(),
            price: 1.0,
        }
    }

    #[tokio::test]
    async fn second_identical_booking_is_declined() {
        let store = catalog_store();

        let first = create_booking(&store, request("a@x.com", "9am")).await.unwrap();
        let created = match first {
            BookingOutcome::Created(created) => created,
            other => panic!("expected Created, got {other:?}"),
        };
        assert_eq!(created.email, "a@x.com");
        assert_eq!(created.price, 50.0);

        let second = create_booking(&store, request("a@x.com", "9am")).await.unwrap();
        assert_eq!(
            second,
            BookingOutcome::Conflict {
                reason: BookingConflict::SamePatient,
                message: "You already have a booking on 2024-01-01".into(),
            }
        );
        assert_eq!(store.booking_count().await, 1);
    }

    #[tokio::test]
    async fn taken_slot_is_declined_for_other_patient() {
        let store = catalog_store();
        create_booking(&store, request("a@x.com", "9am")).await.unwrap();

        let other = create_booking(&store, request("b@x.com", "9am")).await.unwrap();
        assert!(matches!(
            other,
            BookingOutcome::Conflict {
                reason: BookingConflict::SlotTaken,
                ..
            }
        ));

        let free = create_booking(&store, request("b@x.com", "10am")).await.unwrap();
        assert!(matches!(free, BookingOutcome::Created(_)));
        assert_eq!(store.booking_count().await, 2);
    }

    #[tokio::test]
    async fn missing_fields_fail_validation() {
        let store = catalog_store();
        for broken in [
            NewBooking {
                appointment_date: String::new(),
                ..request("a@x.com", "9am")
            },
            NewBooking {
                email: "  ".into(),
                ..request("a@x.com", "9am")
            },
            NewBooking {
                treatment: String::new(),
                ..request("a@x.com", "9am")
            },
        ] {
            assert!(matches!(
                create_booking(&store, broken).await,
                Err(BookingError::Validation(_))
            ));
        }
        assert_eq!(store.booking_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_treatment_or_slot_fails_validation() {
        let store = catalog_store();
        let unknown_treatment = NewBooking {
            treatment: "Surgery".into(),
            ..request("a@x.com", "9am")
        };
        assert!(matches!(
            create_booking(&store, unknown_treatment).await,
            Err(BookingError::Validation(_))
        ));
        assert!(matches!(
            create_booking(&store, request("a@x.com", "3pm")).await,
            Err(BookingError::Validation(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_duplicates_store_exactly_one() {
        let store = Arc::new(catalog_store());
        let attempts = (0..32).map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                create_booking(store.as_ref(), request("a@x.com", "9am")).await
            })
        });
        let results = futures::future::join_all(attempts).await;

        let created = results
            .into_iter()
            .map(|r| r.expect("task").expect("booking"))
            .filter(|o| matches!(o, BookingOutcome::Created(_)))
            .count();
        assert_eq!(created, 1);
        assert_eq!(store.booking_count().await, 1);
    }
}
