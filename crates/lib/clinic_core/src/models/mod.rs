//! Domain models.
//!
//! These are the records the store persists and the API serialises. Field
//! names on the wire follow the clinic's web client: camelCase keys and
//! `_id` for record ids.

pub mod auth;
pub mod booking;
pub mod catalog;
pub mod contact;
pub mod doctor;
pub mod payment;
pub mod user;

pub use auth::TokenClaims;
pub use booking::{Booking, NewBooking};
pub use catalog::{CatalogError, NewTreatment, Specialty, TreatmentOption};
pub use contact::{ContactMessage, NewContactMessage};
pub use doctor::{Doctor, NewDoctor};
pub use payment::{NewPayment, Payment, PaymentBooking};
pub use user::{NewUser, Role, User};
