//! Request handlers.

pub mod appointments;
pub mod auth;
pub mod bookings;
pub mod contact;
pub mod doctors;
pub mod health;
pub mod payments;
pub mod users;
