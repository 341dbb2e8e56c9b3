//! Service layer between handlers and `clinic_core`.

pub mod auth;
pub mod availability;
