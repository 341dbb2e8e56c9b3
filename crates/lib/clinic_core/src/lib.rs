//! # clinic_core
//!
//! Core domain logic for the clinic booking backend: token issue and
//! verification, role gating, slot availability, the booking guard, and the
//! record store those pieces share.

pub mod auth;
pub mod availability;
pub mod booking;
pub mod ids;
pub mod migrate;
pub mod models;
pub mod store;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
