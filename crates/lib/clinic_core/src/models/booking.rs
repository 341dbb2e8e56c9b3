//! Booking models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted appointment booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub appointment_date: String,
    pub treatment: String,
    pub patient: String,
    pub slot: String,
    pub email: String,
    pub phone: String,
    pub price: f64,
}

/// Booking payload as submitted by a patient.
///
/// Every field defaults to empty so that missing fields surface as
/// validation errors from the booking guard instead of body rejections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewBooking {
    pub appointment_date: String,
    pub treatment: String,
    pub patient: String,
    pub slot: String,
    pub email: String,
    pub phone: String,
    pub price: f64,
}

impl NewBooking {
    /// Turn the payload into a record with the given id and price.
    pub fn into_booking(self, id: Uuid, price: f64) -> Booking {
        Booking {
            id,
            appointment_date: self.appointment_date,
            treatment: self.treatment,
            patient: self.patient,
            slot: self.slot,
            email: self.email,
            phone: self.phone,
            price,
        }
    }
}
