//! Payment record models.
//!
//! Payments are stored as submitted; settlement happens elsewhere.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::new_id;

/// Snapshot of the booking a payment was made for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentBooking {
    #[serde(rename = "_id")]
    pub id: String,
    pub appointment_date: String,
    pub treatment: String,
    pub patient: String,
    pub slot: String,
    pub email: String,
    pub phone: String,
    pub price: f64,
}

/// A stored payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub payment_method_id: String,
    pub booking: PaymentBooking,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewPayment {
    pub payment_method_id: String,
    pub booking: PaymentBooking,
}

impl NewPayment {
    pub fn into_payment(self) -> Payment {
        Payment {
            id: new_id(),
            payment_method_id: self.payment_method_id,
            booking: self.booking,
        }
    }
}
