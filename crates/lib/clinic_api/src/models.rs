//! API request and response shapes.
//!
//! Keys are camelCase to match the clinic's web client.

use clinic_core::models::Booking;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error body returned for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// `?date=` on the availability endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// `?data=` on the store-computed availability endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataQuery {
    pub data: Option<String>,
}

/// `?email=` on the booking listing and token endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

/// `GET /jwt` response. `access_token` is empty when issuance was refused.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
}

/// A freshly stored booking: the record's own fields plus the insert
/// acknowledgement.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreated {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
    #[serde(flatten)]
    pub booking: Booking,
}

/// A booking that was not stored because an equivalent one exists.
#[derive(Debug, Clone, Serialize)]
pub struct BookingDeclined {
    pub acknowledged: bool,
    pub message: String,
}

/// `POST /bookings` response. Both variants are sent with 200.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BookingResponse {
    Created(BookingCreated),
    Declined(BookingDeclined),
}

/// Generic insert acknowledgement.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    pub acknowledged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl InsertResponse {
    pub fn inserted(id: Uuid) -> Self {
        Self {
            acknowledged: true,
            inserted_id: Some(id),
            message: None,
        }
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            acknowledged: false,
            inserted_id: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// `GET /users/admin/{email}` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatusResponse {
    pub is_admin: bool,
}

/// `GET /health` response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub store_connected: bool,
}
