//! Contact form models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::new_id;

/// A message left through the public contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContactMessage {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl NewContactMessage {
    pub fn into_message(self) -> ContactMessage {
        ContactMessage {
            id: new_id(),
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
        }
    }
}
