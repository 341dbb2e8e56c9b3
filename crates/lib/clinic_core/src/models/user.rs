//! Identity models.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::new_id;

/// Coarse authorization level of an identity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// A stored identity.
///
/// `email` is only absent on records created by the admin-elevation upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
}

/// Registration payload. Any `role` the client sends is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    /// Build a record with the default `user` role.
    pub fn into_user(self) -> User {
        User {
            id: new_id(),
            name: Some(self.name),
            email: Some(self.email),
            role: Role::User,
        }
    }
}
