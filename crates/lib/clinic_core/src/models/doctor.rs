//! Doctor roster models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::new_id;

/// A doctor on the clinic roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Doctor {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub img: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewDoctor {
    pub name: String,
    pub email: String,
    pub img: String,
}

impl NewDoctor {
    pub fn into_doctor(self) -> Doctor {
        Doctor {
            id: new_id(),
            name: self.name,
            email: self.email,
            img: self.img,
        }
    }
}
