//! Treatment catalog models.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::ids::new_id;

/// A bookable treatment with its ordered slot labels.
///
/// Slot labels are unique within one option. When returned from an
/// availability lookup, `slots` holds only the labels still free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TreatmentOption {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub slots: Vec<String>,
    pub price: f64,
}

/// A catalog entry that cannot be stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("treatment name is required")]
    MissingName,

    #[error("{treatment} lists slot '{slot}' more than once")]
    DuplicateSlot { treatment: String, slot: String },
}

impl TreatmentOption {
    /// Check the name is present and no slot label repeats.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::MissingName);
        }
        let mut seen = HashSet::with_capacity(self.slots.len());
        for slot in &self.slots {
            if !seen.insert(slot.as_str()) {
                return Err(CatalogError::DuplicateSlot {
                    treatment: self.name.clone(),
                    slot: slot.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Catalog entry as supplied by an administrator (no id yet).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewTreatment {
    pub name: String,
    #[serde(default)]
    pub slots: Vec<String>,
    #[serde(default)]
    pub price: f64,
}

impl NewTreatment {
    pub fn into_option(self) -> Result<TreatmentOption, CatalogError> {
        let option = TreatmentOption {
            id: new_id(),
            name: self.name,
            slots: self.slots,
            price: self.price,
        };
        option.validate()?;
        Ok(option)
    }
}

/// Name-only projection of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialty {
    pub name: String,
}
