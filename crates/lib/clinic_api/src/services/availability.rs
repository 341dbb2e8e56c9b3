//! Catalog availability for a date.

use clinic_core::availability::compute_availability;
use clinic_core::models::TreatmentOption;
use clinic_core::store::ClinicStore;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Require a non-blank date query value.
pub fn require_date(raw: Option<String>, param: &str) -> AppResult<String> {
    raw.map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{param} query parameter is required")))
}

/// Fetch the catalog and the day's bookings concurrently and subtract.
pub async fn options_for_date(
    store: &dyn ClinicStore,
    date: &str,
) -> AppResult<Vec<TreatmentOption>> {
    let (catalog, bookings) =
        tokio::try_join!(store.list_treatments(), store.bookings_on(date))?;
    debug!(
        date,
        options = catalog.len(),
        bookings = bookings.len(),
        "computing availability"
    );
    Ok(compute_availability(date, catalog, &bookings))
}
