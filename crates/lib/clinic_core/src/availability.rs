//! Slot availability.
//!
//! Given the treatment catalog and the bookings for a date, work out which
//! slots of each treatment are still free.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::models::{Booking, TreatmentOption};

/// Remove booked slots from every catalog entry.
///
/// Only bookings whose `appointment_date` equals `date` count. The remaining
/// slots keep the catalog's order, entries with nothing left stay in the
/// result with an empty slot list, and a label is never emitted twice.
/// Runs in O(slots + bookings).
pub fn compute_availability(
    date: &str,
    catalog: Vec<TreatmentOption>,
    bookings: &[Booking],
) -> Vec<TreatmentOption> {
    let mut booked: HashMap<&str, HashSet<&str>> = HashMap::new();
    for booking in bookings.iter().filter(|b| b.appointment_date == date) {
        booked
            .entry(booking.treatment.as_str())
            .or_default()
            .insert(booking.slot.as_str());
    }

    catalog
        .into_iter()
        .map(|mut option| {
            let taken = booked.get(option.name.as_str());
            let mut seen = HashSet::with_capacity(option.slots.len());
            option.slots.retain(|slot| {
                let free = taken.is_none_or(|t| !t.contains(slot.as_str()));
                free && seen.insert(slot.clone())
            });
            debug!(date, treatment = %option.name, remaining = option.slots.len(), "availability");
            option
        })
        .collect()
}
