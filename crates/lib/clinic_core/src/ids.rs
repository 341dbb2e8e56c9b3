// Record identifiers.
//
// Every record gets a UUIDv7 generated app-side so that ids sort by
// creation time in both store backends.

use uuid::Uuid;

/// Generate a new record id (UUIDv7, timestamp-sortable).
pub fn new_id() -> Uuid {
    Uuid::now_v7()
}

/// Parse a record id received as a path segment.
///
/// Returns `None` for anything that is not a hyphenated or simple UUID.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::try_parse(raw.trim()).ok()
}
