//! Opaque string identifiers for pages and blocks.
//!
//! Ids are UUID v4 rendered as strings. They are treated as opaque
//! everywhere else in the crate: stores and the editor never parse them,
//! so externally created ids (e.g. seeded demo data) round-trip untouched.

use uuid::Uuid;

/// Generates a fresh id, unique for the lifetime of the process and beyond.
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}
