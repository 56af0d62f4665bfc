//! Dynamic additional-field handling
//!
//! Departments declare extra inputs as a map of display label to field spec.
//! The engine turns that map into render descriptors with a normalized
//! submission key, and formats date values for the wire.

use chrono::{DateTime, NaiveDate};

use shared::models::{Department, FieldType, field_key};

/// One renderable additional field derived from a department declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Display label exactly as the department declared it
    pub label: String,
    /// Normalized submission key ("Student ID" becomes "student_id")
    pub name: String,
    pub field_type: FieldType,
}

/// Derive the field descriptors for a department
///
/// The declaration map is unordered, so descriptors are sorted by label to
/// keep the render order stable across sessions.
pub fn derive_descriptors(department: &Department) -> Vec<FieldDescriptor> {
    let mut descriptors: Vec<FieldDescriptor> = department
        .additional_fields
        .iter()
        .map(|(label, spec)| FieldDescriptor {
            name: field_key(label),
            label: label.clone(),
            field_type: spec.field_type,
        })
        .collect();
    descriptors.sort_by(|a, b| a.label.cmp(&b.label));
    descriptors
}

/// Normalize a date input to the wire format `YYYY-MM-DD`
///
/// Date pickers emit either a plain date or an RFC 3339 timestamp; both are
/// accepted. Returns None when the value parses as neither.
pub fn normalize_date(value: &str) -> Option<String> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.format("%Y-%m-%d").to_string());
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Some(stamp.date_naive().format("%Y-%m-%d").to_string());
    }
    None
}
