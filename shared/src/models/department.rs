//! Department Model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Department type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepartmentType {
    /// Payments are tied to a selected event with a catalog price
    EventBased,
    /// Payer enters an arbitrary amount (tuition, dorm fees, ...)
    SelfPay,
}

/// Declared input type for an additional form field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Date,
    Checkbox,
}

/// Additional field declaration
///
/// Departments declare extra fields as a map of display label to spec.
/// The submission key is derived from the label, see [`field_key`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

/// Department entity (public directory)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub department_type: DepartmentType,
    /// Extra form fields this department collects, keyed by display label
    #[serde(default)]
    pub additional_fields: HashMap<String, FieldSpec>,
}

impl Department {
    pub fn is_self_pay(&self) -> bool {
        self.department_type == DepartmentType::SelfPay
    }
}

/// Derive the submission key for an additional field label
///
/// Whitespace runs collapse to a single underscore and the result is
/// lowercased, so "Student ID" becomes "student_id".
pub fn field_key(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}
