//! The `Employee` entity and its wire representation.
//!
//! Field names are camelCase on the wire (`firstName`, `lastName`).
//! `id` is omitted from serialized output until the store assigns one,
//! and is optional on input.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Employee {
    /// Build an unsaved employee (no id yet).
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// `true` when both employees carry the same name and email,
    /// regardless of id.
    #[cfg(test)]
    pub(crate) fn same_fields(&self, other: &Employee) -> bool {
        self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.email == other.email
    }
}
