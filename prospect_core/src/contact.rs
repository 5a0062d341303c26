//! Lookup subjects and the contact records resolved for them.

use serde::{Deserialize, Serialize};

/// The four identifying fields for one lookup subject. All free text,
/// taken from the input roster without validation.
#[derive(Debug, Clone)]
pub struct PersonQuery {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub organization: String,
}

/// Contact data resolved for one subject.
///
/// The wire schema is lenient: keys the upstream omits deserialize to
/// `None` and are defaulted only where the record is consumed. A record is
/// produced exactly once per query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub edu_email: Option<bool>,
    #[serde(default)]
    pub source_link: Option<String>,
}

impl ContactRecord {
    /// Degraded record for a failed lookup: the query's names, everything
    /// else absent.
    #[must_use]
    pub fn null_filled(query: &PersonQuery) -> Self {
        Self {
            first_name: Some(query.first_name.clone()),
            last_name: Some(query.last_name.clone()),
            email: None,
            phone_number: None,
            edu_email: None,
            source_link: None,
        }
    }
}
