use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::date::{DateInput, render_date};

/// Lifecycle status of an order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "In Progress", alias = "in_progress", alias = "in-progress")]
    InProgress,
    Complete,
    Pending,
    Approved,
    Rejected,
}

impl Status {
    /// Every status, in the order the dashboard lists them.
    pub const ALL: [Self; 5] = [
        Self::InProgress,
        Self::Complete,
        Self::Pending,
        Self::Approved,
        Self::Rejected,
    ];

    /// Display label. Also the text that search and sorting see.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::Complete => "Complete",
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {expected}: '{got}'")]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

/// Lowercase and drop separators so `In Progress`, `in-progress` and
/// `IN_PROGRESS` all compare equal.
pub(crate) fn normalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "inprogress" => Ok(Self::InProgress),
            "complete" => Ok(Self::Complete),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseEnumError {
                expected: "status",
                got: s.to_string(),
            }),
        }
    }
}

/// One order line. Immutable once it is in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub user: String,
    pub project: String,
    pub address: String,
    pub timestamp: DateTime<Utc>,
    pub status: Status,
}

impl Record {
    /// The record's date under the canonical rendering rule.
    #[must_use]
    pub fn rendered_date(&self) -> String {
        render_date(self.timestamp)
    }

    /// Every field joined by single spaces, as free-text search sees it.
    #[must_use]
    pub fn search_text(&self) -> String {
        [
            self.id.as_str(),
            self.user.as_str(),
            self.project.as_str(),
            self.address.as_str(),
            self.rendered_date().as_str(),
            self.status.label(),
        ]
        .join(" ")
    }
}

/// Input to [`RecordStore::append`](crate::store::RecordStore::append).
///
/// Everything but `id` is required; an absent or blank `id` asks the store to
/// generate one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub id: Option<String>,
    pub user: String,
    pub project: String,
    pub address: String,
    pub date: DateInput,
    pub status: Status,
}

impl RecordDraft {
    #[must_use]
    pub fn new(
        user: impl Into<String>,
        project: impl Into<String>,
        address: impl Into<String>,
        date: impl Into<DateInput>,
        status: Status,
    ) -> Self {
        Self {
            id: None,
            user: user.into(),
            project: project.into(),
            address: address.into(),
            date: date.into(),
            status,
        }
    }

    /// Request an explicit identifier instead of a generated one.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
