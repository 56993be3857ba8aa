use std::fmt;

use crate::model::date::DateParseError;
use crate::model::record::ParseEnumError;

/// Machine-readable error codes for callers that branch on failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    SeedLoadFailed,
    DuplicateId,
    EmptyField,
    InvalidDate,
    InvalidEnumValue,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::SeedLoadFailed => "E1002",
            Self::DuplicateId => "E2001",
            Self::EmptyField => "E2002",
            Self::InvalidDate => "E2003",
            Self::InvalidEnumValue => "E2004",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::SeedLoadFailed => "Seed file could not be loaded",
            Self::DuplicateId => "Record id already exists",
            Self::EmptyField => "Required field is blank",
            Self::InvalidDate => "Invalid date value",
            Self::InvalidEnumValue => "Invalid status/sort value",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to users.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .orderdesk/config.toml and retry."),
            Self::SeedLoadFailed => {
                Some("Check that the seed file is a JSON array of order objects.")
            }
            Self::DuplicateId => Some("Choose a different id, or omit it to generate one."),
            Self::EmptyField => Some("Fill in user, project and address."),
            Self::InvalidDate => Some("Use YYYY-MM-DD or an RFC 3339 timestamp."),
            Self::InvalidEnumValue => Some(
                "Status is one of In Progress, Complete, Pending, Approved, Rejected; \
                 sort is one of id, user, project, address, date, status.",
            ),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failures of [`RecordStore::append`](crate::store::RecordStore::append).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The id (supplied or generated) is already taken.
    #[error("record id '{id}' already exists")]
    DuplicateId { id: String },

    /// A required text field was empty after trimming.
    #[error("field '{field}' must not be blank")]
    EmptyField { field: &'static str },
}

impl StoreError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateId { .. } => ErrorCode::DuplicateId,
            Self::EmptyField { .. } => ErrorCode::EmptyField,
        }
    }
}

/// Failures converting wire requests into typed drafts and query states.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    InvalidDate(#[from] DateParseError),

    #[error(transparent)]
    InvalidEnum(#[from] ParseEnumError),
}

impl RequestError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidDate(_) => ErrorCode::InvalidDate,
            Self::InvalidEnum(_) => ErrorCode::InvalidEnumValue,
        }
    }
}
