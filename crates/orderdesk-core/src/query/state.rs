//! Query state and its interaction rules.
//!
//! Fields are private so the transition rules hold for every caller:
//! any filter change resets the page to 1, sort changes leave it alone.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::record::{ParseEnumError, Status, normalize};

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(6) {
    Some(size) => size,
    None => unreachable!(),
};

/// Column the table is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Id,
    User,
    Project,
    Address,
    Timestamp,
    Status,
}

impl SortKey {
    /// Every key, in table column order.
    pub const ALL: [Self; 6] = [
        Self::Id,
        Self::User,
        Self::Project,
        Self::Address,
        Self::Timestamp,
        Self::Status,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::User => "user",
            Self::Project => "project",
            Self::Address => "address",
            Self::Timestamp => "timestamp",
            Self::Status => "status",
        }
    }

    /// Column heading shown by front ends.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Id => "Id",
            Self::User => "User",
            Self::Project => "Project",
            Self::Address => "Address",
            Self::Timestamp => "Date",
            Self::Status => "Status",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "id" => Ok(Self::Id),
            "user" => Ok(Self::User),
            "project" => Ok(Self::Project),
            "address" => Ok(Self::Address),
            "timestamp" | "date" | "dateiso" => Ok(Self::Timestamp),
            "status" => Ok(Self::Status),
            _ => Err(ParseEnumError {
                expected: "sort key",
                got: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDir {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(ParseEnumError {
                expected: "sort direction",
                got: s.to_string(),
            }),
        }
    }
}

/// Status filter as chosen in the status select.
///
/// A value that names no known status is kept rather than rejected; it
/// matches no record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Any,
    Only(Status),
    Unrecognized(String),
}

impl StatusFilter {
    /// Interpret select-box text. Blank and `all` mean no filter.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Self::Any;
        }
        trimmed
            .parse::<Status>()
            .map_or_else(|_| Self::Unrecognized(raw.to_string()), Self::Only)
    }

    #[must_use]
    pub const fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl From<Status> for StatusFilter {
    fn from(status: Status) -> Self {
        Self::Only(status)
    }
}

/// Everything one view request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    free_text: String,
    status: StatusFilter,
    project: Option<String>,
    address: String,
    date_from: Option<String>,
    date_to: Option<String>,
    sort_key: SortKey,
    sort_dir: SortDir,
    page: usize,
    page_size: NonZeroUsize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl QueryState {
    #[must_use]
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            free_text: String::new(),
            status: StatusFilter::Any,
            project: None,
            address: String::new(),
            date_from: None,
            date_to: None,
            sort_key: SortKey::default(),
            sort_dir: SortDir::default(),
            page: 1,
            page_size,
        }
    }

    // -- filter transitions: each resets the page ---------------------------

    pub fn set_free_text(&mut self, text: impl Into<String>) {
        self.free_text = text.into();
        self.page = 1;
    }

    pub fn set_status(&mut self, status: impl Into<StatusFilter>) {
        self.status = status.into();
        self.page = 1;
    }

    /// `None` clears the project filter.
    pub fn set_project(&mut self, project: Option<String>) {
        self.project = project;
        self.page = 1;
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
        self.page = 1;
    }

    /// Raw bound text; unparsable text is kept and treated as no bound.
    pub fn set_date_from(&mut self, from: Option<String>) {
        self.date_from = from;
        self.page = 1;
    }

    pub fn set_date_to(&mut self, to: Option<String>) {
        self.date_to = to;
        self.page = 1;
    }

    /// Clear every filter. Sort is kept.
    pub fn reset_filters(&mut self) {
        self.free_text.clear();
        self.status = StatusFilter::Any;
        self.project = None;
        self.address.clear();
        self.date_from = None;
        self.date_to = None;
        self.page = 1;
    }

    // -- sort transitions: the page is kept ---------------------------------

    /// Column-header click: the active key flips direction, any other key
    /// becomes active in ascending order.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if key == self.sort_key {
            self.sort_dir = self.sort_dir.flipped();
        } else {
            self.sort_key = key;
            self.sort_dir = SortDir::Asc;
        }
    }

    pub fn set_sort(&mut self, key: SortKey, dir: SortDir) {
        self.sort_key = key;
        self.sort_dir = dir;
    }

    // -- paging --------------------------------------------------------------

    /// Request a page. Values below 1 become 1; the upper end is clamped at
    /// evaluation time against the filtered result.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.page = self.page.saturating_add(1).min(total_pages.max(1));
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Pull the requested page back into `[1, total_pages]`.
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.page = self.page.clamp(1, total_pages.max(1));
    }

    // -- accessors -----------------------------------------------------------

    #[must_use]
    pub fn free_text(&self) -> &str {
        &self.free_text
    }

    #[must_use]
    pub const fn status(&self) -> &StatusFilter {
        &self.status
    }

    #[must_use]
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn date_from(&self) -> Option<&str> {
        self.date_from.as_deref()
    }

    #[must_use]
    pub fn date_to(&self) -> Option<&str> {
        self.date_to.as_deref()
    }

    #[must_use]
    pub const fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    #[must_use]
    pub const fn sort_dir(&self) -> SortDir {
        self.sort_dir
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// True when no filter constrains the result.
    #[must_use]
    pub fn has_no_filters(&self) -> bool {
        self.free_text.is_empty()
            && self.status.is_any()
            && self.project.is_none()
            && self.address.is_empty()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }
}
