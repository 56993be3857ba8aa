//! Wire shapes for the query and append boundary.
//!
//! Requests arrive loosely typed (every query field optional, enums as text)
//! and are converted into [`QueryState`] and [`RecordDraft`] here, so the
//! engine and store only ever see validated values.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use super::engine::DerivedView;
use super::state::{QueryState, SortDir, SortKey, StatusFilter};
use crate::error::RequestError;
use crate::model::date::DateInput;
use crate::model::record::{Record, RecordDraft, Status};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryRequest {
    pub free_text: Option<String>,
    pub status_filter: Option<String>,
    pub project_filter: Option<String>,
    pub address_filter: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort_key: Option<String>,
    pub sort_dir: Option<String>,
    pub page: Option<usize>,
}

impl QueryRequest {
    /// Build a query state. `page` defaults to 1.
    ///
    /// Filter values never fail: an unknown status matches nothing and an
    /// unparsable date bound is ignored at evaluation time.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidEnum`] for an unknown sort key or
    /// direction.
    pub fn into_state(self, page_size: NonZeroUsize) -> Result<QueryState, RequestError> {
        let mut state = QueryState::new(page_size);

        if let Some(text) = self.free_text {
            state.set_free_text(text);
        }
        if let Some(status) = self.status_filter {
            state.set_status(StatusFilter::parse(&status));
        }
        state.set_project(self.project_filter.filter(|p| !is_all_sentinel(p)));
        if let Some(address) = self.address_filter {
            state.set_address(address);
        }
        state.set_date_from(self.date_from.filter(|d| !d.trim().is_empty()));
        state.set_date_to(self.date_to.filter(|d| !d.trim().is_empty()));

        let key = self
            .sort_key
            .as_deref()
            .map(str::parse::<SortKey>)
            .transpose()?
            .unwrap_or_default();
        let dir = self
            .sort_dir
            .as_deref()
            .map(str::parse::<SortDir>)
            .transpose()?
            .unwrap_or_default();
        state.set_sort(key, dir);

        state.set_page(self.page.unwrap_or(1));
        Ok(state)
    }
}

fn is_all_sentinel(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub rows: Vec<Record>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

impl From<DerivedView> for QueryResponse {
    fn from(view: DerivedView) -> Self {
        let page = view.page();
        let total_pages = view.total_pages();
        let total_count = view.total_count();
        Self {
            rows: view.into_rows(),
            page,
            total_pages,
            total_count,
        }
    }
}

/// An Add-Order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendRequest {
    pub user: String,
    pub project: String,
    pub address: String,
    pub date: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl TryFrom<AppendRequest> for RecordDraft {
    type Error = RequestError;

    fn try_from(req: AppendRequest) -> Result<Self, Self::Error> {
        let date: DateInput = req.date.parse()?;
        let status: Status = req.status.parse()?;
        Ok(Self {
            id: req.id,
            user: req.user,
            project: req.project,
            address: req.address,
            date,
            status,
        })
    }
}
