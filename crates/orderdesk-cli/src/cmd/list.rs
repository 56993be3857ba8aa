//! `odesk list`: one filtered, sorted page of the orders table.

use std::path::Path;

use clap::Args;
use orderdesk_core::config::ProjectConfig;
use orderdesk_core::error::RequestError;
use orderdesk_core::query::QueryRequest;
use orderdesk_core::{QueryState, evaluate};

use super::{TablePage, open_store, render_table_pretty, render_table_text};
use crate::output::{CliError, OutputMode, render_error, render_mode};

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Free-text search across id, user, project, address, date and status.
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// Filter by status: in-progress, complete, pending, approved, rejected, all.
    #[arg(short, long)]
    pub status: Option<String>,

    /// Filter by exact project name.
    #[arg(short, long)]
    pub project: Option<String>,

    /// Filter by address substring.
    #[arg(short, long)]
    pub address: Option<String>,

    /// Earliest date (YYYY-MM-DD or RFC 3339), inclusive.
    #[arg(long)]
    pub from: Option<String>,

    /// Latest date (YYYY-MM-DD or RFC 3339), inclusive.
    #[arg(long)]
    pub to: Option<String>,

    /// Sort column: id, user, project, address, date, status.
    #[arg(long, value_name = "KEY")]
    pub sort: Option<String>,

    /// Sort descending.
    #[arg(long)]
    pub desc: bool,

    /// Page number, starting at 1.
    #[arg(long, value_name = "N")]
    pub page: Option<usize>,
}

impl ListArgs {
    /// Convert the flags into a query request so they go through the same
    /// validation as any other caller.
    pub fn to_request(&self) -> QueryRequest {
        QueryRequest {
            free_text: self.search.clone(),
            status_filter: self.status.clone(),
            project_filter: self.project.clone(),
            address_filter: self.address.clone(),
            date_from: self.from.clone(),
            date_to: self.to.clone(),
            sort_key: self.sort.clone(),
            sort_dir: self.desc.then(|| "desc".to_string()),
            page: self.page,
        }
    }

    /// # Errors
    ///
    /// Returns an error for an unknown sort key.
    pub fn to_state(&self, config: &ProjectConfig) -> Result<QueryState, RequestError> {
        self.to_request().into_state(config.table.page_size)
    }
}

pub fn run_list(
    args: &ListArgs,
    output: OutputMode,
    config: &ProjectConfig,
    project_root: &Path,
) -> anyhow::Result<()> {
    let state = match args.to_state(config) {
        Ok(state) => state,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            return Err(err.into());
        }
    };
    let store = open_store(config, project_root, output)?;

    let page = TablePage::new(evaluate(&store, &state), &state, config.table.page_links);
    render_mode(output, &page, render_table_text, render_table_pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use orderdesk_core::{SortDir, SortKey};

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ListArgs,
    }

    #[test]
    fn list_args_defaults() {
        let w = Wrapper::parse_from(["test"]);
        assert!(w.args.search.is_none());
        assert!(w.args.status.is_none());
        assert!(!w.args.desc);
        assert!(w.args.page.is_none());

        let state = w.args.to_state(&ProjectConfig::default()).unwrap();
        assert!(state.has_no_filters());
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size().get(), 6);
    }

    #[test]
    fn list_args_build_state() {
        let w = Wrapper::parse_from([
            "test", "-q", "lane", "--status", "pending", "--project", "all", "--sort", "date",
            "--desc", "--page", "2",
        ]);
        let state = w.args.to_state(&ProjectConfig::default()).unwrap();
        assert_eq!(state.free_text(), "lane");
        assert!(state.project().is_none());
        assert_eq!(state.sort_key(), SortKey::Timestamp);
        assert_eq!(state.sort_dir(), SortDir::Desc);
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn unknown_sort_key_is_rejected() {
        let w = Wrapper::parse_from(["test", "--sort", "price"]);
        let err = w.args.to_state(&ProjectConfig::default()).unwrap_err();
        assert_eq!(err.code().code(), "E2004");
    }
}
