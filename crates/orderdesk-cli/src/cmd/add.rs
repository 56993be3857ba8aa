//! `odesk add`: append an order and show the refreshed first page.

use std::io::{self, Write};
use std::path::Path;

use chrono::Utc;
use clap::Args;
use orderdesk_core::config::ProjectConfig;
use orderdesk_core::error::RequestError;
use orderdesk_core::query::AppendRequest;
use orderdesk_core::{QueryState, Record, RecordDraft, Status, evaluate};
use serde::Serialize;

use super::{TablePage, open_store, render_table_pretty, render_table_text};
use crate::output::{CliError, OutputMode, pretty_kv, render_error, render_mode};

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Customer name.
    #[arg(long)]
    pub user: String,

    /// Project name.
    #[arg(long)]
    pub project: String,

    /// Delivery address.
    #[arg(long)]
    pub address: String,

    /// Order date (YYYY-MM-DD or RFC 3339). Defaults to today.
    #[arg(long)]
    pub date: Option<String>,

    /// Order status. Defaults to Pending.
    #[arg(long)]
    pub status: Option<String>,

    /// Explicit id; generated when omitted.
    #[arg(long)]
    pub id: Option<String>,
}

impl AddArgs {
    pub fn to_request(&self) -> AppendRequest {
        AppendRequest {
            user: self.user.clone(),
            project: self.project.clone(),
            address: self.address.clone(),
            date: self
                .date
                .clone()
                .unwrap_or_else(|| Utc::now().date_naive().to_string()),
            status: self
                .status
                .clone()
                .unwrap_or_else(|| Status::Pending.label().to_string()),
            id: self.id.clone(),
        }
    }

    /// # Errors
    ///
    /// Returns an error for an unparsable date or status.
    pub fn to_draft(&self) -> Result<RecordDraft, RequestError> {
        RecordDraft::try_from(self.to_request())
    }
}

#[derive(Debug, Serialize)]
pub struct AddReport {
    pub record: Record,
    pub table: TablePage,
}

pub fn run_add(
    args: &AddArgs,
    output: OutputMode,
    config: &ProjectConfig,
    project_root: &Path,
) -> anyhow::Result<()> {
    let draft = match args.to_draft() {
        Ok(draft) => draft,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            return Err(err.into());
        }
    };

    let mut store = open_store(config, project_root, output)?;
    let record = match store.append(draft) {
        Ok(record) => record,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            return Err(err.into());
        }
    };

    let state = QueryState::new(config.table.page_size);
    let table = TablePage::new(evaluate(&store, &state), &state, config.table.page_links);
    let report = AddReport { record, table };

    render_mode(
        output,
        &report,
        |r, w| {
            writeln!(w, "added\t{}", r.record.id)?;
            render_table_text(&r.table, w)
        },
        |r, w| {
            render_record_pretty(&r.record, w)?;
            writeln!(w)?;
            render_table_pretty(&r.table, w)
        },
    )
}

/// A created record as a key/value block.
pub fn render_record_pretty(record: &Record, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "✓ Added {}", record.id)?;
    pretty_kv(w, "User", &record.user)?;
    pretty_kv(w, "Project", &record.project)?;
    pretty_kv(w, "Address", &record.address)?;
    pretty_kv(w, "Date", record.rendered_date())?;
    pretty_kv(w, "Status", record.status.label())
}
