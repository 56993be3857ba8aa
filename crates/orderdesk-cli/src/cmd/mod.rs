//! Subcommand handlers plus the pieces they share: startup store loading
//! and the table page renderer.

pub mod add;
pub mod list;
pub mod nav;
pub mod projects;
pub mod session;

use std::io::{self, Write};
use std::path::Path;

use chrono::Utc;
use orderdesk_core::config::ProjectConfig;
use orderdesk_core::error::ErrorCode;
use orderdesk_core::fixture;
use orderdesk_core::query::{QueryResponse, SortIndicator};
use orderdesk_core::{DerivedView, QueryState, RecordStore, SortDir, SortKey};
use serde::Serialize;

use crate::output::{CliError, OutputMode, pretty_rule, render_error};

/// Build the startup store from the project config: the sample orders when
/// `seed.fixture` is on, then any seed file entries.
pub fn open_store(
    config: &ProjectConfig,
    project_root: &Path,
    output: OutputMode,
) -> anyhow::Result<RecordStore> {
    let seed_path = config.seed.resolved_path(project_root);
    match fixture::build_store(config.seed.fixture, seed_path.as_deref(), Utc::now()) {
        Ok(store) => Ok(store),
        Err(err) => {
            render_error(
                output,
                &CliError::from_code(ErrorCode::SeedLoadFailed, format!("{err:#}")),
            )?;
            Err(err)
        }
    }
}

/// One rendered page of the orders table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage {
    #[serde(flatten)]
    pub response: QueryResponse,
    pub summary: String,
    pub has_prev: bool,
    pub has_next: bool,
    pub page_links: Vec<usize>,
    pub sort_key: SortKey,
    pub sort_dir: SortDir,
    #[serde(skip)]
    indicators: Vec<(SortKey, SortIndicator)>,
}

impl TablePage {
    pub fn new(view: DerivedView, state: &QueryState, link_limit: usize) -> Self {
        let indicators = SortKey::ALL
            .iter()
            .map(|&key| (key, view.sort_indicator(key)))
            .collect();
        Self {
            summary: view.summary(),
            has_prev: view.has_prev(),
            has_next: view.has_next(),
            page_links: view.page_links(link_limit),
            sort_key: state.sort_key(),
            sort_dir: state.sort_dir(),
            indicators,
            response: QueryResponse::from(view),
        }
    }

    fn heading(&self, key: SortKey) -> String {
        let arrow = self
            .indicators
            .iter()
            .find(|(k, _)| *k == key)
            .map_or("", |(_, indicator)| match indicator {
                SortIndicator::Ascending => " ▲",
                SortIndicator::Descending => " ▼",
                SortIndicator::None => "",
            });
        format!("{}{arrow}", key.heading())
    }
}

const COLUMN_WIDTHS: [usize; 5] = [9, 16, 18, 24, 12];

/// Aligned columns with sort arrows, a footer summary and page links.
pub fn render_table_pretty(page: &TablePage, w: &mut dyn Write) -> io::Result<()> {
    let headings: Vec<String> = SortKey::ALL.iter().map(|&k| page.heading(k)).collect();
    for (heading, width) in headings.iter().zip(COLUMN_WIDTHS) {
        write!(w, "{heading:<width$}")?;
    }
    writeln!(w, "{}", headings[5])?;
    pretty_rule(w)?;

    if page.response.rows.is_empty() {
        writeln!(w, "No orders match the current filters.")?;
    }
    for row in &page.response.rows {
        let date = row.rendered_date();
        let cells = [
            row.id.as_str(),
            row.user.as_str(),
            row.project.as_str(),
            row.address.as_str(),
            date.as_str(),
        ];
        for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
            write!(w, "{:<width$}", truncate(cell, width - 1))?;
        }
        writeln!(w, "{}", row.status)?;
    }

    pretty_rule(w)?;
    let links: Vec<String> = page
        .page_links
        .iter()
        .map(|&n| {
            if n == page.response.page {
                format!("[{n}]")
            } else {
                n.to_string()
            }
        })
        .collect();
    writeln!(
        w,
        "{}  {} pages: {} {}",
        page.summary,
        if page.has_prev { "‹" } else { " " },
        links.join(" "),
        if page.has_next { "›" } else { " " },
    )
}

/// Tab-separated rows under a header line, then the summary.
pub fn render_table_text(page: &TablePage, w: &mut dyn Write) -> io::Result<()> {
    let header: Vec<&str> = SortKey::ALL.iter().map(|k| k.as_str()).collect();
    writeln!(w, "{}", header.join("\t"))?;
    for row in &page.response.rows {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}",
            row.id,
            row.user,
            row.project,
            row.address,
            row.rendered_date(),
            row.status
        )?;
    }
    writeln!(w, "{}", page.summary)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}
