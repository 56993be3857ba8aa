//! `odesk session`: drive one query state interactively from stdin.
//!
//! Each input line is one interaction (typing in the search box, picking a
//! status, clicking a header, paging, submitting the add form). The state
//! follows the same rules as the dashboard: filter changes and appends go
//! back to page 1, sort clicks keep the page.

use std::io::{self, BufRead, Write};
use std::path::Path;

use clap::Args;
use orderdesk_core::config::ProjectConfig;
use orderdesk_core::error::RequestError;
use orderdesk_core::query::{AppendRequest, StatusFilter};
use orderdesk_core::{QueryState, RecordDraft, RecordStore, SortKey, evaluate};
use tracing::debug;

use super::add::render_record_pretty;
use super::{TablePage, open_store, render_table_pretty, render_table_text};
use crate::output::{CliError, OutputMode, render_error, write_mode};

#[derive(Args, Debug, Default)]
pub struct SessionArgs {
    /// Print the table after every command, not only after `show`.
    #[arg(long)]
    pub echo: bool,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Search(String),
    Status(StatusFilter),
    Project(Option<String>),
    Address(String),
    From(Option<String>),
    To(Option<String>),
    Reset,
    Sort(SortKey),
    Page(usize),
    Next,
    Prev,
    Add(AppendRequest),
    Show,
}

impl SessionCommand {
    /// Parse one input line.
    ///
    /// # Errors
    ///
    /// Returns a user-facing error for an unknown verb or a malformed
    /// argument.
    pub fn parse(line: &str) -> Result<Self, CliError> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

        match verb.to_ascii_lowercase().as_str() {
            "search" => Ok(Self::Search(rest.to_string())),
            "status" => Ok(Self::Status(StatusFilter::parse(rest))),
            "project" => Ok(Self::Project(optional_choice(rest))),
            "address" => Ok(Self::Address(rest.to_string())),
            "from" => Ok(Self::From(optional_text(rest))),
            "to" => Ok(Self::To(optional_text(rest))),
            "reset" => Ok(Self::Reset),
            "sort" => rest
                .parse::<SortKey>()
                .map(Self::Sort)
                .map_err(|err| CliError::from(&RequestError::from(err))),
            "page" => rest
                .parse::<usize>()
                .map(Self::Page)
                .map_err(|_| CliError::new(format!("page expects a number, got '{rest}'"))),
            "next" => Ok(Self::Next),
            "prev" => Ok(Self::Prev),
            "add" => parse_add(rest).map(Self::Add),
            "show" => Ok(Self::Show),
            _ => Err(CliError::new(format!("unknown command '{verb}'"))),
        }
    }
}

fn optional_text(rest: &str) -> Option<String> {
    (!rest.is_empty()).then(|| rest.to_string())
}

fn optional_choice(rest: &str) -> Option<String> {
    optional_text(rest).filter(|value| !value.eq_ignore_ascii_case("all"))
}

/// `user|project|address|date|status[|id]`
fn parse_add(rest: &str) -> Result<AppendRequest, CliError> {
    let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
    match fields.as_slice() {
        [user, project, address, date, status] | [user, project, address, date, status, ""] => {
            Ok(AppendRequest {
                user: (*user).to_string(),
                project: (*project).to_string(),
                address: (*address).to_string(),
                date: (*date).to_string(),
                status: (*status).to_string(),
                id: None,
            })
        }
        [user, project, address, date, status, id] => Ok(AppendRequest {
            user: (*user).to_string(),
            project: (*project).to_string(),
            address: (*address).to_string(),
            date: (*date).to_string(),
            status: (*status).to_string(),
            id: Some((*id).to_string()),
        }),
        _ => Err(CliError::new(
            "add expects user|project|address|date|status[|id]",
        )),
    }
}

/// A store plus the query state one user is driving against it.
pub struct Session {
    store: RecordStore,
    state: QueryState,
    page_links: usize,
}

impl Session {
    pub fn new(store: RecordStore, config: &ProjectConfig) -> Self {
        Self {
            store,
            state: QueryState::new(config.table.page_size),
            page_links: config.table.page_links,
        }
    }

    #[cfg(test)]
    const fn state(&self) -> &QueryState {
        &self.state
    }

    /// The current page, with a stale page number pulled back into range.
    pub fn view(&mut self) -> TablePage {
        let view = evaluate(&self.store, &self.state);
        self.state.clamp_page(view.total_pages());
        TablePage::new(view, &self.state, self.page_links)
    }

    /// Apply one command. `Show` is a no-op here; the caller renders.
    ///
    /// A rejected `add` comes back as the inner `Err` and leaves the state
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the created record fails.
    pub fn apply(
        &mut self,
        command: SessionCommand,
        output: OutputMode,
        out: &mut dyn Write,
    ) -> anyhow::Result<Result<(), CliError>> {
        match command {
            SessionCommand::Search(text) => self.state.set_free_text(text),
            SessionCommand::Status(status) => self.state.set_status(status),
            SessionCommand::Project(project) => self.state.set_project(project),
            SessionCommand::Address(address) => self.state.set_address(address),
            SessionCommand::From(from) => self.state.set_date_from(from),
            SessionCommand::To(to) => self.state.set_date_to(to),
            SessionCommand::Reset => self.state.reset_filters(),
            SessionCommand::Sort(key) => self.state.toggle_sort(key),
            SessionCommand::Page(page) => self.state.set_page(page),
            SessionCommand::Next => {
                let total = evaluate(&self.store, &self.state).total_pages();
                self.state.next_page(total);
            }
            SessionCommand::Prev => self.state.prev_page(),
            SessionCommand::Add(request) => {
                let draft = match RecordDraft::try_from(request) {
                    Ok(draft) => draft,
                    Err(err) => return Ok(Err(CliError::from(&err))),
                };
                let record = match self.store.append(draft) {
                    Ok(record) => record,
                    Err(err) => return Ok(Err(CliError::from(&err))),
                };
                self.state.set_page(1);
                write_mode(
                    out,
                    output,
                    &record,
                    |r, w| writeln!(w, "added\t{}", r.id),
                    render_record_pretty,
                )?;
            }
            SessionCommand::Show => {}
        }
        Ok(Ok(()))
    }
}

pub fn run_session(
    args: &SessionArgs,
    output: OutputMode,
    config: &ProjectConfig,
    project_root: &Path,
) -> anyhow::Result<()> {
    let store = open_store(config, project_root, output)?;
    let mut session = Session::new(store, config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    drive(&mut session, stdin.lock(), &mut out, output, args.echo, |err| {
        render_error(output, err)
    })
}

/// Feed every line of `input` to `session`. Errors are reported through
/// `on_error` and do not stop the loop.
fn drive(
    session: &mut Session,
    input: impl BufRead,
    out: &mut dyn Write,
    output: OutputMode,
    echo: bool,
    mut on_error: impl FnMut(&CliError) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let command = match SessionCommand::parse(trimmed) {
            Ok(command) => command,
            Err(err) => {
                on_error(&err)?;
                continue;
            }
        };
        debug!(?command, "session command");

        let show = echo || command == SessionCommand::Show;
        if let Err(err) = session.apply(command, output, out)? {
            on_error(&err)?;
            continue;
        }
        if show {
            let page = session.view();
            write_mode(out, output, &page, render_table_text, render_table_pretty)?;
        }
    }
    Ok(())
}
