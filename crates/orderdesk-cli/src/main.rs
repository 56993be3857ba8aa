#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use orderdesk_core::config;
use orderdesk_core::error::ErrorCode;
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "odesk: filter, sort and page the orders table",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format: pretty, text or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Project root holding `.orderdesk/config.toml`. Defaults to the
    /// current directory.
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "List one page of orders",
        long_about = "Filter, sort and paginate the seeded orders.",
        after_help = "EXAMPLES:\n    # First page, default sort\n    odesk list\n\n    # Pending orders, newest first\n    odesk list --status pending --sort date --desc\n\n    # Orders from one day\n    odesk list --from 2024-06-14 --to 2024-06-14 --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Write",
        about = "Add an order",
        long_about = "Append an order to the seeded store and show the refreshed first page.",
        after_help = "EXAMPLES:\n    # Add with today's date and Pending status\n    odesk add --user \"Lana Steiner\" --project Dashboard --address \"Oak St\"\n\n    # Explicit id and status\n    odesk add --user Lana --project Dashboard --address \"Oak St\" --status approved --id \"#CMP900\""
    )]
    Add(cmd::add::AddArgs),

    #[command(
        next_help_heading = "Read",
        about = "List project names",
        long_about = "List the distinct project names offered by the project filter."
    )]
    Projects(cmd::projects::ProjectsArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show the navigation sidebar",
        long_about = "Print the sidebar tree. With --path, mark the active entry and show its breadcrumb.",
        after_help = "EXAMPLES:\n    # Sidebar with no active route\n    odesk nav\n\n    # Sidebar for a nested page\n    odesk nav --path /profile/campaigns"
    )]
    Nav(cmd::nav::NavArgs),

    #[command(
        next_help_heading = "Interactive",
        about = "Run interaction commands from stdin",
        long_about = "Read one interaction per line (search, status, project, address, from, to, reset, sort, page, next, prev, add, show) and apply it to a single query state.",
        after_help = "EXAMPLES:\n    # Page through pending orders\n    printf 'status pending\\nshow\\n' | odesk session\n\n    # Print after every command\n    printf 'sort user\\nsort user\\n' | odesk session --echo"
    )]
    Session(cmd::session::SessionArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ORDERDESK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "orderdesk=debug,info"
        } else {
            "orderdesk=info,warn"
        })
    });

    let format = env::var("ORDERDESK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = match cli.root {
        Some(ref root) => root.clone(),
        None => env::current_dir()?,
    };

    let effective = match config::resolve_config(&project_root, cli.json) {
        Ok(effective) => effective,
        Err(err) => {
            let mode = cli.format.unwrap_or(if cli.json {
                OutputMode::Json
            } else {
                OutputMode::Text
            });
            render_error(
                mode,
                &CliError::from_code(ErrorCode::ConfigParseError, format!("{err:#}")),
            )?;
            return Err(err);
        }
    };
    let output = resolve_output_mode(cli.format, &effective.resolved_output);
    let project = &effective.project;
    debug!(root = %project_root.display(), ?output, page_size = project.table.page_size.get(), "resolved config");

    match cli.command {
        Commands::List(ref args) => cmd::list::run_list(args, output, project, &project_root),
        Commands::Add(ref args) => cmd::add::run_add(args, output, project, &project_root),
        Commands::Projects(ref args) => {
            cmd::projects::run_projects(args, output, project, &project_root)
        }
        Commands::Nav(ref args) => cmd::nav::run_nav(args, output),
        Commands::Session(ref args) => {
            cmd::session::run_session(args, output, project, &project_root)
        }
    }
}
