//! `odesk projects`: the options of the project filter.

use std::path::Path;

use clap::Args;
use orderdesk_core::config::ProjectConfig;

use super::open_store;
use crate::output::{OutputMode, pretty_section, render_mode};

#[derive(Args, Debug, Default)]
pub struct ProjectsArgs {}

pub fn run_projects(
    _args: &ProjectsArgs,
    output: OutputMode,
    config: &ProjectConfig,
    project_root: &Path,
) -> anyhow::Result<()> {
    let store = open_store(config, project_root, output)?;
    let projects = store.projects();

    render_mode(
        output,
        &projects,
        |projects, w| {
            for project in projects {
                writeln!(w, "{project}")?;
            }
            Ok(())
        },
        |projects, w| {
            pretty_section(w, &format!("Projects ({})", projects.len()))?;
            for project in projects {
                writeln!(w, "  {project}")?;
            }
            Ok(())
        },
    )
}
