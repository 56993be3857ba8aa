//! `odesk nav`: the sidebar tree with the active route marked.

use std::io::{self, Write};

use clap::Args;
use orderdesk_core::nav::{self, NavItem, NavSection};
use serde::Serialize;

use crate::output::{OutputMode, render_mode};

#[derive(Args, Debug, Default)]
pub struct NavArgs {
    /// Current route, e.g. `/orders`. Without it nothing is active.
    #[arg(long)]
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NavEntry {
    pub label: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub active: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavEntry>,
}

impl NavEntry {
    fn from_item(item: &NavItem, current: Option<&str>) -> Self {
        let (target, children) = match item {
            NavItem::Leaf { target, .. } => (Some(target.clone()), Vec::new()),
            NavItem::Group { children, .. } => (
                None,
                children
                    .iter()
                    .map(|child| Self::from_item(child, current))
                    .collect(),
            ),
        };
        Self {
            label: item.label().to_string(),
            icon: item.icon().to_string(),
            target,
            active: item.is_active(current),
            children,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SectionEntry {
    pub title: String,
    pub items: Vec<NavEntry>,
}

#[derive(Debug, Serialize)]
pub struct NavReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breadcrumb: Option<Vec<String>>,
    pub sections: Vec<SectionEntry>,
}

impl NavReport {
    pub fn build(sections: &[NavSection], path: Option<&str>) -> Self {
        Self {
            path: path.map(str::to_string),
            title: path.map(nav::page_title),
            breadcrumb: path.and_then(|p| nav::breadcrumb(sections, p)),
            sections: sections
                .iter()
                .map(|section| SectionEntry {
                    title: section.title.clone(),
                    items: section
                        .items
                        .iter()
                        .map(|item| NavEntry::from_item(item, path))
                        .collect(),
                })
                .collect(),
        }
    }
}

pub fn run_nav(args: &NavArgs, output: OutputMode) -> anyhow::Result<()> {
    let report = NavReport::build(&nav::sidebar(), args.path.as_deref());
    render_mode(output, &report, render_nav_text, render_nav_pretty)
}

fn render_nav_pretty(report: &NavReport, w: &mut dyn Write) -> io::Result<()> {
    if let Some(crumbs) = &report.breadcrumb {
        writeln!(w, "{}", crumbs.join(" / "))?;
        writeln!(w)?;
    } else if let Some(title) = &report.title {
        writeln!(w, "{title}")?;
        writeln!(w)?;
    }
    for section in &report.sections {
        writeln!(w, "{}", section.title)?;
        for entry in &section.items {
            write_entry(w, entry, 1)?;
        }
    }
    Ok(())
}

fn write_entry(w: &mut dyn Write, entry: &NavEntry, depth: usize) -> io::Result<()> {
    let marker = if entry.active { "▸" } else { " " };
    let indent = "  ".repeat(depth);
    match &entry.target {
        Some(target) => writeln!(w, "{indent}{marker} {:<16} {target}", entry.label)?,
        None => writeln!(w, "{indent}{marker} {}", entry.label)?,
    }
    for child in &entry.children {
        write_entry(w, child, depth + 1)?;
    }
    Ok(())
}

/// One line per leaf: `section<TAB>label<TAB>target`, active leaves starred.
fn render_nav_text(report: &NavReport, w: &mut dyn Write) -> io::Result<()> {
    fn leaves(
        w: &mut dyn Write,
        section: &str,
        prefix: &str,
        entries: &[NavEntry],
    ) -> io::Result<()> {
        for entry in entries {
            let label = if prefix.is_empty() {
                entry.label.clone()
            } else {
                format!("{prefix}/{}", entry.label)
            };
            if let Some(target) = &entry.target {
                let star = if entry.active { "*" } else { "" };
                writeln!(w, "{section}\t{label}{star}\t{target}")?;
            }
            leaves(w, section, &label, &entry.children)?;
        }
        Ok(())
    }

    for section in &report.sections {
        leaves(w, &section.title, "", &section.items)?;
    }
    Ok(())
}
