use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::query::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Rows per page. Zero is rejected when the file is parsed.
    #[serde(default = "default_page_size")]
    pub page_size: NonZeroUsize,
    /// How many page quick-links front ends show.
    #[serde(default = "default_page_links")]
    pub page_links: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_links: default_page_links(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_true")]
    pub fixture: bool,
    /// JSON seed file, relative to the project root.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            fixture: default_true(),
            path: None,
        }
    }
}

impl SeedConfig {
    /// The seed file path resolved against `project_root`.
    #[must_use]
    pub fn resolved_path(&self, project_root: &Path) -> Option<PathBuf> {
        self.path.as_ref().map(|path| project_root.join(path))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
}

/// Load `<root>/.orderdesk/config.toml`, or defaults when it is absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".orderdesk/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the per-user config from the platform config directory.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("orderdesk/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Project and user config plus the output mode they resolve to.
///
/// # Errors
///
/// Returns an error if either config file fails to load.
pub fn resolve_config(project_root: &Path, cli_json: bool) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(
        cli_json,
        user.output.as_deref(),
        env_format.as_deref(),
        std::io::stdout().is_terminal(),
    );

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
    })
}

fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "human" => Some("pretty"),
        "text" | "table" => Some("text"),
        "json" => Some("json"),
        _ => None,
    }
}

fn resolve_output(
    cli_json: bool,
    user_output: Option<&str>,
    env_format: Option<&str>,
    is_tty: bool,
) -> String {
    if cli_json {
        return "json".to_string();
    }

    if let Some(mode) = env_format.and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if let Some(mode) = user_output.and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if is_tty { "pretty" } else { "text" }.to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_page_size() -> NonZeroUsize {
    DEFAULT_PAGE_SIZE
}

const fn default_page_links() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, body: &str) {
        let config_dir = dir.join(".orderdesk");
        std::fs::create_dir_all(&config_dir).expect("config dir must be created");
        std::fs::write(config_dir.join("config.toml"), body).expect("config must be written");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_project_config(dir.path()).unwrap();
        assert_eq!(config, ProjectConfig::default());
        assert_eq!(config.table.page_size.get(), 6);
        assert_eq!(config.table.page_links, 5);
        assert!(config.seed.fixture);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "[table]\npage_size = 10\n");
        let config = load_project_config(dir.path()).unwrap();
        assert_eq!(config.table.page_size.get(), 10);
        assert_eq!(config.table.page_links, 5);
        assert!(config.seed.fixture);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "[table]\npage_size = 0\n");
        let err = load_project_config(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn seed_path_resolves_against_root() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "[seed]\nfixture = false\npath = \"orders.json\"\n");
        let config = load_project_config(dir.path()).unwrap();
        assert!(!config.seed.fixture);
        assert_eq!(
            config.seed.resolved_path(dir.path()),
            Some(dir.path().join("orders.json"))
        );
    }

    #[test]
    fn output_precedence() {
        assert_eq!(resolve_output(true, Some("text"), Some("pretty"), true), "json");
        assert_eq!(resolve_output(false, Some("text"), Some("human"), false), "pretty");
        assert_eq!(resolve_output(false, Some("table"), None, true), "text");
        assert_eq!(resolve_output(false, Some("bogus"), Some("bogus"), true), "pretty");
        assert_eq!(resolve_output(false, None, None, false), "text");
    }
}
