//! Server configuration.
//!
//! Settings come from an optional YAML file (path in `DOCSERVE_CONFIG`),
//! then environment overrides. The result is resolved once into an immutable
//! [`Config`] that every connection shares read-only.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::http::mime::MimeTable;

pub const CONFIG_ENV: &str = "DOCSERVE_CONFIG";
pub const LISTEN_ENV: &str = "LISTEN";
pub const ROOT_ENV: &str = "DOCSERVE_ROOT";
pub const MAX_CONNECTIONS_ENV: &str = "DOCSERVE_MAX_CONNECTIONS";

/// Raw, unvalidated settings as read from YAML and the environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Address to bind, e.g. "0.0.0.0:8080"
    pub listen_addr: String,
    /// Explicit document root. When absent the root is discovered by name.
    pub root: Option<PathBuf>,
    /// Directory name searched for while walking up from the working directory
    pub root_dir_name: String,
    /// Request log file; `null` disables it
    pub log_file: Option<PathBuf>,
    /// Ceiling on concurrently handled connections; `null` means unbounded
    pub max_connections: Option<usize>,
    /// Longest request line accepted, in bytes
    pub max_request_line: usize,
    /// Extension to content type allow-list
    pub mime_types: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            root: None,
            root_dir_name: "webroot".to_string(),
            log_file: Some(PathBuf::from("server.log")),
            max_connections: None,
            max_request_line: 8192,
            mime_types: BTreeMap::from([
                ("html".to_string(), "text/html".to_string()),
                ("css".to_string(), "text/css".to_string()),
                ("js".to_string(), "application/javascript".to_string()),
            ]),
        }
    }
}

impl Settings {
    /// Reads the YAML file named by `DOCSERVE_CONFIG` (if set), then applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut settings = match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {}", path))?;
                Self::from_yaml(&text).with_context(|| format!("parsing config file {}", path))?
            }
            Err(_) => Self::default(),
        };
        settings.apply_env()?;
        Ok(settings)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(addr) = std::env::var(LISTEN_ENV) {
            self.listen_addr = addr;
        }
        if let Ok(root) = std::env::var(ROOT_ENV) {
            self.root = Some(PathBuf::from(root));
        }
        if let Ok(max) = std::env::var(MAX_CONNECTIONS_ENV) {
            let max = max.parse().with_context(|| {
                format!("{} must be a number, got {:?}", MAX_CONNECTIONS_ENV, max)
            })?;
            self.max_connections = Some(max);
        }
        Ok(())
    }

    /// Validates the settings and produces the runtime [`Config`].
    ///
    /// `cwd` is where root discovery starts when no explicit root is set.
    pub fn resolve(self, cwd: &Path) -> Result<Config> {
        let root = match self.root {
            Some(root) => cwd.join(root),
            None => find_root(cwd, &self.root_dir_name)?,
        };
        let root = canonical_dir(&root)?;

        if self.max_connections == Some(0) {
            anyhow::bail!("max_connections must be at least 1");
        }

        Ok(Config {
            listen_addr: self.listen_addr,
            root,
            log_file: self.log_file,
            max_connections: self.max_connections,
            max_request_line: self.max_request_line,
            mime: MimeTable::from_entries(self.mime_types),
        })
    }
}

/// Immutable runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Canonical absolute document root
    pub root: PathBuf,
    pub log_file: Option<PathBuf>,
    pub max_connections: Option<usize>,
    pub max_request_line: usize,
    pub mime: MimeTable,
}

impl Config {
    /// Loads settings from file and environment and resolves them against the
    /// current working directory.
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().context("reading working directory")?;
        Settings::load()?.resolve(&cwd)
    }

    /// Default settings serving `root`, with the request log disabled.
    pub fn for_root(root: impl AsRef<Path>) -> Result<Self> {
        let settings = Settings {
            root: Some(root.as_ref().to_path_buf()),
            log_file: None,
            ..Settings::default()
        };
        let cwd = std::env::current_dir().context("reading working directory")?;
        settings.resolve(&cwd)
    }
}

/// Walks upward from `start` until a directory containing `name` is found.
pub fn find_root(start: &Path, name: &str) -> Result<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_dir())
        .with_context(|| {
            format!(
                "'{}' directory not found in {} or any parent",
                name,
                start.display()
            )
        })
}

fn canonical_dir(path: &Path) -> Result<PathBuf> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("document root {} does not exist", path.display()))?;
    if !canonical.is_dir() {
        anyhow::bail!("document root {} is not a directory", canonical.display());
    }
    Ok(canonical)
}
