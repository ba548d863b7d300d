use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_timeout")]
    pub http_timeout_ms: u64,
    #[serde(default = "default_timeout")]
    pub tcp_timeout_ms: u64,
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_port() -> u16 { 4747 }
fn default_timeout() -> u64 { 3500 }
fn default_template_path() -> PathBuf { PathBuf::from("templates/index.html") }
fn default_static_dir() -> PathBuf { PathBuf::from("public") }

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: default_port(),
            http_timeout_ms: default_timeout(),
            tcp_timeout_ms: default_timeout(),
            template_path: default_template_path(),
            static_dir: default_static_dir(),
        }
    }
}

impl Settings {
    /// Reads `path` when it exists, then applies environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let base = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Settings::default()
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from a key lookup; empty values count as unset.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        match get("PORT") {
            Some(port) => {
                self.port = port
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid PORT value {:?}", port))?;
            }
            None => info!("No PORT environment variable detected, defaulting to {}", self.port),
        }
        if let Some(ms) = get("HTTP_TIMEOUT_MS") {
            self.http_timeout_ms = ms
                .trim()
                .parse()
                .with_context(|| format!("Invalid HTTP_TIMEOUT_MS value {:?}", ms))?;
        }
        if let Some(ms) = get("TCP_TIMEOUT_MS") {
            self.tcp_timeout_ms = ms
                .trim()
                .parse()
                .with_context(|| format!("Invalid TCP_TIMEOUT_MS value {:?}", ms))?;
        }
        if let Some(path) = get("INDEX_TEMPLATE") {
            self.template_path = PathBuf::from(path);
        }
        if let Some(dir) = get("STATIC_DIR") {
            self.static_dir = PathBuf::from(dir);
        }

        // a zero timeout fails every probe before it starts
        ensure!(self.http_timeout_ms > 0, "HTTP_TIMEOUT_MS must be greater than zero");
        ensure!(self.tcp_timeout_ms > 0, "TCP_TIMEOUT_MS must be greater than zero");

        Ok(self)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    pub fn tcp_timeout(&self) -> Duration {
        Duration::from_millis(self.tcp_timeout_ms)
    }
}
