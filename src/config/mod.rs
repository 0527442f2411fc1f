use crate::tui::components::dialogs::DialogTimings;
use crate::tui::styles::Theme;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Application configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How long a closed dialog stays on screen for its exit transition
    pub close_transition_ms: u64,

    /// Delay between opening and focusing the primary control
    pub focus_delay_ms: u64,

    /// Interval between tick events in the host loop
    pub tick_rate_ms: u64,

    /// Capture mouse input
    pub mouse_enabled: bool,

    /// Default backdrop dismissal for confirm prompts
    pub close_on_backdrop: bool,

    /// Built-in color theme, "dark" or "light"
    pub theme: String,

    /// Write logs here instead of stderr
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let timings = DialogTimings::default();
        Self {
            close_transition_ms: timings.close_transition.as_millis() as u64,
            focus_delay_ms: timings.focus_delay.as_millis() as u64,
            tick_rate_ms: 16,
            mouse_enabled: true,
            close_on_backdrop: true,
            theme: "dark".to_string(),
            log_file: None,
        }
    }
}

/// Values read from a configuration file; absent keys leave the current
/// value untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    pub close_transition_ms: Option<u64>,
    pub focus_delay_ms: Option<u64>,
    pub tick_rate_ms: Option<u64>,
    pub mouse_enabled: Option<bool>,
    pub close_on_backdrop: Option<bool>,
    pub theme: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Initialize configuration from defaults, environment and the first
    /// configuration file found (or `explicit` when given).
    pub async fn init(explicit: Option<&Path>) -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = Self::default();
        config.load_from_env();

        if let Some(file_config) = Self::load_from_file(explicit).await? {
            config.merge_with(file_config);
        }

        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(&mut self) {
        self.apply_env(|name| std::env::var(name).ok());
    }

    /// Apply variables provided by `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ms) = parse_var(&lookup, "MODALS_CLOSE_TRANSITION_MS", |v| v.parse().ok()) {
            self.close_transition_ms = ms;
        }
        if let Some(ms) = parse_var(&lookup, "MODALS_FOCUS_DELAY_MS", |v| v.parse().ok()) {
            self.focus_delay_ms = ms;
        }
        if let Some(ms) = parse_var(&lookup, "MODALS_TICK_RATE_MS", |v| v.parse().ok()) {
            self.tick_rate_ms = ms;
        }
        if let Some(enabled) = parse_var(&lookup, "MODALS_MOUSE", parse_bool) {
            self.mouse_enabled = enabled;
        }
        if let Some(enabled) = parse_var(&lookup, "MODALS_CLOSE_ON_BACKDROP", parse_bool) {
            self.close_on_backdrop = enabled;
        }
        if let Some(theme) = lookup("MODALS_THEME").filter(|v| !v.is_empty()) {
            self.theme = theme;
        }
        if let Some(path) = lookup("MODALS_LOG_FILE").filter(|v| !v.is_empty()) {
            self.log_file = Some(PathBuf::from(path));
        }
    }

    /// Candidate configuration files, in priority order
    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./.modals.json"), PathBuf::from("./modals.json")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("modals").join("modals.json"));
        }
        paths
    }

    /// Load the explicit file, or the first candidate that exists.
    pub async fn load_from_file(explicit: Option<&Path>) -> Result<Option<FileConfig>> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(anyhow!("Configuration file not found: {}", path.display()));
            }
            return Self::load_from_path(path).await.map(Some);
        }

        for path in Self::candidate_paths() {
            if path.exists() {
                return Self::load_from_path(&path).await.map(Some);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    pub async fn load_from_path(path: &Path) -> Result<FileConfig> {
        debug!("Loading configuration from: {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: FileConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    /// Merge file values into this configuration
    pub fn merge_with(&mut self, other: FileConfig) {
        if let Some(ms) = other.close_transition_ms {
            self.close_transition_ms = ms;
        }
        if let Some(ms) = other.focus_delay_ms {
            self.focus_delay_ms = ms;
        }
        if let Some(ms) = other.tick_rate_ms {
            self.tick_rate_ms = ms;
        }
        if let Some(enabled) = other.mouse_enabled {
            self.mouse_enabled = enabled;
        }
        if let Some(enabled) = other.close_on_backdrop {
            self.close_on_backdrop = enabled;
        }
        if let Some(theme) = other.theme {
            self.theme = theme;
        }
        if other.log_file.is_some() {
            self.log_file = other.log_file;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.tick_rate_ms == 0 {
            return Err(anyhow!("tick_rate_ms must be greater than zero"));
        }
        if Theme::from_name(&self.theme).is_none() {
            return Err(anyhow!("Unknown theme '{}', expected \"dark\" or \"light\"", self.theme));
        }
        if self.focus_delay_ms >= self.close_transition_ms {
            warn!(
                focus_delay_ms = self.focus_delay_ms,
                close_transition_ms = self.close_transition_ms,
                "focus delay is not shorter than the close transition"
            );
        }
        Ok(())
    }

    pub fn timings(&self) -> DialogTimings {
        DialogTimings::new(
            Duration::from_millis(self.close_transition_ms),
            Duration::from_millis(self.focus_delay_ms),
        )
    }

    /// The configured theme, falling back to the default when unknown
    pub fn theme(&self) -> Theme {
        Theme::from_name(&self.theme).unwrap_or_default()
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

fn parse_var<F, T, P>(lookup: &F, name: &str, parse: P) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Option<T>,
{
    let raw = lookup(name)?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        warn!("Ignoring invalid value for {}: {:?}", name, raw);
    }
    parsed
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
