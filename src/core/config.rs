//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.smartstack/config.toml`. If missing on first run, a
//! commented-out default is generated so study operators can discover all
//! options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ExportFormat;
use crate::core::level::Rules;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StudyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub participant: Option<String>,
    pub completion_delay_ms: Option<u64>,
    pub auto_advance: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RulesConfig {
    pub capacity: Option<usize>,
    pub push_target: Option<usize>,
    pub pop_target: Option<u32>,
    pub floor_rings: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ExportConfig {
    pub path: Option<PathBuf>,
    pub format: Option<ExportFormat>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_COMPLETION_DELAY_MS: u64 = 500;

// ============================================================================
// CLI overrides
// ============================================================================

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub participant: Option<String>,
    pub delay_ms: Option<u64>,
    pub auto_advance: bool,
    pub export: Option<PathBuf>,
    pub format: Option<ExportFormat>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub participant: Option<String>,
    pub completion_delay: Duration,
    pub auto_advance: bool,
    pub rules: Rules,
    pub export_path: Option<PathBuf>,
    pub export_format: ExportFormat,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.smartstack/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".smartstack").join("config.toml"))
}

/// Load config from `~/.smartstack/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `StudyConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<StudyConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(StudyConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(StudyConfig::default());
    }

    load_config_from(&path)
}

/// Parse a specific config file.
pub fn load_config_from(path: &Path) -> Result<StudyConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: StudyConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Smart Stack Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# participant = "P-017"              # Or set SMARTSTACK_PARTICIPANT env var
# completion_delay_ms = 500          # Or set SMARTSTACK_DELAY_MS env var
# auto_advance = false               # Skip the success banner between levels

# [rules]
# capacity = 5                       # Max rings per pole (1-11)
# push_target = 3                    # Rings to push in "The Basics"
# pop_target = 5                     # Pop attempts in "Blind Pops"
# floor_rings = 8                    # Floor rings on push levels (1-12)

# [export]
# path = "session.json"              # Or set SMARTSTACK_EXPORT env var
# format = "json"                    # "json" or "jsonl"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &StudyConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// `resolve` with an injectable environment lookup.
fn resolve_with_env(
    config: &StudyConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Participant: CLI → env → config
    let participant = cli
        .participant
        .clone()
        .or_else(|| env("SMARTSTACK_PARTICIPANT"))
        .or_else(|| config.general.participant.clone());

    // Delay: CLI → env → config → default
    let delay_ms = cli
        .delay_ms
        .or_else(|| env("SMARTSTACK_DELAY_MS").and_then(|v| parse_env("SMARTSTACK_DELAY_MS", &v)))
        .or(config.general.completion_delay_ms)
        .unwrap_or(DEFAULT_COMPLETION_DELAY_MS);

    // Export path: CLI → env → config
    let export_path = cli
        .export
        .clone()
        .or_else(|| env("SMARTSTACK_EXPORT").map(PathBuf::from))
        .or_else(|| config.export.path.clone());

    ResolvedConfig {
        participant,
        completion_delay: Duration::from_millis(delay_ms),
        auto_advance: cli.auto_advance || config.general.auto_advance.unwrap_or(false),
        rules: resolve_rules(&config.rules),
        export_path,
        export_format: cli.format.or(config.export.format).unwrap_or_default(),
    }
}

fn parse_env(key: &str, value: &str) -> Option<u64> {
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", key, value, e);
            None
        }
    }
}

/// Clamp rule numbers into ranges the levels can actually be played with.
fn resolve_rules(rules: &RulesConfig) -> Rules {
    let capacity = rules
        .capacity
        .unwrap_or(Rules::DEFAULT_CAPACITY)
        .clamp(1, Rules::MAX_FLOOR_RINGS - 1);
    let push_target = rules
        .push_target
        .unwrap_or(Rules::DEFAULT_PUSH_TARGET)
        .clamp(1, capacity);
    Rules {
        capacity,
        push_target,
        pop_target: rules.pop_target.unwrap_or(Rules::DEFAULT_POP_TARGET).max(1),
        floor_rings: rules
            .floor_rings
            .unwrap_or(Rules::DEFAULT_FLOOR_RINGS)
            .clamp(push_target, Rules::MAX_FLOOR_RINGS),
    }
}
