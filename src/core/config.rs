//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tabib/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! The Gemini API key belongs here or in `GEMINI_API_KEY`, never in code.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::locale::Locale;
use crate::core::session::DEFAULT_SESSION_PREFIX;
use crate::core::storage::{default_data_dir, is_valid_key};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TabibConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub locale: Option<Locale>,
    pub session_prefix: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub persona: Option<String>,
    pub persona_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub locale: Locale,
    pub session_prefix: String,
    pub data_dir: PathBuf,
    pub persona: String,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub model_name: String,
}

/// Values given on the command line (`None` = flag not passed).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub locale: Option<Locale>,
    pub model: Option<String>,
    pub data_dir: Option<PathBuf>,
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

/// Returns `~/.tabib/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tabib"))
}

/// Returns the path to `~/.tabib/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.tabib/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TabibConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TabibConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TabibConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TabibConfig::default());
    }

    load_config_from(&path)
}

/// Parse the config file at `path`.
pub fn load_config_from(path: &Path) -> Result<TabibConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TabibConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    // api_key deliberately not logged
    debug!(
        "Config: locale={:?}, prefix={:?}, data_dir={:?}, model={:?}",
        config.general.locale,
        config.general.session_prefix,
        config.general.data_dir,
        config.gemini.model
    );
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Tabib Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# locale = "ar"                      # "ar" or "en"  (env: TABIB_LOCALE)
# session_prefix = "chatSession"     # stored as <prefix>_YYYY-MM-DD.json
# data_dir = "/home/me/.tabib/sessions"   # env: TABIB_DATA_DIR
# persona = "You are a professional virtual assistant doctor."
# persona_file = "persona.md"        # Path relative to ~/.tabib/

# [gemini]
# api_key = "AIza..."                # Or set GEMINI_API_KEY env var
# base_url = "https://generativelanguage.googleapis.com/v1beta"
# model = "gemini-1.5-flash-latest"  # env: TABIB_MODEL
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TabibConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Locale: CLI → env → config → default
    let locale = cli
        .locale
        .or_else(|| {
            std::env::var("TABIB_LOCALE")
                .ok()
                .and_then(|code| Locale::from_code(&code))
        })
        .or(config.general.locale)
        .unwrap_or_default();

    // Model: CLI → env → config → default
    let model_name = cli
        .model
        .clone()
        .or_else(|| std::env::var("TABIB_MODEL").ok())
        .or_else(|| config.gemini.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // Data dir: CLI → env → config → ~/.tabib/sessions → ./sessions
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| std::env::var("TABIB_DATA_DIR").ok().map(PathBuf::from))
        .or_else(|| config.general.data_dir.clone())
        .or_else(default_data_dir)
        .unwrap_or_else(|| PathBuf::from("sessions"));

    // Prefix must survive as a storage key, or every save would fail
    let session_prefix = match &config.general.session_prefix {
        Some(prefix) if is_valid_key(prefix) => prefix.clone(),
        Some(prefix) => {
            warn!(
                "Ignoring session_prefix {:?}: use only letters, digits, '_' and '-'",
                prefix
            );
            DEFAULT_SESSION_PREFIX.to_string()
        }
        None => DEFAULT_SESSION_PREFIX.to_string(),
    };

    // Persona: inline config wins over file, both win over locale default
    let persona = resolve_persona(config, locale);

    // API key: env → config
    let gemini_api_key = std::env::var("GEMINI_API_KEY")
        .ok()
        .or_else(|| config.gemini.api_key.clone())
        .filter(|k| !k.trim().is_empty());

    // Base URL: env → config → default
    let gemini_base_url = std::env::var("GEMINI_BASE_URL")
        .ok()
        .or_else(|| config.gemini.base_url.clone())
        .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

    ResolvedConfig {
        locale,
        session_prefix,
        data_dir,
        persona,
        gemini_api_key,
        gemini_base_url,
        model_name,
    }
}

/// Resolves the persona: inline wins over file, both win over the locale default.
fn resolve_persona(config: &TabibConfig, locale: Locale) -> String {
    if let Some(ref persona) = config.general.persona {
        return persona.clone();
    }

    // Try loading from persona_file (relative to ~/.tabib/)
    if let Some(ref file) = config.general.persona_file {
        if let Some(dir) = config_dir() {
            let persona_path = dir.join(file);
            match fs::read_to_string(&persona_path) {
                Ok(contents) => {
                    let trimmed = contents.trim().to_string();
                    if !trimmed.is_empty() {
                        info!("Loaded persona from {}", persona_path.display());
                        return trimmed;
                    }
                    warn!("Persona file is empty: {}", persona_path.display());
                }
                Err(e) => {
                    warn!(
                        "Failed to read persona file {}: {}",
                        persona_path.display(),
                        e
                    );
                }
            }
        }
    }

    locale.default_persona().to_string()
}
