use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const API_BASE_VAR: &str = "GEMINI_API_BASE";

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "API key not found: set GEMINI_API_KEY in the environment, a .env file, or {}",
        .secrets_path.display()
    )]
    MissingApiKey { secrets_path: PathBuf },
    #[error("Failed to read secrets file {}: {source}", .path.display())]
    ReadSecrets {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse secrets file {}: {source}", .path.display())]
    ParseSecrets {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Deserialize, Default)]
struct SecretsFile {
    #[serde(rename = "GEMINI_API_KEY")]
    gemini_api_key: Option<String>,
}

#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Settings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 4096,
        }
    }

    /// Reads the process environment, falling back to the secrets file for
    /// the API key. Callers load `.env` beforehand.
    pub fn load(secrets_path: &Path) -> Result<Self, ConfigError> {
        let api_key = resolve_api_key(std::env::var(API_KEY_VAR).ok(), secrets_path)?;
        let mut settings = Self::new(api_key);
        if let Some(model) = non_blank(std::env::var(MODEL_VAR).ok()) {
            settings.model = model;
        }
        if let Some(api_base) = non_blank(std::env::var(API_BASE_VAR).ok()) {
            settings.api_base = api_base;
        }
        Ok(settings)
    }
}

/// Picks the API key from the environment value, else from the secrets file.
///
/// A secrets file that does not exist is treated as empty. Blank keys count
/// as missing.
pub fn resolve_api_key(env_value: Option<String>, secrets_path: &Path) -> Result<String, ConfigError> {
    if let Some(key) = non_blank(env_value) {
        return Ok(key);
    }

    let secrets = match std::fs::read_to_string(secrets_path) {
        Ok(content) => toml::from_str::<SecretsFile>(&content).map_err(|source| {
            ConfigError::ParseSecrets {
                path: secrets_path.to_path_buf(),
                source,
            }
        })?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => SecretsFile::default(),
        Err(source) => {
            return Err(ConfigError::ReadSecrets {
                path: secrets_path.to_path_buf(),
                source,
            });
        }
    };

    non_blank(secrets.gemini_api_key).ok_or_else(|| ConfigError::MissingApiKey {
        secrets_path: secrets_path.to_path_buf(),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
