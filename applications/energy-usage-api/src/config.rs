use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AppError, Result};
use crate::services::generator::{parse_timezone, SeriesProfile, ValueRange};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// IANA zone the calendar of generated series is anchored to
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_day_profile")]
    pub day: SeriesProfile,
    #[serde(default = "default_month_profile")]
    pub month: SeriesProfile,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            day: default_day_profile(),
            month: default_month_profile(),
        }
    }
}

fn default_timezone() -> String {
    "Europe/Warsaw".into()
}

fn default_day_profile() -> SeriesProfile {
    SeriesProfile::HOURLY
}

fn default_month_profile() -> SeriesProfile {
    SeriesProfile::DAILY
}

impl Config {
    /// Load YAML from disk, expand $(VAR)/${VAR} placeholders, apply env
    /// overrides and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        tracing::warn!(path = %path.display(), "Config file not found, using defaults");
        let mut cfg = Self::default();
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        let expanded = expand_env_placeholders(raw)?;
        let mut cfg: Self = serde_yaml::from_str(&expanded)?;
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(tz) = std::env::var("ENERGY_TIMEZONE") {
            self.generator.timezone = tz;
        }

        if let Ok(port) = std::env::var("SERVER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| AppError::Config(format!("SERVER_PORT is not a port: {}", port)))?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Config("Server port cannot be 0".to_string()));
        }

        parse_timezone(&self.generator.timezone)?;

        for (name, profile) in [("day", &self.generator.day), ("month", &self.generator.month)] {
            check_range(&format!("generator.{}.consumption", name), &profile.consumption)?;
            check_range(&format!("generator.{}.price", name), &profile.price)?;
            if profile.price.min <= 0.0 {
                return Err(AppError::Config(format!(
                    "generator.{}.price must be positive",
                    name
                )));
            }
        }

        Ok(())
    }
}

fn check_range(field: &str, range: &ValueRange) -> Result<()> {
    if !range.min.is_finite() || !range.max.is_finite() {
        return Err(AppError::Config(format!("{} must be finite", field)));
    }
    if range.min < 0.0 {
        return Err(AppError::Config(format!("{} cannot be negative", field)));
    }
    if range.min >= range.max {
        return Err(AppError::Config(format!(
            "{}: min ({}) must be below max ({})",
            field, range.min, range.max
        )));
    }
    Ok(())
}

/// Substitute `$(VAR)` and `${VAR}` with environment values. `$$` is a literal `$`.
fn expand_env_placeholders(input: &str) -> Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        let close = match chars.peek() {
            Some('$') => {
                chars.next();
                out.push('$');
                continue;
            }
            Some('(') => ')',
            Some('{') => '}',
            _ => {
                out.push('$');
                continue;
            }
        };
        chars.next();

        let mut name = String::new();
        let mut terminated = false;
        for ch in chars.by_ref() {
            if ch == close {
                terminated = true;
                break;
            }
            name.push(ch);
        }
        if !terminated {
            return Err(AppError::Config(format!(
                "unterminated env placeholder: missing '{}'",
                close
            )));
        }

        let value = std::env::var(&name)
            .map_err(|_| AppError::Config(format!("missing environment variable: {}", name)))?;
        out.push_str(&value);
    }

    Ok(out)
}
