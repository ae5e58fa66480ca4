//! Layered settings.
//!
//! Resolution order (highest priority first):
//! 1. CLI flags (applied via [`Settings::apply_cli_overrides`])
//! 2. Environment variables (`SEQSUM_*`)
//! 3. Config file (`--config <path>`, else `seqsum.toml` in the working directory)
//! 4. Compiled defaults
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::ClassifyOptions;
use crate::fetch::{NcbiConfig, NCBI_EFETCH_URL};
use crate::report::{ReportOptions, DEFAULT_PREVIEW_LEN};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "seqsum.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io { path: String, source: std::io::Error },

    #[error("failed to parse config {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid value for {field}: {message}")]
    Invalid { field: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    pub base_url: String,
    pub database: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: NCBI_EFETCH_URL.to_string(),
            database: "nucleotide".to_string(),
            timeout_secs: 10,
            max_retries: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Accept the ambiguity code `N`.
    pub allow_ambiguous: bool,
    /// Symbols shown at each end of a report preview.
    pub preview_len: usize,
    pub fetch: FetchSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self { allow_ambiguous: false, preview_len: DEFAULT_PREVIEW_LEN, fetch: FetchSettings::default() }
    }
}

/// Values coming from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub allow_ambiguous: Option<bool>,
    pub preview_len: Option<usize>,
}

impl Settings {
    /// Resolve all layers. A missing default file is fine; a missing explicit
    /// file is an error.
    pub fn load(explicit: Option<&Path>, cli: &CliOverrides) -> Result<Self, ConfigError> {
        let mut settings = match explicit {
            Some(p) => Self::from_file(p)?,
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                if p.exists() { Self::from_file(&p)? } else { Self::default() }
            }
        };
        settings.apply_env_overrides(|k| std::env::var(k).ok())?;
        settings.apply_cli_overrides(cli);
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        let s = Self::from_toml_named(&text, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(s)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Self::from_toml_named(text, "<string>")
    }

    fn from_toml_named(text: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse { path: path.to_string(), message: e.to_string() })
    }

    /// Apply `SEQSUM_ALLOW_AMBIGUOUS`, `SEQSUM_PREVIEW_LEN` and `SEQSUM_NCBI_URL`.
    ///
    /// `lookup` is injected so tests need not touch the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SEQSUM_ALLOW_AMBIGUOUS") {
            self.allow_ambiguous = parse_bool(&v).ok_or_else(|| ConfigError::Invalid {
                field: "SEQSUM_ALLOW_AMBIGUOUS".into(),
                message: format!("expected true/false, got '{v}'"),
            })?;
        }
        if let Some(v) = lookup("SEQSUM_PREVIEW_LEN") {
            self.preview_len = v.trim().parse().map_err(|_| ConfigError::Invalid {
                field: "SEQSUM_PREVIEW_LEN".into(),
                message: format!("expected a positive integer, got '{v}'"),
            })?;
        }
        if let Some(v) = lookup("SEQSUM_NCBI_URL") {
            self.fetch.base_url = v;
        }
        Ok(())
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(a) = cli.allow_ambiguous {
            self.allow_ambiguous = a;
        }
        if let Some(p) = cli.preview_len {
            self.preview_len = p;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.preview_len == 0 {
            return Err(ConfigError::Invalid { field: "preview_len".into(), message: "must be at least 1".into() });
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Invalid { field: "fetch.timeout_secs".into(), message: "must be at least 1".into() });
        }
        if self.fetch.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "fetch.base_url".into(), message: "must not be empty".into() });
        }
        Ok(())
    }

    pub fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions { allow_ambiguous: self.allow_ambiguous }
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions { preview_len: self.preview_len }
    }

    pub fn ncbi_config(&self) -> NcbiConfig {
        NcbiConfig {
            base_url: self.fetch.base_url.clone(),
            database: self.fetch.database.clone(),
            timeout: Duration::from_secs(self.fetch.timeout_secs),
            max_retries: self.fetch.max_retries,
            ..NcbiConfig::default()
        }
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert!(!s.allow_ambiguous);
        assert_eq!(s.preview_len, 20);
        assert_eq!(s.fetch.timeout_secs, 10);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let s = Settings::from_toml("allow_ambiguous = true\n[fetch]\nmax_retries = 5\n").unwrap();
        assert!(s.allow_ambiguous);
        assert_eq!(s.preview_len, 20);
        assert_eq!(s.fetch.max_retries, 5);
        assert_eq!(s.fetch.database, "nucleotide");
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        assert!(matches!(Settings::from_toml("preview_len = \"many\""), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn env_then_cli_precedence() {
        let env: HashMap<&str, &str> =
            [("SEQSUM_ALLOW_AMBIGUOUS", "yes"), ("SEQSUM_PREVIEW_LEN", "8"), ("SEQSUM_NCBI_URL", "http://localhost:9/efetch")]
                .into_iter()
                .collect();
        let mut s = Settings::default();
        s.apply_env_overrides(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert!(s.allow_ambiguous);
        assert_eq!(s.preview_len, 8);
        assert_eq!(s.ncbi_config().base_url, "http://localhost:9/efetch");

        s.apply_cli_overrides(&CliOverrides { allow_ambiguous: Some(false), preview_len: None });
        assert!(!s.allow_ambiguous);
        assert_eq!(s.report_options().preview_len, 8);
    }

    #[test]
    fn bad_env_values_are_rejected() {
        let mut s = Settings::default();
        let err = s.apply_env_overrides(|k| (k == "SEQSUM_ALLOW_AMBIGUOUS").then(|| "maybe".to_string()));
        assert!(matches!(err, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn zero_preview_len_fails_validation() {
        let s = Settings { preview_len: 0, ..Settings::default() };
        assert!(matches!(s.validate(), Err(ConfigError::Invalid { field, .. }) if field == "preview_len"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = Settings::load(Some(Path::new("/no/such/seqsum.toml")), &CliOverrides::default());
        assert!(matches!(err, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("cfg.toml");
        std::fs::write(&p, "preview_len = 5\n").unwrap();
        let s = Settings::load(Some(&p), &CliOverrides::default()).unwrap();
        assert_eq!(s.preview_len, 5);
    }
}
