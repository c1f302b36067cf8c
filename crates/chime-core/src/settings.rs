//! Playback settings and validation.
//!
//! Settings are plain data with defaults; adapters load them from the
//! environment (optionally primed from a `.env` file) and may override
//! individual fields from command-line flags.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::stat_cache::{CACHE_TTL, MAX_CACHE_SIZE, StatCacheConfig};

/// Default wall-clock budget for one playback process.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default interval between background stat cache sweeps.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300;

/// Default grace period between SIGTERM and SIGKILL on timeout.
pub const DEFAULT_KILL_GRACE_MS: u64 = 500;

/// Environment variables read by [`PlaybackSettings::from_env`].
pub mod env_keys {
    pub const TIMEOUT_MS: &str = "CHIME_TIMEOUT_MS";
    pub const CACHE_TTL_MS: &str = "CHIME_CACHE_TTL_MS";
    pub const CACHE_MAX_ENTRIES: &str = "CHIME_CACHE_MAX_ENTRIES";
    pub const SWEEP_INTERVAL_SECS: &str = "CHIME_SWEEP_INTERVAL_SECS";
    pub const KILL_GRACE_MS: &str = "CHIME_KILL_GRACE_MS";
}

/// Tunables for the playback subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Budget for each external process, in milliseconds.
    pub timeout_ms: u64,

    /// Lifetime of a stat cache entry, in milliseconds.
    pub cache_ttl_ms: u64,

    /// Maximum number of paths held by the stat cache.
    pub cache_max_entries: usize,

    /// Seconds between background stat cache sweeps.
    pub sweep_interval_secs: u64,

    /// Milliseconds to wait after SIGTERM before sending SIGKILL.
    pub kill_grace_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            cache_ttl_ms: u64::try_from(CACHE_TTL.as_millis()).unwrap_or(60_000),
            cache_max_entries: MAX_CACHE_SIZE,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            kill_grace_ms: DEFAULT_KILL_GRACE_MS,
        }
    }
}

impl PlaybackSettings {
    /// Load settings from process environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings from an arbitrary key lookup (used by `from_env` and tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        if let Some(v) = parse_var(&lookup, env_keys::TIMEOUT_MS)? {
            settings.timeout_ms = v;
        }
        if let Some(v) = parse_var(&lookup, env_keys::CACHE_TTL_MS)? {
            settings.cache_ttl_ms = v;
        }
        if let Some(v) = parse_var(&lookup, env_keys::CACHE_MAX_ENTRIES)? {
            settings.cache_max_entries = v;
        }
        if let Some(v) = parse_var(&lookup, env_keys::SWEEP_INTERVAL_SECS)? {
            settings.sweep_interval_secs = v;
        }
        if let Some(v) = parse_var(&lookup, env_keys::KILL_GRACE_MS)? {
            settings.kill_grace_ms = v;
        }
        validate_settings(&settings)?;
        Ok(settings)
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub const fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    #[must_use]
    pub const fn kill_grace(&self) -> Duration {
        Duration::from_millis(self.kill_grace_ms)
    }

    #[must_use]
    pub const fn cache_config(&self) -> StatCacheConfig {
        StatCacheConfig {
            ttl: Duration::from_millis(self.cache_ttl_ms),
            max_entries: self.cache_max_entries,
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, SettingsError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| SettingsError::InvalidNumber { key, value: raw }),
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Timeout must be between 100 and 600,000 ms, got {0}")]
    InvalidTimeout(u64),

    #[error("Cache TTL must be at least 1 ms, got {0}")]
    InvalidCacheTtl(u64),

    #[error("Cache size must be between 1 and 10,000 entries, got {0}")]
    InvalidCacheSize(usize),

    #[error("Sweep interval must be at least 1 second, got {0}")]
    InvalidSweepInterval(u64),

    #[error("{key} must be a non-negative integer, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
}

/// Validate playback settings.
pub fn validate_settings(settings: &PlaybackSettings) -> Result<(), SettingsError> {
    if !(100..=600_000).contains(&settings.timeout_ms) {
        return Err(SettingsError::InvalidTimeout(settings.timeout_ms));
    }
    if settings.cache_ttl_ms == 0 {
        return Err(SettingsError::InvalidCacheTtl(settings.cache_ttl_ms));
    }
    if !(1..=10_000).contains(&settings.cache_max_entries) {
        return Err(SettingsError::InvalidCacheSize(settings.cache_max_entries));
    }
    if settings.sweep_interval_secs == 0 {
        return Err(SettingsError::InvalidSweepInterval(
            settings.sweep_interval_secs,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = PlaybackSettings::default();
        assert_eq!(settings.timeout(), Duration::from_secs(10));
        assert_eq!(settings.cache_config(), StatCacheConfig::default());
        assert_eq!(settings.sweep_interval(), Duration::from_secs(300));
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let settings = PlaybackSettings::from_lookup(lookup_from(&[
            (env_keys::TIMEOUT_MS, "2500"),
            (env_keys::CACHE_MAX_ENTRIES, " 20 "),
            (env_keys::SWEEP_INTERVAL_SECS, ""),
        ]))
        .unwrap();
        assert_eq!(settings.timeout_ms, 2500);
        assert_eq!(settings.cache_max_entries, 20);
        assert_eq!(settings.sweep_interval_secs, DEFAULT_SWEEP_INTERVAL_SECS);
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err =
            PlaybackSettings::from_lookup(lookup_from(&[(env_keys::TIMEOUT_MS, "ten")])).unwrap_err();
        assert_eq!(
            err,
            SettingsError::InvalidNumber {
                key: env_keys::TIMEOUT_MS,
                value: "ten".to_string()
            }
        );
    }

    #[test]
    fn test_validation_bounds() {
        let mut settings = PlaybackSettings {
            timeout_ms: 50,
            ..PlaybackSettings::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::InvalidTimeout(50))
        ));

        settings.timeout_ms = DEFAULT_TIMEOUT_MS;
        settings.cache_max_entries = 0;
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::InvalidCacheSize(0))
        ));
    }

    #[test]
    fn test_serde_defaults_fill_missing_fields() {
        let settings: PlaybackSettings = serde_json::from_str(r#"{"timeout_ms": 3000}"#).unwrap();
        assert_eq!(settings.timeout_ms, 3000);
        assert_eq!(settings.cache_max_entries, MAX_CACHE_SIZE);
    }
}
