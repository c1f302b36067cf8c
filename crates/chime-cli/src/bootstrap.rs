//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Settings (environment, `.env`, command-line overrides)
//! - Stat cache and its background sweeper
//! - Concurrency gate
//! - Process supervisor (via chime-runtime)
//!
//! Command handlers receive the composed [`PlaybackService`].

use std::sync::Arc;

use chime_core::{
    ConcurrencyGate, HostAudio, PlaybackService, PlaybackSettings, StatCache, validate_settings,
};
use chime_runtime::{CacheSweeper, TokioProcessSupervisor};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Playback tunables.
    pub settings: PlaybackSettings,
    /// Host audio programs and sound locations.
    pub host: HostAudio,
}

impl CliConfig {
    /// Read settings from the environment and apply command-line overrides.
    pub fn from_env(timeout_override: Option<u64>) -> Result<Self, CliError> {
        let mut settings = PlaybackSettings::from_env()?;
        if let Some(timeout_ms) = timeout_override {
            settings.timeout_ms = timeout_ms;
        }
        validate_settings(&settings)?;
        Ok(Self {
            settings,
            host: HostAudio::default(),
        })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    service: Arc<PlaybackService>,
    cancel_token: CancellationToken,
    sweeper: JoinHandle<()>,
}

impl CliContext {
    /// Access the playback service.
    pub fn service(&self) -> &Arc<PlaybackService> {
        &self.service
    }

    /// Stop background tasks.
    pub async fn shutdown(self) {
        self.cancel_token.cancel();
        if let Err(e) = self.sweeper.await {
            debug!(error = %e, "Stat cache sweeper ended abnormally");
        }
    }
}

/// Bootstrap the CLI application.
///
/// Must be called from within a tokio runtime: the stat cache sweeper is
/// spawned onto it.
pub fn bootstrap(config: CliConfig) -> CliContext {
    let CliConfig { settings, host } = config;

    let cache = Arc::new(StatCache::with_system_provider(settings.cache_config()));
    let cancel_token = CancellationToken::new();
    let sweeper = CacheSweeper::new(
        Arc::clone(&cache),
        settings.sweep_interval(),
        cancel_token.clone(),
    )
    .spawn();

    let supervisor = Arc::new(TokioProcessSupervisor::new(settings.kill_grace()));
    let service = Arc::new(PlaybackService::new(
        ConcurrencyGate::new(),
        cache,
        supervisor,
        host,
        settings.timeout(),
    ));

    debug!(timeout_ms = settings.timeout_ms, "CLI context ready");

    CliContext {
        service,
        cancel_token,
        sweeper,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chime_core::ToolRequest;
    use serde_json::json;

    #[tokio::test]
    async fn test_bootstrap_serves_listing_requests() {
        let ctx = bootstrap(CliConfig::default());
        let result = ctx
            .service()
            .handle(&ToolRequest::new("list_voices", json!({})))
            .await;
        assert!(!result.is_error);
        assert!(result.message.contains("Samantha"));
        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_bootstrap_uses_configured_cache_limits() {
        let mut config = CliConfig::default();
        config.settings.cache_max_entries = 7;
        let ctx = bootstrap(config);
        assert_eq!(ctx.service().cache().config().max_entries, 7);
        ctx.shutdown().await;
    }
}
