//! Bounded, TTL-expiring cache of file metadata for file playback requests.
//!
//! Entries expire `ttl` after they were created regardless of how often they
//! are hit. Capacity pressure is handled second, by evicting the least-recently-accessed
//! entries. The same two-phase sweep runs on insertion when the cache is
//! full and periodically from a background task (see `chime-runtime`).

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, trace};

use crate::ports::{FileMetadata, FileMetadataPort, PlaybackError, SystemFileMetadata};

/// Default maximum number of cached paths.
pub const MAX_CACHE_SIZE: usize = 100;

/// Default lifetime of a cache entry.
pub const CACHE_TTL: Duration = Duration::from_millis(60_000);

/// Sizing and expiry policy for a [`StatCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCacheConfig {
    pub ttl: Duration,
    pub max_entries: usize,
}

impl Default for StatCacheConfig {
    fn default() -> Self {
        Self {
            ttl: CACHE_TTL,
            max_entries: MAX_CACHE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    metadata: FileMetadata,
    created_at: Instant,
    last_accessed_at: Instant,
}

/// What a sweep removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub expired: usize,
    pub evicted: usize,
}

impl SweepStats {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.expired + self.evicted
    }
}

/// Path → metadata cache shared by all file requests.
pub struct StatCache {
    entries: Mutex<HashMap<PathBuf, CacheEntry>>,
    provider: Arc<dyn FileMetadataPort>,
    config: StatCacheConfig,
}

impl std::fmt::Debug for StatCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatCache")
            .field("len", &self.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl StatCache {
    /// Create a cache over an arbitrary metadata provider.
    pub fn new(provider: Arc<dyn FileMetadataPort>, config: StatCacheConfig) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            provider,
            config,
        }
    }

    /// Create a cache over the real filesystem.
    pub fn with_system_provider(config: StatCacheConfig) -> Self {
        Self::new(Arc::new(SystemFileMetadata), config)
    }

    #[must_use]
    pub const fn config(&self) -> StatCacheConfig {
        self.config
    }

    /// Resolve metadata for `path`, from cache when fresh.
    ///
    /// Fails with [`PlaybackError::Path`] if the lookup fails or the path is
    /// not a regular file.
    pub async fn resolve(&self, path: &Path) -> Result<FileMetadata, PlaybackError> {
        let metadata = match self.lookup(path) {
            Some(metadata) => {
                trace!(path = %path.display(), "Stat cache hit");
                metadata
            }
            None => self.refresh(path).await?,
        };

        if !metadata.is_file() {
            return Err(PlaybackError::path(path, "not a regular file"));
        }
        Ok(metadata)
    }

    /// Run the expiry-then-LRU sweep down to the configured capacity.
    pub fn sweep(&self) -> SweepStats {
        let mut entries = self.lock();
        let stats = Self::evict(
            &mut entries,
            Instant::now(),
            self.config.ttl,
            self.config.max_entries,
        );
        if stats.total() > 0 {
            debug!(
                expired = stats.expired,
                evicted = stats.evicted,
                remaining = entries.len(),
                "Stat cache swept"
            );
        }
        stats
    }

    /// Number of entries currently held, expired or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lookup(&self, path: &Path) -> Option<FileMetadata> {
        let now = Instant::now();
        let mut entries = self.lock();
        let entry = entries.get_mut(path)?;
        if now.duration_since(entry.created_at) >= self.config.ttl {
            return None;
        }
        entry.last_accessed_at = now;
        Some(entry.metadata)
    }

    async fn refresh(&self, path: &Path) -> Result<FileMetadata, PlaybackError> {
        trace!(path = %path.display(), "Stat cache miss");

        // The lock is not held across this await
        let metadata = match self.provider.metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) => {
                self.lock().remove(path);
                return Err(PlaybackError::path(path, describe_io_error(&e)));
            }
        };

        let now = Instant::now();
        let mut entries = self.lock();
        if !entries.contains_key(path) && entries.len() >= self.config.max_entries {
            // Leave room for the entry about to be inserted
            Self::evict(
                &mut entries,
                now,
                self.config.ttl,
                self.config.max_entries.saturating_sub(1),
            );
        }
        entries.insert(
            path.to_path_buf(),
            CacheEntry {
                metadata,
                created_at: now,
                last_accessed_at: now,
            },
        );
        Ok(metadata)
    }

    fn evict(
        entries: &mut HashMap<PathBuf, CacheEntry>,
        now: Instant,
        ttl: Duration,
        limit: usize,
    ) -> SweepStats {
        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.created_at) < ttl);
        let expired = before - entries.len();

        let mut evicted = 0;
        if entries.len() > limit {
            let mut by_access: Vec<(PathBuf, Instant)> = entries
                .iter()
                .map(|(path, entry)| (path.clone(), entry.last_accessed_at))
                .collect();
            by_access.sort_by_key(|(_, accessed)| *accessed);

            let excess = entries.len() - limit;
            for (path, _) in by_access.into_iter().take(excess) {
                entries.remove(&path);
                evicted += 1;
            }
        }

        SweepStats { expired, evicted }
    }

    // Entries are only ever inserted or removed whole, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn describe_io_error(e: &io::Error) -> String {
    match e.kind() {
        io::ErrorKind::NotFound => "file not found".to_string(),
        io::ErrorKind::PermissionDenied => "permission denied".to_string(),
        _ => e.to_string(),
    }
}
