//! Concurrency gate - one in-flight playback per category.
//!
//! A request for a category that is already playing is turned away
//! immediately, with no queueing. Different categories never block each other.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::domain::Category;
use crate::ports::PlaybackError;

/// Shared set of categories that are currently playing.
///
/// Cloning is cheap and every clone observes the same state.
#[derive(Debug, Clone, Default)]
pub struct ConcurrencyGate {
    active: Arc<Mutex<HashSet<Category>>>,
}

impl ConcurrencyGate {
    /// Create a new gate with no active categories.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `category`, failing if it is already held.
    ///
    /// The returned token releases the category when dropped.
    pub fn acquire(&self, category: Category) -> Result<AdmissionToken, PlaybackError> {
        if !self.lock().insert(category) {
            debug!(%category, "Admission rejected: category already playing");
            return Err(PlaybackError::AlreadyActive { category });
        }
        debug!(%category, "Admission granted");
        Ok(AdmissionToken {
            gate: self.clone(),
            category,
        })
    }

    /// Release `category`. Releasing a category that isn't held is a no-op.
    pub fn release(&self, category: Category) {
        if self.lock().remove(&category) {
            debug!(%category, "Admission released");
        }
    }

    /// Check whether `category` is currently held.
    #[must_use]
    pub fn is_active(&self, category: Category) -> bool {
        self.lock().contains(&category)
    }

    /// Number of categories currently held.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.lock().len()
    }

    // The set is never left half-updated, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashSet<Category>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Right to play in one category. Releases the category on drop.
#[derive(Debug)]
#[must_use = "dropping the token releases the category immediately"]
pub struct AdmissionToken {
    gate: ConcurrencyGate,
    category: Category,
}

impl AdmissionToken {
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }
}

impl Drop for AdmissionToken {
    fn drop(&mut self) {
        self.gate.release(self.category);
    }
}
