use crate::fingerprint::{collect_fingerprints, needs_reload, FingerprintSet};
use crate::ingest::load_directories;
use crate::{IngestError, Item, Vocabularies};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// Immutable published state: the dataset, its vocabularies and the fingerprints it was built from.
#[derive(Debug)]
pub struct Snapshot {
    items: Vec<Item>,
    vocabularies: Vocabularies,
    fingerprints: FingerprintSet,
    loaded_at: DateTime<Utc>,
}

impl Snapshot {
    fn build(items: Vec<Item>, fingerprints: FingerprintSet) -> Self {
        let vocabularies = Vocabularies::from_items(&items);
        Self {
            items,
            vocabularies,
            fingerprints,
            loaded_at: Utc::now(),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn vocabularies(&self) -> &Vocabularies {
        &self.vocabularies
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Unchanged,
    Reloaded { items: usize },
    Failed,
}

/// Owns the published snapshot and replaces it when the source files change.
///
/// Readers clone the current `Arc<Snapshot>` under a read lock and work on it unlocked.
/// The write lock is only held to swap the pointer.
pub struct ReloadSupervisor {
    folders: Vec<PathBuf>,
    current: RwLock<Arc<Snapshot>>,
}

impl ReloadSupervisor {
    /// Performs the initial load. Fails when none of `folders` is usable.
    pub fn load(folders: Vec<PathBuf>) -> Result<Self, IngestError> {
        let fingerprints = collect_fingerprints(&folders);
        let report = load_directories(&folders)?;
        let snapshot = Snapshot::build(report.items, fingerprints);

        info!(
            items = snapshot.len(),
            directories = folders.len(),
            "initial load complete"
        );

        Ok(Self {
            folders,
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    pub fn current_snapshot(&self) -> Arc<Snapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Runs one reload cycle. Scanning and parsing happen before the write lock is taken;
    /// on failure the published snapshot stays in place.
    pub fn reload_if_changed(&self) -> ReloadOutcome {
        let fresh = collect_fingerprints(&self.folders);
        let published = self.current_snapshot();

        if !needs_reload(&published.fingerprints, &fresh) {
            debug!(files = fresh.len(), "no snapshot changes detected");
            return ReloadOutcome::Unchanged;
        }

        info!(files = fresh.len(), "detected data change, reloading");
        let report = match load_directories(&self.folders) {
            Ok(report) => report,
            Err(error) => {
                error!(error = %error, "failed to reload items, keeping previous dataset");
                return ReloadOutcome::Failed;
            }
        };

        let snapshot = Arc::new(Snapshot::build(report.items, fresh));
        let items = snapshot.len();
        self.publish(snapshot);

        info!(items, "reload complete");
        ReloadOutcome::Reloaded { items }
    }

    fn publish(&self, snapshot: Arc<Snapshot>) {
        let previous = {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *guard, snapshot)
        };
        // The old dataset is freed here, after the lock is released, unless a reader still holds it.
        drop(previous);
    }

    /// Polls for changes every `period` until `shutdown` resolves. Reload cycles never overlap.
    pub async fn run<F>(self: Arc<Self>, period: Duration, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        // interval() panics on a zero period.
        let mut ticker = tokio::time::interval(period.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;
        tokio::pin!(shutdown);

        info!(
            period = ?period,
            directories = self.folders.len(),
            "reload supervisor started"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    let supervisor = Arc::clone(&self);
                    if let Err(error) =
                        tokio::task::spawn_blocking(move || supervisor.reload_if_changed()).await
                    {
                        error!(error = %error, "reload task aborted");
                    }
                }
            }
        }

        info!("reload supervisor stopped");
    }
}
