//! Onboard - brand onboarding wizard
//!
//! Library half of the `onboard` binary: the wizard engine, snapshot
//! persistence, the submission client and configuration. The terminal UI
//! lives in the binary.

pub mod api;
pub mod config;
pub mod logging;
pub mod persistence;
pub mod wizard;

use config::Config;
use persistence::{FileSnapshotStore, FormPersistenceGuard};

/// Persistence guard for `config`.
///
/// Snapshots go to `<state>/<storage_key>.json` unless persistence is
/// disabled by config or `no_persist`, in which case answers live only in
/// memory.
pub fn persistence_guard(config: &Config, no_persist: bool) -> FormPersistenceGuard {
    if no_persist || !config.persistence.enabled {
        tracing::debug!("Form persistence disabled");
        return FormPersistenceGuard::in_memory();
    }
    FormPersistenceGuard::new(Box::new(FileSnapshotStore::new(
        config.state_path(),
        config.persistence.storage_key.clone(),
    )))
}
