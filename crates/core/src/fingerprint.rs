use crate::ingest::{absolute_path, discover_json_files};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::warn;

/// Last observed modification time of every snapshot file, keyed by absolute path.
pub type FingerprintSet = BTreeMap<PathBuf, SystemTime>;

/// Scans the configured directories. Unreadable directories and files are left out.
pub fn collect_fingerprints(folders: &[PathBuf]) -> FingerprintSet {
    let mut fingerprints = FingerprintSet::new();

    for folder in folders {
        let absolute = match absolute_path(folder) {
            Ok(path) => path,
            Err(error) => {
                warn!(path = %folder.display(), error = %error, "cannot resolve directory for fingerprinting");
                continue;
            }
        };

        let files = match discover_json_files(&absolute) {
            Ok(files) => files,
            Err(error) => {
                warn!(path = %absolute.display(), error = %error, "failed to scan directory for changes");
                continue;
            }
        };

        for path in files {
            match modified_at(&path) {
                Ok(modified) => {
                    fingerprints.insert(path, modified);
                }
                Err(error) => {
                    warn!(path = %path.display(), error = %error, "failed to stat snapshot file");
                }
            }
        }
    }

    fingerprints
}

fn modified_at(path: &Path) -> std::io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}

/// Reports a change when a file was added, removed, or got a strictly newer timestamp.
pub fn needs_reload(previous: &FingerprintSet, current: &FingerprintSet) -> bool {
    if previous.len() != current.len() {
        return true;
    }

    let changed_or_removed = previous
        .iter()
        .any(|(path, old)| current.get(path).map_or(true, |new| new > old));

    let added = current.keys().any(|path| !previous.contains_key(path));

    changed_or_removed || added
}
