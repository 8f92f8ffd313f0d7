use crate::normalize::normalize_file;
use crate::{IngestError, Item};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

pub const JSON_FILE_SUFFIX: &str = ".json";

/// Lists the immediate children of `folder` whose name ends in `.json`, sorted by file name.
///
/// Failing to read `folder` itself is an error; an unreadable child entry is skipped.
pub fn discover_json_files(folder: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) if error.depth() == 0 => return Err(IngestError::Walk(error)),
            Err(error) => {
                warn!(path = %folder.display(), error = %error, "skipping unreadable entry");
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let is_json = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(JSON_FILE_SUFFIX));

        if is_json {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

pub(crate) fn absolute_path(path: &Path) -> Result<PathBuf, IngestError> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

pub struct SkippedDirectory {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Default)]
pub struct LoadReport {
    pub items: Vec<Item>,
    pub skipped_files: Vec<SkippedFile>,
    pub skipped_directories: Vec<SkippedDirectory>,
}

/// Normalizes every snapshot file in one directory. Files that cannot be read or
/// recognized are recorded in the report instead of failing the directory.
pub fn ingest_directory(folder: &Path) -> Result<LoadReport, IngestError> {
    let files = discover_json_files(folder)?;
    let mut report = LoadReport::default();

    for path in files {
        match normalize_file(&path) {
            Ok(items) => report.items.extend(items),
            Err(error) => {
                warn!(path = %path.display(), reason = %error, "skipping snapshot file");
                report.skipped_files.push(SkippedFile {
                    path,
                    reason: error.to_string(),
                });
            }
        }
    }

    Ok(report)
}

/// Aggregates every configured directory into one dataset, in directory order.
///
/// Missing, non-directory and unreadable directories are skipped. The load only fails when
/// no directories were given, a path cannot be made absolute, or none of them was usable.
pub fn load_directories(folders: &[PathBuf]) -> Result<LoadReport, IngestError> {
    if folders.is_empty() {
        return Err(IngestError::InvalidArgument(
            "at least one input directory is required".to_string(),
        ));
    }

    let mut report = LoadReport::default();
    let mut usable = 0usize;

    for folder in folders {
        let absolute = absolute_path(folder)?;

        let reason = match fs::metadata(&absolute) {
            Ok(metadata) if metadata.is_dir() => match ingest_directory(&absolute) {
                Ok(directory) => {
                    usable += 1;
                    report.items.extend(directory.items);
                    report.skipped_files.extend(directory.skipped_files);
                    continue;
                }
                Err(error) => error.to_string(),
            },
            Ok(_) => "not a directory".to_string(),
            Err(error) if error.kind() == ErrorKind::NotFound => "does not exist".to_string(),
            Err(error) => error.to_string(),
        };

        warn!(path = %absolute.display(), reason = %reason, "skipping input directory");
        report.skipped_directories.push(SkippedDirectory {
            path: absolute,
            reason,
        });
    }

    if usable == 0 {
        return Err(IngestError::NoUsableDirectories(folders.len()));
    }

    info!(
        items = report.items.len(),
        directories = usable,
        skipped_files = report.skipped_files.len(),
        "snapshot load complete"
    );

    Ok(report)
}
