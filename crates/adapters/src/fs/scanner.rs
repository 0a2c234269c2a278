use std::fs::Metadata;
use std::path::Path;
use std::time::UNIX_EPOCH;

use geonote_application::{ApplicationError, MediaScanner, ScanSummary, ScannedPhoto};
use geonote_domain::{detect_photo_kind, PhotoKind};
use walkdir::WalkDir;

#[derive(Debug, Default)]
pub struct WalkdirFileScanner;

impl MediaScanner for WalkdirFileScanner {
    fn scan(&self, folder: &str) -> Result<ScanSummary, ApplicationError> {
        let folder_path = Path::new(folder);
        if !folder_path.is_dir() {
            return Err(ApplicationError::InvalidInput(format!(
                "folder does not exist or is not a directory: {folder}"
            )));
        }

        let mut summary = ScanSummary::default();

        for entry in WalkDir::new(folder_path)
            .follow_links(true)
            .into_iter()
            .filter_map(Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }

            summary.scanned_files += 1;
            let file_path = entry.path();
            let kind = detect_photo_kind(file_path);
            if kind == PhotoKind::Unsupported {
                continue;
            }

            match scanned_photo(file_path, kind) {
                Ok(photo) => {
                    summary.supported_files += 1;
                    summary.photos.push(photo);
                }
                Err(error) => log::warn!("skipping {}: {error}", file_path.display()),
            }
        }

        Ok(summary)
    }

    fn stat(&self, path: &str) -> Result<ScannedPhoto, ApplicationError> {
        let file_path = Path::new(path);
        if !file_path.is_file() {
            return Err(ApplicationError::NotFound(format!("photo not found: {path}")));
        }
        let kind = detect_photo_kind(file_path);
        if kind == PhotoKind::Unsupported {
            return Err(ApplicationError::InvalidInput(format!(
                "unsupported image format: {path}"
            )));
        }
        scanned_photo(file_path, kind)
    }
}

fn scanned_photo(file_path: &Path, kind: PhotoKind) -> Result<ScannedPhoto, ApplicationError> {
    let canonical = file_path
        .canonicalize()
        .map_err(|error| ApplicationError::Io(error.to_string()))?;
    let metadata = file_path
        .metadata()
        .map_err(|error| ApplicationError::Io(error.to_string()))?;

    Ok(ScannedPhoto {
        canonical_path: canonical,
        file_size: metadata.len(),
        modified: modified_millis(&metadata),
        kind,
    })
}

pub(crate) fn modified_millis(metadata: &Metadata) -> i64 {
    metadata
        .modified()
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|duration| duration.as_millis() as i64)
        .unwrap_or_default()
}
