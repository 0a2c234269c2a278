use std::path::{Path, PathBuf};

use geonote_domain::{GeoCoordinate, PhotoKind};

use crate::ApplicationError;

#[derive(Debug, Clone)]
pub struct ScannedPhoto {
    pub canonical_path: PathBuf,
    pub file_size: u64,
    /// Epoch millis of the last modification, 0 when unavailable.
    pub modified: i64,
    pub kind: PhotoKind,
}

#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    pub scanned_files: usize,
    pub supported_files: usize,
    pub photos: Vec<ScannedPhoto>,
}

pub trait MediaScanner {
    fn scan(&self, folder: &str) -> Result<ScanSummary, ApplicationError>;

    /// Looks up a single photo; `NotFound` when missing, `InvalidInput` when
    /// the file is not a supported image.
    fn stat(&self, path: &str) -> Result<ScannedPhoto, ApplicationError>;
}

/// Everything read from a photo's embedded metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoMetadata {
    pub width: u32,
    pub height: u32,
    /// Epoch millis, 0 when unknown.
    pub date_taken: i64,
    /// EXIF orientation (1 = upright).
    pub orientation: u16,
    pub gps: GeoCoordinate,
}

pub trait MetadataReader {
    fn read_metadata(&self, path: &Path) -> Result<PhotoMetadata, ApplicationError>;
}

pub trait NoteStore {
    /// `Ok(None)` when no note file exists.
    fn load(&self, note_path: &Path) -> Result<Option<String>, ApplicationError>;

    fn save(&self, note_path: &Path, text: &str) -> Result<(), ApplicationError>;
}

#[derive(Debug, Clone)]
pub struct ThumbnailArtifact {
    pub file_path: String,
    pub width: u32,
    pub height: u32,
}

pub trait ThumbnailGenerator {
    fn ensure_thumbnail(
        &self,
        source_path: &Path,
        cache_root: &str,
        max_size: u32,
    ) -> Result<ThumbnailArtifact, ApplicationError>;
}

pub trait Clock {
    fn now_millis(&self) -> i64;
}
