use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{GeoCoordinate, NOTE_EXTENSION};

pub const DEFAULT_MAP_ZOOM: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoKind {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Webp,
    Unsupported,
}

pub fn detect_photo_kind(path: &Path) -> PhotoKind {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return PhotoKind::Unsupported;
    };

    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => PhotoKind::Jpeg,
        "png" => PhotoKind::Png,
        "gif" => PhotoKind::Gif,
        "bmp" => PhotoKind::Bmp,
        "webp" => PhotoKind::Webp,
        _ => PhotoKind::Unsupported,
    }
}

pub fn mime_type_for(kind: PhotoKind) -> &'static str {
    match kind {
        PhotoKind::Jpeg => "image/jpeg",
        PhotoKind::Png => "image/png",
        PhotoKind::Gif => "image/gif",
        PhotoKind::Bmp => "image/bmp",
        PhotoKind::Webp => "image/webp",
        PhotoKind::Unsupported => "application/octet-stream",
    }
}

/// One photo as seen by a gallery listing. Rebuilt on every scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub path: String,
    pub display_name: String,
    pub size_bytes: u64,
    /// Epoch millis, 0 when unknown.
    pub date_taken: i64,
    pub width: u32,
    pub height: u32,
    pub mime_type: String,
    pub gps: GeoCoordinate,
    pub note: String,
}

impl PhotoRecord {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let display_name = Path::new(&path)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime_type = mime_type_for(detect_photo_kind(Path::new(&path))).to_string();
        Self {
            path,
            display_name,
            size_bytes: 0,
            date_taken: 0,
            width: 0,
            height: 0,
            mime_type,
            gps: GeoCoordinate::absent(),
            note: String::new(),
        }
    }

    pub fn has_gps(&self) -> bool {
        self.gps.has_gps()
    }

    /// Sibling text file holding the note: the photo path with its extension
    /// swapped for `.txt`.
    pub fn note_path(&self) -> PathBuf {
        Path::new(&self.path).with_extension(NOTE_EXTENSION)
    }

    pub fn formatted_size(&self) -> String {
        const KIB: u64 = 1024;
        const MIB: u64 = 1024 * 1024;
        if self.size_bytes < KIB {
            format!("{} B", self.size_bytes)
        } else if self.size_bytes < MIB {
            format!("{:.1} KB", self.size_bytes as f64 / KIB as f64)
        } else {
            format!("{:.1} MB", self.size_bytes as f64 / MIB as f64)
        }
    }

    pub fn resolution(&self) -> String {
        format!("{} x {}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub path: String,
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
    pub thumbnail: Option<String>,
}

impl MapMarker {
    pub fn from_record(record: &PhotoRecord) -> Self {
        Self {
            path: record.path.clone(),
            title: record.display_name.clone(),
            latitude: record.gps.latitude,
            longitude: record.gps.longitude,
            thumbnail: None,
        }
    }
}

/// Markers plus the initial camera position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub markers: Vec<MapMarker>,
    pub center: Option<(f64, f64)>,
    pub zoom: u8,
}

impl MapView {
    pub fn from_markers(markers: Vec<MapMarker>, zoom: u8) -> Self {
        let center = markers
            .first()
            .map(|marker| (marker.latitude, marker.longitude));
        Self {
            markers,
            center,
            zoom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyPhoto {
    pub photo: PhotoRecord,
    pub distance_meters: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_kind_detection_is_case_insensitive() {
        assert_eq!(detect_photo_kind(Path::new("a.JPG")), PhotoKind::Jpeg);
        assert_eq!(detect_photo_kind(Path::new("a.jpeg")), PhotoKind::Jpeg);
        assert_eq!(detect_photo_kind(Path::new("a.PNG")), PhotoKind::Png);
        assert_eq!(detect_photo_kind(Path::new("a.webp")), PhotoKind::Webp);
        assert_eq!(detect_photo_kind(Path::new("a.txt")), PhotoKind::Unsupported);
        assert_eq!(detect_photo_kind(Path::new("noext")), PhotoKind::Unsupported);
    }

    #[test]
    fn new_record_derives_name_and_mime() {
        let record = PhotoRecord::new("/photos/2024/beach.jpg");
        assert_eq!(record.display_name, "beach.jpg");
        assert_eq!(record.mime_type, "image/jpeg");
        assert!(!record.has_gps());
        assert!(record.note.is_empty());
    }

    #[test]
    fn note_path_replaces_extension() {
        let record = PhotoRecord::new("/photos/v1.2/beach.jpg");
        assert_eq!(record.note_path(), PathBuf::from("/photos/v1.2/beach.txt"));

        let bare = PhotoRecord::new("/photos/scan");
        assert_eq!(bare.note_path(), PathBuf::from("/photos/scan.txt"));
    }

    #[test]
    fn formatted_size_picks_unit() {
        let mut record = PhotoRecord::new("a.jpg");
        record.size_bytes = 512;
        assert_eq!(record.formatted_size(), "512 B");
        record.size_bytes = 1536;
        assert_eq!(record.formatted_size(), "1.5 KB");
        record.size_bytes = 5 * 1024 * 1024;
        assert_eq!(record.formatted_size(), "5.0 MB");
    }

    #[test]
    fn map_view_centers_on_first_marker() {
        let mut first = PhotoRecord::new("a.jpg");
        first.gps = GeoCoordinate::new(37.5, 127.0, None);
        let mut second = PhotoRecord::new("b.jpg");
        second.gps = GeoCoordinate::new(35.1, 129.0, None);

        let view = MapView::from_markers(
            vec![MapMarker::from_record(&first), MapMarker::from_record(&second)],
            DEFAULT_MAP_ZOOM,
        );
        assert_eq!(view.center, Some((37.5, 127.0)));
        assert_eq!(view.zoom, 10);

        let empty = MapView::from_markers(Vec::new(), DEFAULT_MAP_ZOOM);
        assert_eq!(empty.center, None);
    }
}
