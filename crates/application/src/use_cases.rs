use geonote_domain::PhotoRecord;

#[derive(Debug, Clone)]
pub struct ListPhotosCommand {
    pub folder: String,
    pub gps_only: bool,
}

#[derive(Debug, Clone)]
pub struct OpenPhotoCommand {
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct LoadNoteCommand {
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct SaveNoteCommand {
    pub path: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct MapViewCommand {
    pub folder: String,
    /// Marker thumbnails are generated into this cache root when set.
    pub thumbnail_cache: Option<String>,
    pub thumbnail_size: u32,
    pub zoom: u8,
}

#[derive(Debug, Clone)]
pub struct ThumbnailCommand {
    pub path: String,
    pub cache_root: String,
    pub max_size: u32,
}

#[derive(Debug, Clone)]
pub struct NearbyCommand {
    pub folder: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhotoDetail {
    pub record: PhotoRecord,
    /// Only set when the coordinate passes the full validity check.
    pub map_url: Option<String>,
    pub relative_age: String,
}
