mod error;
mod format;
mod geo;
mod note;
mod photo;

pub use error::DomainError;
pub use format::{
    format_date, format_date_in, format_for_filename, format_for_filename_in, format_time,
    format_time_in, format_timestamp, format_timestamp_in, relative_time, UNKNOWN_LABEL,
};
pub use geo::{
    build_map_url, convert, distance_meters, extract_from_source, is_valid_range, parse_dms,
    parse_rational, GeoCoordinate, GpsTag, GpsTagSource, EARTH_RADIUS_KM, MAP_BASE_URL,
};
pub use note::{
    sanitize_note, validate_note, NOTE_EXTENSION, NOTE_MAX_LINES, NOTE_MAX_LINE_CHARS,
};
pub use photo::{
    detect_photo_kind, mime_type_for, MapMarker, MapView, NearbyPhoto, PhotoKind, PhotoRecord,
    DEFAULT_MAP_ZOOM,
};
