use geonote_application::{PhotoDetail, ThumbnailArtifact};
use geonote_domain::{format_timestamp, MapMarker, MapView, NearbyPhoto, PhotoRecord};

pub fn present_photo_row(photo: &PhotoRecord) -> String {
    let gps = if photo.has_gps() { "GPS" } else { "-" };
    format!(
        "{}\t{}\t{}\t{}\t{}",
        format_timestamp(photo.date_taken),
        photo.formatted_size(),
        photo.resolution(),
        gps,
        photo.path
    )
}

pub fn present_detail(detail: &PhotoDetail) -> String {
    let record = &detail.record;
    let mut lines = vec![
        format!("name:       {}", record.display_name),
        format!("path:       {}", record.path),
        format!("type:       {}", record.mime_type),
        format!("size:       {}", record.formatted_size()),
        format!("resolution: {}", record.resolution()),
        format!(
            "taken:      {} ({})",
            format_timestamp(record.date_taken),
            detail.relative_age
        ),
    ];
    if record.gps.is_valid() {
        lines.push(format!("location:   {}", record.gps));
    } else if record.has_gps() {
        lines.push(format!("location:   {} (out of range)", record.gps));
    }
    if let Some(url) = &detail.map_url {
        lines.push(format!("map:        {url}"));
    }
    if !record.note.is_empty() {
        lines.push(format!("note:       {}", record.note.replace('\n', "\n            ")));
    }
    lines.join("\n")
}

pub fn present_marker(marker: &MapMarker) -> String {
    format!(
        "{:.6}\t{:.6}\t{}\t{}",
        marker.latitude,
        marker.longitude,
        marker.title,
        marker.thumbnail.as_deref().unwrap_or("-")
    )
}

pub fn present_map_header(view: &MapView) -> String {
    match view.center {
        Some((latitude, longitude)) => {
            let count = view.markers.len();
            let noun = if count == 1 { "marker" } else { "markers" };
            format!(
                "{count} {noun}, camera at {latitude:.6}, {longitude:.6} (zoom {})",
                view.zoom
            )
        }
        None => "no geotagged photos".to_string(),
    }
}

pub fn present_nearby(nearby: &NearbyPhoto) -> String {
    format!("{:.0}\t{}", nearby.distance_meters, nearby.photo.path)
}

pub fn present_thumbnail(artifact: &ThumbnailArtifact) -> String {
    format!(
        "{} ({}x{})",
        artifact.file_path, artifact.width, artifact.height
    )
}

pub fn present_photos_json(photos: &[PhotoRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(photos)
}

pub fn present_map_json(view: &MapView) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(view)
}

#[cfg(test)]
mod tests {
    use geonote_domain::{GeoCoordinate, DEFAULT_MAP_ZOOM};

    use super::*;

    fn geotagged() -> PhotoRecord {
        let mut photo = PhotoRecord::new("/p/beach.jpg");
        photo.size_bytes = 2048;
        photo.width = 4000;
        photo.height = 3000;
        photo.gps = GeoCoordinate::new(37.5665, 126.978, None);
        photo
    }

    #[test]
    fn row_marks_gps_and_unknown_date() {
        let row = present_photo_row(&geotagged());
        assert_eq!(row, "unknown\t2.0 KB\t4000 x 3000\tGPS\t/p/beach.jpg");
    }

    #[test]
    fn detail_shows_map_link_and_note() {
        let mut record = geotagged();
        record.note = "first\nsecond".to_string();
        let detail = PhotoDetail {
            map_url: record.gps.map_url(None),
            record,
            relative_age: "unknown".to_string(),
        };
        let text = present_detail(&detail);
        assert!(text.contains("location:   lat: 37.566500, lon: 126.978000"));
        assert!(text.contains("map:        https://www.google.com/maps?q=37.566500,126.978000"));
        assert!(text.contains("note:       first\n            second"));
    }

    #[test]
    fn map_header_and_json() {
        let view = MapView::from_markers(
            vec![MapMarker::from_record(&geotagged())],
            DEFAULT_MAP_ZOOM,
        );
        assert_eq!(
            present_map_header(&view),
            "1 marker, camera at 37.566500, 126.978000 (zoom 10)"
        );
        assert_eq!(
            present_marker(&view.markers[0]),
            "37.566500\t126.978000\tbeach.jpg\t-"
        );
        let json = present_map_json(&view).expect("json");
        assert!(json.contains("\"title\": \"beach.jpg\""));
    }

    #[test]
    fn map_header_pluralizes_marker_count() {
        let marker = MapMarker::from_record(&geotagged());
        let view = MapView::from_markers(vec![marker.clone(), marker], 12);
        assert_eq!(
            present_map_header(&view),
            "2 markers, camera at 37.566500, 126.978000 (zoom 12)"
        );
        assert_eq!(
            present_map_header(&MapView::from_markers(Vec::new(), 12)),
            "no geotagged photos"
        );
    }
}
