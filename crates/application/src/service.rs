use std::path::Path;

use geonote_domain::{
    is_valid_range, relative_time, validate_note, GeoCoordinate, MapMarker, MapView, NearbyPhoto,
    PhotoRecord,
};

use crate::{
    ApplicationError, Clock, ListPhotosCommand, LoadNoteCommand, MapViewCommand, MediaScanner,
    MetadataReader, NearbyCommand, NoteStore, OpenPhotoCommand, PhotoDetail, SaveNoteCommand,
    ScannedPhoto, ThumbnailArtifact, ThumbnailCommand, ThumbnailGenerator,
};

pub struct GalleryService {
    scanner: Box<dyn MediaScanner>,
    metadata: Box<dyn MetadataReader>,
    notes: Box<dyn NoteStore>,
    thumbnails: Box<dyn ThumbnailGenerator>,
    clock: Box<dyn Clock>,
}

impl GalleryService {
    pub fn new(
        scanner: Box<dyn MediaScanner>,
        metadata: Box<dyn MetadataReader>,
        notes: Box<dyn NoteStore>,
        thumbnails: Box<dyn ThumbnailGenerator>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            scanner,
            metadata,
            notes,
            thumbnails,
            clock,
        }
    }

    /// Rescans `folder` and returns every photo, newest first.
    pub fn list_photos(
        &self,
        command: ListPhotosCommand,
    ) -> Result<Vec<PhotoRecord>, ApplicationError> {
        if command.folder.trim().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "folder path must not be empty".to_string(),
            ));
        }

        let scan = self.scanner.scan(&command.folder)?;
        log::info!(
            "scanned {}: files={}, photos={}",
            command.folder,
            scan.scanned_files,
            scan.supported_files
        );

        let mut photos: Vec<PhotoRecord> = scan
            .photos
            .iter()
            .map(|scanned| self.build_record(scanned))
            .filter(|record| !command.gps_only || record.has_gps())
            .collect();

        photos.sort_by(|a, b| {
            b.date_taken
                .cmp(&a.date_taken)
                .then_with(|| a.path.cmp(&b.path))
        });
        Ok(photos)
    }

    pub fn photos_with_gps(&self, folder: &str) -> Result<Vec<PhotoRecord>, ApplicationError> {
        self.list_photos(ListPhotosCommand {
            folder: folder.to_string(),
            gps_only: true,
        })
    }

    pub fn map_view(&self, command: MapViewCommand) -> Result<MapView, ApplicationError> {
        if command.thumbnail_cache.is_some() && command.thumbnail_size == 0 {
            return Err(ApplicationError::InvalidInput(
                "marker thumbnail size must be positive".to_string(),
            ));
        }
        let photos = self.photos_with_gps(&command.folder)?;
        let markers = photos
            .iter()
            .map(|photo| {
                let mut marker = MapMarker::from_record(photo);
                if let Some(cache_root) = &command.thumbnail_cache {
                    marker.thumbnail = self.marker_thumbnail(photo, cache_root, command.thumbnail_size);
                }
                marker
            })
            .collect();
        Ok(MapView::from_markers(markers, command.zoom))
    }

    fn marker_thumbnail(&self, photo: &PhotoRecord, cache_root: &str, size: u32) -> Option<String> {
        match self
            .thumbnails
            .ensure_thumbnail(Path::new(&photo.path), cache_root, size)
        {
            Ok(artifact) => Some(artifact.file_path),
            Err(error) => {
                log::warn!("no marker thumbnail for {}: {error}", photo.path);
                None
            }
        }
    }

    pub fn open_photo(&self, command: OpenPhotoCommand) -> Result<PhotoDetail, ApplicationError> {
        let scanned = self.scanner.stat(&command.path)?;
        let record = self.build_record(&scanned);
        let map_url = record.gps.map_url(None);
        let relative_age = relative_time(record.date_taken, self.clock.now_millis());
        Ok(PhotoDetail {
            record,
            map_url,
            relative_age,
        })
    }

    /// Empty when the note is missing or unreadable.
    pub fn load_note(&self, command: LoadNoteCommand) -> String {
        let note_path = PhotoRecord::new(command.path).note_path();
        self.read_note(&note_path)
    }

    /// `Ok(false)` when the note could not be written.
    pub fn save_note(&self, command: SaveNoteCommand) -> Result<bool, ApplicationError> {
        let text = command.text.trim();
        validate_note(text)?;

        let note_path = PhotoRecord::new(command.path).note_path();
        match self.notes.save(&note_path, text) {
            Ok(()) => Ok(true),
            Err(error) => {
                log::warn!("failed to save note {}: {error}", note_path.display());
                Ok(false)
            }
        }
    }

    pub fn thumbnail(
        &self,
        command: ThumbnailCommand,
    ) -> Result<ThumbnailArtifact, ApplicationError> {
        if command.max_size == 0 {
            return Err(ApplicationError::InvalidInput(
                "thumbnail size must be positive".to_string(),
            ));
        }
        if command.cache_root.trim().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "cache root must not be empty".to_string(),
            ));
        }
        let scanned = self.scanner.stat(&command.path)?;
        self.thumbnails.ensure_thumbnail(
            &scanned.canonical_path,
            &command.cache_root,
            command.max_size,
        )
    }

    /// Photos with a valid fix within `radius_meters` of the target, closest first.
    pub fn nearby(&self, command: NearbyCommand) -> Result<Vec<NearbyPhoto>, ApplicationError> {
        if !is_valid_range(command.latitude, command.longitude) {
            return Err(ApplicationError::InvalidInput(format!(
                "target out of range: {}, {}",
                command.latitude, command.longitude
            )));
        }
        if command.radius_meters.is_nan() || command.radius_meters < 0.0 {
            return Err(ApplicationError::InvalidInput(format!(
                "radius must be a non-negative number, got {}",
                command.radius_meters
            )));
        }

        let target = GeoCoordinate::new(command.latitude, command.longitude, None);
        let mut found: Vec<NearbyPhoto> = self
            .photos_with_gps(&command.folder)?
            .into_iter()
            .filter(|photo| photo.gps.is_valid())
            .map(|photo| NearbyPhoto {
                distance_meters: target.distance_to(&photo.gps),
                photo,
            })
            .filter(|nearby| nearby.distance_meters <= command.radius_meters)
            .collect();

        found.sort_by(|a, b| {
            a.distance_meters
                .total_cmp(&b.distance_meters)
                .then_with(|| a.photo.path.cmp(&b.photo.path))
        });
        Ok(found)
    }

    fn build_record(&self, scanned: &ScannedPhoto) -> PhotoRecord {
        let mut record = PhotoRecord::new(scanned.canonical_path.to_string_lossy());
        record.size_bytes = scanned.file_size;
        record.date_taken = scanned.modified;

        match self.metadata.read_metadata(&scanned.canonical_path) {
            Ok(metadata) => {
                record.width = metadata.width;
                record.height = metadata.height;
                if metadata.date_taken > 0 {
                    record.date_taken = metadata.date_taken;
                }
                record.gps = metadata.gps;
            }
            Err(error) => {
                log::warn!("skipping metadata for {}: {error}", record.path);
            }
        }

        record.note = self.read_note(&record.note_path());
        record
    }

    fn read_note(&self, note_path: &Path) -> String {
        match self.notes.load(note_path) {
            Ok(text) => text.unwrap_or_default(),
            Err(error) => {
                log::debug!("cannot read note {}: {error}", note_path.display());
                String::new()
            }
        }
    }
}
