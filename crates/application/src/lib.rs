mod error;
mod ports;
mod service;
mod use_cases;

pub use error::ApplicationError;
pub use ports::{
    Clock, MediaScanner, MetadataReader, NoteStore, PhotoMetadata, ScanSummary, ScannedPhoto,
    ThumbnailArtifact, ThumbnailGenerator,
};
pub use service::GalleryService;
pub use use_cases::{
    ListPhotosCommand, LoadNoteCommand, MapViewCommand, NearbyCommand, OpenPhotoCommand,
    PhotoDetail, SaveNoteCommand, ThumbnailCommand,
};
