pub mod fs;
pub mod metadata;
pub mod presenters;

pub use fs::{FsNoteStore, FsThumbnailGenerator, SystemClock, WalkdirFileScanner};
pub use metadata::{ExifGpsTags, KamadakExifReader};
pub use presenters::{
    present_detail, present_map_header, present_map_json, present_marker, present_nearby,
    present_photo_row, present_photos_json, present_thumbnail,
};
