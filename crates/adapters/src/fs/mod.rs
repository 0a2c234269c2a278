mod clock;
mod notes;
mod scanner;
mod thumbs;

pub use clock::SystemClock;
pub use notes::FsNoteStore;
pub use scanner::WalkdirFileScanner;
pub use thumbs::FsThumbnailGenerator;

pub(crate) use scanner::modified_millis;
