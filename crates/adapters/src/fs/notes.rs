use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use geonote_application::{ApplicationError, NoteStore};

/// Notes as plain UTF-8 files next to the photo.
#[derive(Debug, Default)]
pub struct FsNoteStore;

impl NoteStore for FsNoteStore {
    fn load(&self, note_path: &Path) -> Result<Option<String>, ApplicationError> {
        match fs::read_to_string(note_path) {
            Ok(mut text) => {
                if text.ends_with('\n') {
                    text.pop();
                    if text.ends_with('\r') {
                        text.pop();
                    }
                }
                Ok(Some(text))
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(ApplicationError::Io(error.to_string())),
        }
    }

    fn save(&self, note_path: &Path, text: &str) -> Result<(), ApplicationError> {
        if let Some(parent) = note_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|error| ApplicationError::Io(error.to_string()))?;
            }
        }
        fs::write(note_path, text).map_err(|error| ApplicationError::Io(error.to_string()))
    }
}
