use crate::DomainError;

pub const NOTE_EXTENSION: &str = "txt";
pub const NOTE_MAX_LINES: usize = 3;
pub const NOTE_MAX_LINE_CHARS: usize = 100;

pub fn validate_note(text: &str) -> Result<(), DomainError> {
    if text.is_empty() {
        return Ok(());
    }

    let lines: Vec<&str> = text.lines().collect();
    if lines.len() > NOTE_MAX_LINES {
        return Err(DomainError::NoteTooManyLines(lines.len()));
    }
    for (index, line) in lines.iter().enumerate() {
        let chars = line.chars().count();
        if chars > NOTE_MAX_LINE_CHARS {
            return Err(DomainError::NoteLineTooLong {
                line: index + 1,
                chars,
            });
        }
    }
    Ok(())
}

/// Trims the note, squeezes runs of blanks inside each line and drops empty lines.
///
/// Line breaks survive, so a multi-line note stays multi-line. This differs from
/// collapsing every whitespace run (newlines included) into one space, which would
/// turn any note into a single line.
pub fn sanitize_note(text: &str) -> String {
    text.trim()
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
