use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("invalid rational component: {0:?}")]
    InvalidRational(String),
    #[error("expected 3 sexagesimal components, got {0}")]
    WrongComponentCount(usize),
    #[error("zero denominator in rational component: {0:?}")]
    ZeroDenominator(String),
    #[error("note has {0} lines, at most {max} allowed", max = crate::NOTE_MAX_LINES)]
    NoteTooManyLines(usize),
    #[error("note line {line} has {chars} characters, at most {max} allowed", max = crate::NOTE_MAX_LINE_CHARS)]
    NoteLineTooLong { line: usize, chars: usize },
}
