use thiserror::Error;

/// Error type for descriptor and package definition parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Invalid descriptor \"{0}\"")]
    InvalidDescriptor(String),
    #[error("Descriptor \"{0}\" does not name a version")]
    MissingVersion(String),
    #[error("{file}:{line}: {message}")]
    Syntax {
        file: String,
        line: usize,
        message: String,
    },
}

impl FormatError {
    pub(crate) fn syntax(file: &str, line: usize, message: impl Into<String>) -> Self {
        FormatError::Syntax {
            file: file.to_string(),
            line,
            message: message.into(),
        }
    }
}
