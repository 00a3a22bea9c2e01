use thiserror::Error;

#[derive(Error, Debug)]
pub enum WkError {
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid SRS stage: {0}")]
    InvalidStage(String),

    #[error("unknown item kind: {0}")]
    UnknownKind(String),

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WkError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for WkError {
    fn from(error: std::io::Error) -> Self {
        WkError::Io(Box::new(error))
    }
}

impl WkError {
    /// True for the errors raised while turning a record into an item.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            WkError::MissingField(_)
                | WkError::InvalidStage(_)
                | WkError::UnknownKind(_)
                | WkError::MalformedRecord(_)
        )
    }
}
