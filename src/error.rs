use crate::attributes::Attribute;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid input")]
    InvalidInput,

    #[error("invalid input range {0}")]
    InvalidRange(u32),

    #[error("Attribute is read-only: {0}")]
    ReadOnly(Attribute),

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Device registration failed: {0}")]
    Registration(String),

    #[error("Attribute group publication failed: {0}")]
    Publish(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn registration<S: Into<String>>(msg: S) -> Self {
        Error::Registration(msg.into())
    }

    pub(crate) fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Whether this is a semantic rejection of a written value (as opposed to
    /// a dispatch, lifecycle or configuration failure).
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::InvalidInput | Error::InvalidRange(_))
    }
}

/// Result type for live-oc operations
pub type Result<T> = std::result::Result<T, Error>;
