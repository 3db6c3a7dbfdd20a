use thiserror::Error;

pub type Result<T> = std::result::Result<T, DnsError>;

#[derive(Error, Debug)]
pub enum DnsError {
    /// The bytes ran out before a structurally required field.
    #[error("incomplete data: {0}")]
    Incomplete(String),

    /// A field is present but violates its grammar or range.
    #[error("{message} (bad token: {token})")]
    Validation { message: String, token: String },

    #[error("cannot encode record: {0}")]
    Unencodable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("timed out: {0}")]
    Timeout(String),
}

impl DnsError {
    pub fn validation<M: Into<String>, T: ToString>(message: M, token: T) -> Self {
        DnsError::Validation {
            message: message.into(),
            token: token.to_string(),
        }
    }

    pub fn incomplete<M: Into<String>>(message: M) -> Self {
        DnsError::Incomplete(message.into())
    }

    pub fn is_incomplete(&self) -> bool {
        matches!(self, DnsError::Incomplete(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DnsError::Validation { .. })
    }

    pub fn bad_token(&self) -> Option<&str> {
        match self {
            DnsError::Validation { token, .. } => Some(token.as_str()),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for DnsError {
    fn from(e: toml::de::Error) -> Self {
        DnsError::Config(e.to_string())
    }
}
