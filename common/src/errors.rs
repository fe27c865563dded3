use std::fmt;

/// Registration form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationField {
    Name,
    Address,
}

impl fmt::Display for RegistrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationField::Name => write!(f, "name"),
            RegistrationField::Address => write!(f, "address"),
        }
    }
}

/// Bad registration input. Reported next to the offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: RegistrationField,
    pub reason: String,
}

impl ValidationError {
    pub fn required(field: RegistrationField) -> Self {
        Self {
            field,
            reason: "must not be empty".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyInput,
}

/// Failures reading or writing the durable vendor record.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum GeoStoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("could not save vendors: {0}")]
    Storage(#[from] StorageError),

    #[error("no shop with id '{0}'")]
    UnknownShop(String),

    #[error("'{0}' is a legend shop and cannot be edited")]
    NotAVendor(String),
}

/// Anything that went wrong talking to the assistant. Never shown to users.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),

    #[error("assistant answered with HTTP {0}")]
    Status(u16),

    #[error("malformed assistant response: {0}")]
    Parse(String),

    #[error("assistant answered without any text")]
    EmptyResponse,

    #[error("no assistant is configured")]
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("unknown option {0}")]
    UnknownFlag(String),

    #[error("invalid value for {flag}: {reason}")]
    InvalidValue { flag: String, reason: String },
}
