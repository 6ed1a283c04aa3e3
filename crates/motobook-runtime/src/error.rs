use std::fmt;

/// Result type for motobook-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Provider layer error
    Provider(motobook_providers::Error),

    /// A session operation ran before the catalog snapshot was loaded
    CatalogNotReady,

    /// An id does not exist in the catalog or belongs to another model
    UnknownId(String),

    /// Invalid operation or state (e.g. payment before OTP verification)
    InvalidOperation(String),

    /// Configuration error
    Config(String),

    /// IO operation failed
    Io(std::io::Error),

    /// An external call exceeded its deadline
    Timeout(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Provider(err) => write!(f, "Provider error: {}", err),
            Error::CatalogNotReady => write!(f, "Catalog is not loaded yet"),
            Error::UnknownId(msg) => write!(f, "Unknown id: {}", msg),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Timeout(msg) => write!(f, "Timed out: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Provider(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::CatalogNotReady
            | Error::UnknownId(_)
            | Error::InvalidOperation(_)
            | Error::Config(_)
            | Error::Timeout(_) => None,
        }
    }
}

impl From<motobook_providers::Error> for Error {
    fn from(err: motobook_providers::Error) -> Self {
        Error::Provider(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
