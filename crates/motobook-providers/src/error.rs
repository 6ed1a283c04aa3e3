use std::fmt;

/// Result type for motobook-providers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the providers layer
#[derive(Debug)]
pub enum Error {
    /// Network failure or non-2xx response from the catalog endpoint
    Fetch(String),

    /// The endpoint returned a blank body
    EmptyResponse,

    /// The response body was not valid JSON
    Parse(serde_json::Error),

    /// The document shape was wrong (bad status, missing data object)
    Document(String),

    /// The catalog snapshot failed data-quality validation
    Catalog(motobook_types::CatalogError),

    /// IO operation failed
    Io(std::io::Error),

    /// A gateway call failed at the transport level
    Gateway(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Fetch(msg) => write!(f, "Catalog fetch failed: {}", msg),
            Error::EmptyResponse => write!(f, "Catalog endpoint returned an empty response"),
            Error::Parse(err) => write!(f, "Catalog response is not valid JSON: {}", err),
            Error::Document(msg) => write!(f, "Unexpected catalog document: {}", msg),
            Error::Catalog(err) => write!(f, "Catalog rejected: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Gateway(msg) => write!(f, "Gateway error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Catalog(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Fetch(_) | Error::EmptyResponse | Error::Document(_) | Error::Gateway(_) => {
                None
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err)
    }
}

impl From<motobook_types::CatalogError> for Error {
    fn from(err: motobook_types::CatalogError) -> Self {
        Error::Catalog(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
