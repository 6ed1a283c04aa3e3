use std::fmt;

/// Result type for catalog data-quality checks
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Data-quality violations detected when a catalog snapshot is validated.
///
/// A snapshot is accepted whole or rejected whole; any single violation
/// rejects the entire fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two rows of the same entity class share an id
    DuplicateId { entity: &'static str, id: i64 },

    /// A row references a model id that does not exist
    UnknownModel { entity: &'static str, id: i64, model_id: i64 },

    /// A row references a provider id that does not exist
    UnknownProvider { entity: &'static str, id: i64, provider_id: i64 },

    /// More than one variant of a model is marked as the default
    DuplicateDefaultVariant { model_id: i64 },

    /// More than one color of a model is marked as the default
    DuplicateDefaultColor { model_id: i64 },

    /// A price-valued field is negative
    NegativePrice { entity: &'static str, id: i64, field: &'static str },

    /// A finance option has a non-positive tenure or negative interest rate
    InvalidFinanceOption { id: i64, reason: &'static str },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DuplicateId { entity, id } => {
                write!(f, "duplicate {} id: {}", entity, id)
            }
            CatalogError::UnknownModel { entity, id, model_id } => {
                write!(f, "{} {} references unknown model {}", entity, id, model_id)
            }
            CatalogError::UnknownProvider { entity, id, provider_id } => {
                write!(f, "{} {} references unknown provider {}", entity, id, provider_id)
            }
            CatalogError::DuplicateDefaultVariant { model_id } => {
                write!(f, "model {} has more than one default variant", model_id)
            }
            CatalogError::DuplicateDefaultColor { model_id } => {
                write!(f, "model {} has more than one default color", model_id)
            }
            CatalogError::NegativePrice { entity, id, field } => {
                write!(f, "{} {} has negative {}", entity, id, field)
            }
            CatalogError::InvalidFinanceOption { id, reason } => {
                write!(f, "finance option {} is invalid: {}", id, reason)
            }
        }
    }
}

impl std::error::Error for CatalogError {}
