//! Catalog lookup errors.

/// Result type for catalog lookups
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No product carries the requested id
    #[error("Product not found")]
    NotFound(String),
}
