use thiserror::Error;

/// Failure while loading classifier tables.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid table JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Concept {0:?} has no terms")]
    EmptyConcept(String),

    #[error("Invalid term {term:?}: {source}")]
    InvalidTerm {
        term: String,
        #[source]
        source: regex::Error,
    },
}

/// Failure reported by a storage backend. Carries the backend's message only,
/// so the core stays independent of any particular database crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct StoreError(pub String);

impl StoreError {
    pub fn new(err: impl std::fmt::Display) -> Self {
        Self(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnoozeError {
    /// The product does not exist or belongs to another household. The two
    /// cases are deliberately indistinguishable.
    #[error("Product not found")]
    NotFound,

    #[error("Failed to load product: {0}")]
    Lookup(#[source] StoreError),

    #[error("Failed to record snooze: {0}")]
    SnoozeWrite(#[source] StoreError),

    #[error("Failed to update frequency correction factor: {0}")]
    FactorWrite(#[source] StoreError),
}

impl SnoozeError {
    /// True for storage failures, which callers surface as server errors.
    pub fn is_storage(&self) -> bool {
        !matches!(self, SnoozeError::NotFound)
    }
}
