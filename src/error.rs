use thiserror::Error;

/// Errors raised by the entry store.
///
/// `NotFound` and `AlreadyExists` are the wiki's domain errors. Handlers turn them
/// into a redirect to the error page rather than an HTTP status.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Requested entry '{0}' not exists")]
    NotFound(String),

    #[error("Entry already exist")]
    AlreadyExists(String),

    #[error("the encyclopedia has no entries yet")]
    EmptyStore,

    #[error("'{0}' cannot be used as an entry title")]
    InvalidTitle(String),

    #[error("entry storage failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
