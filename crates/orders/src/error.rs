use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Invalid order request: {0}")]
    InvalidRequest(String),

    /// A requested menu reference that does not resolve rejects the whole
    /// order; no partially priced order is ever persisted.
    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(i64),

    #[error("Order not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StoreError),
}

pub type Result<T> = std::result::Result<T, OrderError>;
