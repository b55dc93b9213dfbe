use crate::domain::payment::PaymentStatus;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Payment {0} not found")]
    NotFoundError(Uuid),
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransitionError {
        from: PaymentStatus,
        to: PaymentStatus,
    },
    #[error("Gateway error: {0}")]
    GatewayError(String),
    #[error("Payment {id} was modified concurrently (expected version {expected}, found {found})")]
    ConcurrencyError { id: Uuid, expected: u64, found: u64 },
    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDbError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
