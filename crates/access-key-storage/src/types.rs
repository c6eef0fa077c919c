use serde::{Serialize, Deserialize};
use thiserror::Error;

/// name a record is stored under
pub type RecordKey = Vec<u8>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
pub enum AccessKeyStorageError {
    #[error("Storage: failed to open DB")]
    FailToOpenDB,
    #[error("Storage: failed to write to DB")]
    FailToWriteDB,
    #[error("Storage: failed to flush to DB")]
    FailToFlushDB,
    #[error("Storage: failed to close DB")]
    FailToCloseDB,
    #[error("Storage: DB server is gone")]
    ServerGone,
}
