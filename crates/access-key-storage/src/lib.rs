pub mod client;
pub mod db;
pub mod types;

#[cfg(feature = "leveldb-backend")]
pub mod leveldb;

#[cfg(feature = "leveldb-backend")]
pub use leveldb::{default_storage_opt, run_db_server};

// re-export
pub use client::StorageClient;
pub use db::{RecordOp, RecordStoreConfig, Reply};
pub use types::{AccessKeyStorageError, RecordKey};
