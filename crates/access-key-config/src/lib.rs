pub mod config;
pub mod env;
pub mod source;

// re-exports
pub use config::{AccessKeyConfig, ConfigError, STORAGE_KEY};
pub use env::EnvironmentVar;
pub use source::{ConfigSource, QueryParams, resolve, load_stored, persist};
