use serde::{Serialize, Deserialize};
use thiserror::Error;
use url::form_urlencoded;

use access_key_auth::{parse_timing_offset, Timestamp};
use access_key_storage::AccessKeyStorageError;

/// record name of the persisted configuration
pub const STORAGE_KEY: &str = "propman-access-key-config";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Config: stored configuration is corrupt, {0}")]
    CorruptStoredConfig(String),
    #[error("Config: {0}")]
    Storage(#[from] AccessKeyStorageError),
}

/// Operator inputs exactly as entered. An empty field is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKeyConfig {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub checol: String,
    #[serde(default)]
    pub offset: String,
}

impl AccessKeyConfig {
    pub fn new(key: &str, checol: &str, offset: &str) -> Self {
        Self {
            key: key.to_string(),
            checol: checol.to_string(),
            offset: offset.to_string(),
        }
    }

    pub fn timing_offset(&self) -> Timestamp {
        parse_timing_offset(&self.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty() && self.checol.is_empty() && self.offset.is_empty()
    }

    /// `key`, `checol`, `offset` in that order, skipping empty fields.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in [("key", &self.key), ("checol", &self.checol), ("offset", &self.offset)] {
            if !value.is_empty() {
                serializer.append_pair(name, value);
            }
        }
        serializer.finish()
    }

    pub fn share_link(&self, base: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            base.to_string()
        } else {
            format!("{}?{}", base, query)
        }
    }

    pub fn to_json(&self) -> Vec<u8> {
        // a struct of three strings always serializes
        serde_json::to_vec(self).unwrap_or_default()
    }

    pub fn from_json(raw: &[u8]) -> Result<Self, ConfigError> {
        serde_json::from_slice(raw)
            .map_err(|e| ConfigError::CorruptStoredConfig(e.to_string()))
    }
}
