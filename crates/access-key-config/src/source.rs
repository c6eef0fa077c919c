use url::{form_urlencoded, Url};

use access_key_storage::StorageClient;
use crate::config::{AccessKeyConfig, ConfigError, STORAGE_KEY};

/// `key`/`checol`/`offset` as they appear in a link; `None` when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub key: Option<String>,
    pub checol: Option<String>,
    pub offset: Option<String>,
}

impl QueryParams {
    /// Parse a bare query string, with or without the leading `?`.
    /// Only the first occurrence of a repeated parameter counts.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::default();

        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match &*name {
                "key" => &mut params.key,
                "checol" => &mut params.checol,
                "offset" => &mut params.offset,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        params
    }

    /// Accept either a full URL or a bare query string.
    pub fn from_link(link: &str) -> Self {
        match Url::parse(link) {
            Ok(url) => Self::from_query(url.query().unwrap_or("")),
            Err(_) => Self::from_query(link),
        }
    }

    /// Fields set in `other` replace ours.
    pub fn merge(mut self, other: QueryParams) -> Self {
        if other.key.is_some() {
            self.key = other.key;
        }
        if other.checol.is_some() {
            self.checol = other.checol;
        }
        if other.offset.is_some() {
            self.offset = other.offset;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_none() && self.checol.is_none() && self.offset.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Query(QueryParams),
    Stored(Vec<u8>),
}

impl ConfigSource {
    pub fn config(&self) -> Option<AccessKeyConfig> {
        match self {
            ConfigSource::Query(params) if params.is_empty() => None,
            ConfigSource::Query(params) => Some(AccessKeyConfig {
                key: params.key.clone().unwrap_or_default(),
                checol: params.checol.clone().unwrap_or_default(),
                offset: params.offset.clone().unwrap_or_default(),
            }),
            ConfigSource::Stored(raw) => match AccessKeyConfig::from_json(raw) {
                Ok(config) => Some(config),
                Err(e) => {
                    log::error!("ignoring stored configuration: {}", e);
                    None
                },
            },
        }
    }
}

/// First source that yields a configuration wins as a whole; with none the
/// defaults apply.
pub fn resolve(sources: &[ConfigSource]) -> AccessKeyConfig {
    for source in sources {
        if let Some(config) = source.config() {
            log::debug!("configuration taken from {}", match source {
                ConfigSource::Query(_) => "link",
                ConfigSource::Stored(_) => "store",
            });
            return config;
        }
    }

    log::debug!("no configuration found, using defaults");
    AccessKeyConfig::default()
}

pub async fn load_stored(client: &mut StorageClient) -> Result<Option<ConfigSource>, ConfigError> {
    Ok(client
        .load(STORAGE_KEY.as_bytes())
        .await?
        .map(ConfigSource::Stored))
}

pub async fn persist(client: &mut StorageClient, config: &AccessKeyConfig) -> Result<(), ConfigError> {
    client.save(STORAGE_KEY.as_bytes(), config.to_json()).await?;
    Ok(())
}
