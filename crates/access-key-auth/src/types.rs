use serde::{Serialize, Deserialize};
use thiserror::Error;

/// bytes of the secret key that go through the xor transform
pub const KEY_TRANSFORM_LEN: usize = 8;
pub const CHECKSUM_LEN: usize = 4;
pub const CODE_LEN: usize = KEY_TRANSFORM_LEN + CHECKSUM_LEN;

/// a code is rotated every WINDOW_STEP seconds
pub const WINDOW_STEP: Timestamp = 5;
pub const DEFAULT_TIMING_OFFSET: Timestamp = 14;

pub type Timestamp = u64;
pub type KeyTransform = [u8; KEY_TRANSFORM_LEN];
pub type Checksum = [u8; CHECKSUM_LEN];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
pub enum AccessKeyError {
    #[error("AccessKey: invalid key, {0}")]
    MalformedHexInput(String),
    #[error("AccessKey: timing offset {offset}s is ahead of the clock ({now}s)")]
    NegativeWindow {
        now: Timestamp,
        offset: Timestamp,
    },
    #[error("AccessKey: system clock is before the unix epoch")]
    ClockBeforeEpoch,
}

impl From<hex::FromHexError> for AccessKeyError {
    fn from(e: hex::FromHexError) -> Self {
        Self::MalformedHexInput(e.to_string())
    }
}
