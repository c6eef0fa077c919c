//! Rotating access key generator
//!
//! The output is a fixed wire format: door readers recompute it from the
//! same secret and tag, so the hashing steps below must stay bit-exact.

use md5::{Digest, Md5};

use crate::code::AccessCode;
use crate::types::{AccessKeyError, KeyTransform, Timestamp, KEY_TRANSFORM_LEN};
use crate::utils::{get_time, parse_timing_offset, window_for};

pub struct AccessKeyAuth {}

impl AccessKeyAuth {
    /// First 8 bytes of md5(zero padded hex window).
    pub fn keystream(window: Timestamp) -> KeyTransform {
        let window_hex = format!("{:08x}", window);
        let digest = Md5::digest(window_hex.as_bytes());

        let mut stream: KeyTransform = Default::default();
        stream.copy_from_slice(&digest[..KEY_TRANSFORM_LEN]);
        stream
    }

    /// Xor the secret key against the keystream. Keys shorter than 8 bytes
    /// leave the tail zeroed, longer keys are truncated.
    pub fn transform_key(secret_key: &[u8], keystream: &KeyTransform) -> KeyTransform {
        let mut xor_result: KeyTransform = Default::default();
        for (i, b) in secret_key.iter().take(KEY_TRANSFORM_LEN).enumerate() {
            xor_result[i] = b ^ keystream[i];
        }
        xor_result
    }

    pub fn get_code(
        secret_key_hex: &str,
        tag: &str,
        timing_offset: Timestamp,
        time: Option<Timestamp>,
    ) -> Result<AccessCode, AccessKeyError> {
        let secret_key = hex::decode(secret_key_hex)?;
        if secret_key.len() > KEY_TRANSFORM_LEN {
            log::debug!(
                "secret key is {} bytes, only the first {} are used",
                secret_key.len(), KEY_TRANSFORM_LEN
            );
        }

        let now = get_time(time)?;
        let window = window_for(timing_offset, now)?;

        let keystream = Self::keystream(window);
        let xor_result = Self::transform_key(&secret_key, &keystream);

        Ok(AccessCode::new(xor_result, tag, window))
    }

    /// The 24 character hex code for the given inputs.
    pub fn generate(
        secret_key_hex: &str,
        tag: &str,
        timing_offset: Timestamp,
        time: Option<Timestamp>,
    ) -> Result<String, AccessKeyError> {
        Self::get_code(secret_key_hex, tag, timing_offset, time)
            .map(|code| code.to_hex())
    }

    /// Same as [`AccessKeyAuth::generate`] with the offset still in its
    /// operator entered string form.
    pub fn generate_from_config(
        secret_key_hex: &str,
        checol: &str,
        offset: &str,
        time: Option<Timestamp>,
    ) -> Result<String, AccessKeyError> {
        Self::generate(secret_key_hex, checol, parse_timing_offset(offset), time)
    }
}
