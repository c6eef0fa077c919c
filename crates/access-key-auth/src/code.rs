use std::fmt;

use serde::{Serialize, Deserialize};
use crate::types::{Checksum, KeyTransform, Timestamp, CODE_LEN, KEY_TRANSFORM_LEN};

/// One generated access code: the transformed key bytes, the checksum over
/// them and the window they were generated for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessCode {
    pub xor_result: KeyTransform,
    pub checksum: Checksum,

    window: Timestamp,
}

impl AccessCode {
    pub fn new(
        xor_result: KeyTransform,
        tag: &str,
        window: Timestamp,
    ) -> Self {
        let checksum = Self::compute_checksum(&xor_result, tag, window);
        Self { xor_result, checksum, window }
    }

    pub fn window(&self) -> Timestamp {
        self.window
    }

    /// hex(xor_result) ++ tag ++ unpadded hex(window)
    pub fn checksum_input(xor_result: &KeyTransform, tag: &str, window: Timestamp) -> String {
        format!("{}{}{:x}", hex::encode(xor_result), tag, window)
    }

    pub fn compute_checksum(xor_result: &KeyTransform, tag: &str, window: Timestamp) -> Checksum {
        let input = Self::checksum_input(xor_result, tag, window);
        crc32fast::hash(input.as_bytes()).to_be_bytes()
    }

    /// Recompute the checksum for `tag` and compare it with the embedded one.
    pub fn checksum_matches(&self, tag: &str) -> bool {
        Self::compute_checksum(&self.xor_result, tag, self.window) == self.checksum
    }

    pub fn to_bytes(&self) -> [u8; CODE_LEN] {
        let mut out = [0u8; CODE_LEN];
        out[..KEY_TRANSFORM_LEN].copy_from_slice(&self.xor_result);
        out[KEY_TRANSFORM_LEN..].copy_from_slice(&self.checksum);
        out
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl fmt::Display for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod test {
    use super::AccessCode;

    #[test]
    fn checksum_input_uses_unpadded_window() {
        let xor = [0x50, 0x5e, 0xe4, 0xf9, 0x68, 0xe5, 0x30, 0xcd];
        assert_eq!(
            AccessCode::checksum_input(&xor, "", 999_999_985),
            "505ee4f968e530cd3b9ac9f1"
        );
        // window 0 renders as a single "0", not "00000000"
        assert_eq!(
            AccessCode::checksum_input(&[0u8; 8], "gate", 0),
            "0000000000000000gate0"
        );
    }

    #[test]
    fn layout_is_key_then_checksum() {
        let xor = [0x50, 0x5e, 0xe4, 0xf9, 0x68, 0xe5, 0x30, 0xcd];
        let code = AccessCode::new(xor, "", 999_999_985);

        assert_eq!(code.checksum, [0x17, 0xe1, 0xb4, 0xcd]);
        assert_eq!(code.to_hex(), "505ee4f968e530cd17e1b4cd");
        assert_eq!(code.to_string(), code.to_hex());
        assert!(code.checksum_matches(""));
        assert!(!code.checksum_matches("lobby"));
    }

    #[test]
    fn serde() {
        let code = AccessCode::new([7u8; 8], "x", 10);
        let encoded = serde_json::to_string(&code).unwrap();
        let decoded: AccessCode = serde_json::from_str(&encoded).unwrap();
        assert_eq!(code, decoded);
    }
}
