//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};

/// Generate a random 32-byte signing key
pub fn random_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    key
}

/// Decode standard base64 (secrets supplied through the environment)
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_key() {
        let key = random_key();
        // Should not be all zeros (statistically)
        assert!(key.iter().any(|&b| b != 0));
        assert_ne!(random_key(), random_key());
    }

    #[test]
    fn test_from_base64() {
        let decoded = from_base64("AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=").unwrap();
        assert_eq!(decoded, (0u8..32).collect::<Vec<_>>());
        assert!(from_base64("not base64!").is_err());
    }
}
