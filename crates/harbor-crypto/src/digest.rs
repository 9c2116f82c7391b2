use sha2::{Digest as ShaDigest, Sha512};

use crate::compare::constant_time_eq;
use crate::errors::CryptoError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Digest {
    pub bytes: Vec<u8>,
    pub hex: String,
}

impl Digest {
    pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            hex: hex::encode(bytes),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lowercase hexadecimal rendering of the raw hash bytes.
    pub fn as_hex(&self) -> &str {
        &self.hex
    }
}

/// SHA-512 over `salt || data`, with the salt fixed for the process lifetime.
#[derive(Clone)]
pub struct SaltedDigester {
    salt: Vec<u8>,
}

impl SaltedDigester {
    pub fn new(salt: impl AsRef<[u8]>) -> Result<Self, CryptoError> {
        let salt = salt.as_ref();
        if salt.is_empty() {
            return Err(CryptoError::missing_salt());
        }
        Ok(Self {
            salt: salt.to_vec(),
        })
    }

    pub fn digest(&self, data: &[u8]) -> Digest {
        let mut hasher = Sha512::new();
        hasher.update(&self.salt);
        hasher.update(data);
        Digest::from_bytes(hasher.finalize().as_slice())
    }

    pub fn hash_password(&self, cleartext: &str) -> String {
        self.digest(cleartext.as_bytes()).hex
    }

    pub fn verify_password(&self, cleartext: &str, stored_hex: &str) -> bool {
        let computed = self.hash_password(cleartext);
        constant_time_eq(computed.as_bytes(), stored_hex.as_bytes())
    }
}

impl std::fmt::Debug for SaltedDigester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaltedDigester")
            .field("salt", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_salt_is_rejected() {
        let err = SaltedDigester::new("").unwrap_err();
        assert_eq!(err.into_inner().code.0, "SCHEMA.VALIDATION_FAILED");
    }

    #[test]
    fn digest_is_512_bits_of_lowercase_hex() {
        let digester = SaltedDigester::new("pepper").unwrap();
        let digest = digester.digest(b"secret");
        assert_eq!(digest.as_bytes().len(), 64);
        assert_eq!(digest.as_hex().len(), 128);
        assert!(digest
            .as_hex()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn digest_covers_salt_then_data() {
        let digester = SaltedDigester::new("ab").unwrap();
        let expected = Sha512::digest(b"abcd");
        assert_eq!(digester.digest(b"cd").as_bytes(), expected.as_slice());
    }

    #[test]
    fn debug_does_not_leak_salt() {
        let digester = SaltedDigester::new("topsecret").unwrap();
        assert!(!format!("{digester:?}").contains("topsecret"));
    }
}
