use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use sha2::{Digest as ShaDigest, Sha512};
use tracing::debug;

use crate::errors::CryptoError;

/// Unsalted SHA-512 of everything readable from `reader`, as lowercase hex.
///
/// Signatures are reproducible across deployments, unlike password digests.
/// Interrupted reads are retried.
pub fn reader_signature<R: Read>(mut reader: R) -> Result<String, CryptoError> {
    let mut hasher = Sha512::new();
    io::copy(&mut reader, &mut hasher).map_err(|err| CryptoError::io(&err.to_string()))?;
    Ok(hex::encode(hasher.finalize()))
}

pub fn file_signature(path: &Path) -> Result<String, CryptoError> {
    let file = File::open(path)
        .map_err(|err| CryptoError::io(&format!("open {}: {err}", path.display())))?;
    let signature = reader_signature(file)?;
    debug!(path = %path.display(), "computed file signature");
    Ok(signature)
}
