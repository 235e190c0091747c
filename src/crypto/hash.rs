//! Cryptographic hashing primitives
//!
//! SHA-256, double SHA-256, RIPEMD-160 and Hash160, each available as raw
//! digest bytes (`*_raw`) or as lowercase hex. Inputs are anything that
//! views as bytes, so `&str` and `&[u8]` hash identically for the same bytes.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use super::codec::bytes_to_hex;
use super::error::HashError;

/// SHA-256 digest size in bytes
pub const SHA256_DIGEST_LEN: usize = 32;

/// RIPEMD-160 digest size in bytes
pub const RIPEMD160_DIGEST_LEN: usize = 20;

/// Reject any digest whose size does not match its algorithm
fn checked_digest(
    algorithm: &'static str,
    expected: usize,
    digest: Vec<u8>,
) -> Result<Vec<u8>, HashError> {
    if digest.len() != expected {
        return Err(HashError::PrimitiveFailure {
            algorithm,
            reason: format!(
                "digest has {} bytes, expected {}",
                digest.len(),
                expected
            ),
        });
    }
    Ok(digest)
}

/// Computes the raw SHA-256 digest of the input
pub fn sha256_raw(data: impl AsRef<[u8]>) -> Result<Vec<u8>, HashError> {
    let mut hasher = Sha256::new();
    hasher.update(data.as_ref());
    checked_digest("SHA-256", SHA256_DIGEST_LEN, hasher.finalize().to_vec())
}

/// Computes the raw RIPEMD-160 digest of the input
pub fn ripemd160_raw(data: impl AsRef<[u8]>) -> Result<Vec<u8>, HashError> {
    let mut hasher = Ripemd160::new();
    hasher.update(data.as_ref());
    checked_digest(
        "RIPEMD-160",
        RIPEMD160_DIGEST_LEN,
        hasher.finalize().to_vec(),
    )
}

/// Computes the raw double SHA-256 digest (SHA-256 of the SHA-256 digest)
pub fn sha256d_raw(data: impl AsRef<[u8]>) -> Result<Vec<u8>, HashError> {
    sha256_raw(sha256_raw(data)?)
}

/// Computes the raw Hash160 digest: RIPEMD-160 of the SHA-256 digest
pub fn hash160_raw(data: impl AsRef<[u8]>) -> Result<Vec<u8>, HashError> {
    ripemd160_raw(sha256_raw(data)?)
}

/// SHA-256 as 64 lowercase hex characters
pub fn sha256(data: impl AsRef<[u8]>) -> Result<String, HashError> {
    sha256_raw(data).map(|d| bytes_to_hex(&d))
}

/// Double SHA-256 as 64 lowercase hex characters
pub fn sha256d(data: impl AsRef<[u8]>) -> Result<String, HashError> {
    sha256d_raw(data).map(|d| bytes_to_hex(&d))
}

/// RIPEMD-160 as 40 lowercase hex characters
pub fn ripemd160(data: impl AsRef<[u8]>) -> Result<String, HashError> {
    ripemd160_raw(data).map(|d| bytes_to_hex(&d))
}

/// Hash160 as 40 lowercase hex characters
///
/// Used to compress a public key or payload into a short identifier.
pub fn hash160(data: impl AsRef<[u8]>) -> Result<String, HashError> {
    hash160_raw(data).map(|d| bytes_to_hex(&d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256() {
        let data = b"hello world";
        assert_eq!(sha256_raw(data).unwrap().len(), 32);
        assert_eq!(
            sha256(data).unwrap(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
        assert_eq!(
            sha256("").unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_text_and_bytes_agree() {
        assert_eq!(sha256("abc").unwrap(), sha256(b"abc").unwrap());
        assert_eq!(sha256d("abc").unwrap(), sha256d(vec![b'a', b'b', b'c']).unwrap());
        assert_eq!(ripemd160("abc").unwrap(), ripemd160(&b"abc"[..]).unwrap());
        assert_eq!(hash160("abc").unwrap(), hash160(b"abc").unwrap());
    }

    #[test]
    fn test_double_sha256() {
        assert_eq!(
            sha256d("").unwrap(),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
        let inner = sha256_raw(b"hello world").unwrap();
        assert_eq!(sha256d(b"hello world").unwrap(), sha256(inner).unwrap());
    }

    #[test]
    fn test_ripemd160() {
        assert_eq!(
            ripemd160("").unwrap(),
            "9c1185a5c5e9fc54612808977ee8f548b2258d31"
        );
        assert_eq!(
            ripemd160("abc").unwrap(),
            "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"
        );
    }

    #[test]
    fn test_hash160() {
        assert_eq!(
            hash160("").unwrap(),
            "b472a266d0bd89c13706a4132ccfb16f7c3b9fcb"
        );
        let inner = sha256_raw(b"payload").unwrap();
        assert_eq!(hash160(b"payload").unwrap(), ripemd160(inner).unwrap());
    }

    #[test]
    fn test_output_lengths() {
        let inputs: [&[u8]; 4] = [b"", b"a", b"The quick brown fox", &[0u8; 1000]];
        for input in inputs {
            assert_eq!(sha256(input).unwrap().len(), 64);
            assert_eq!(sha256d(input).unwrap().len(), 64);
            assert_eq!(ripemd160(input).unwrap().len(), 40);
            assert_eq!(hash160(input).unwrap().len(), 40);
        }
    }

    #[test]
    fn test_checked_digest_rejects_wrong_length() {
        let err = checked_digest("SHA-256", SHA256_DIGEST_LEN, vec![0u8; 31]).unwrap_err();
        assert!(err.is_primitive_failure());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(sha256("same").unwrap(), sha256("same").unwrap());
        assert_eq!(hash160("same").unwrap(), hash160("same").unwrap());
    }
}
