//! Cryptographic utilities
//!
//! This module provides:
//! - SHA-256, double SHA-256, RIPEMD-160 and Hash160
//! - Hex encoding and decoding
//! - Merkle root calculation, trees and inclusion proofs
//!
//! Everything here is a pure function; see [`crate::engine::HashEngine`]
//! for the same operations with logging attached.

pub mod codec;
pub mod error;
pub mod hash;
pub mod merkle;

pub use codec::{bytes_to_hex, hex_to_bytes};
pub use error::HashError;
pub use hash::{
    hash160, hash160_raw, ripemd160, ripemd160_raw, sha256, sha256_raw, sha256d, sha256d_raw,
    RIPEMD160_DIGEST_LEN, SHA256_DIGEST_LEN,
};
pub use merkle::{hash_pair, merkle_root, next_level, MerkleLevel, MerkleProof, MerkleTree};
