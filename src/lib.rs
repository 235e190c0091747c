//! Hash Engine: hashing and Merkle aggregation in Rust
//!
//! This crate provides:
//! - SHA-256, double SHA-256 (sha256d), RIPEMD-160 and Hash160 digests
//! - Lowercase hex encoding and decoding
//! - Merkle roots, trees and inclusion proofs over hex-encoded hashes
//! - A stateless [`HashEngine`] that reports to an injected log sink
//! - JSON configuration and helpers for the `hashengine` CLI
//!
//! # Example
//!
//! ```rust
//! use hash_engine::crypto::{hash160, merkle_root, sha256, sha256d};
//!
//! let leaf_a = sha256("tx-a").unwrap();
//! let leaf_b = sha256("tx-b").unwrap();
//!
//! // Parents hash the hex text of their children
//! let root = merkle_root(&[leaf_a.clone(), leaf_b.clone()]).unwrap();
//! assert_eq!(root, sha256d(format!("{}{}", leaf_a, leaf_b)).unwrap());
//!
//! assert_eq!(hash160(b"pubkey").unwrap().len(), 40);
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod engine;
pub mod logging;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, ConfigError, EngineConfig, LoggingConfig};
pub use crypto::{
    bytes_to_hex, hash160, hex_to_bytes, merkle_root, ripemd160, sha256, sha256d, HashError,
    MerkleProof, MerkleTree,
};
pub use engine::HashEngine;
pub use logging::{LogFacade, LogLevel, LogSink, MemorySink, NoopSink};
