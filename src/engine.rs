//! Hash engine service
//!
//! Wraps the pure functions of [`crate::crypto`] with leveled logging sent to
//! an injected [`LogSink`]. The engine holds no state besides its sink and
//! configuration, so one instance can be shared across threads freely.
//!
//! ```rust
//! use hash_engine::engine::HashEngine;
//! use hash_engine::logging::NoopSink;
//!
//! let engine = HashEngine::with_sink(NoopSink);
//! let root = engine.merkle_root(&["a", "b"]).unwrap();
//! assert_eq!(root, engine.sha256d("ab").unwrap());
//! ```

use crate::config::EngineConfig;
use crate::crypto::{self, HashError, MerkleLevel, MerkleTree};
use crate::logging::{LogFacade, LogSink};

/// Stateless hashing service with an injected log sink
#[derive(Debug, Clone, Default)]
pub struct HashEngine<S = LogFacade> {
    sink: S,
    config: EngineConfig,
}

impl HashEngine<LogFacade> {
    /// Engine logging through the `log` facade
    pub fn new() -> Self {
        Self::with_sink(LogFacade)
    }
}

impl<S: LogSink> HashEngine<S> {
    pub fn with_sink(sink: S) -> Self {
        Self::with_config(sink, EngineConfig::default())
    }

    pub fn with_config(sink: S, config: EngineConfig) -> Self {
        Self { sink, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Log the outcome of a digest operation and pass it through
    fn report(
        &self,
        operation: &str,
        input_len: usize,
        result: Result<String, HashError>,
    ) -> Result<String, HashError> {
        match &result {
            Ok(_) => self.sink.debug(&format!(
                "{} hash computed for {} bytes",
                operation, input_len
            )),
            Err(e) => {
                if e.is_primitive_failure() {
                    self.sink.critical(&e.to_string());
                }
                self.sink.error(&format!("{} hash failed: {}", operation, e));
            }
        }
        result
    }

    /// SHA-256 as 64 lowercase hex characters
    pub fn sha256(&self, data: impl AsRef<[u8]>) -> Result<String, HashError> {
        let data = data.as_ref();
        self.report("SHA-256", data.len(), crypto::sha256(data))
    }

    /// Double SHA-256 as 64 lowercase hex characters
    pub fn sha256d(&self, data: impl AsRef<[u8]>) -> Result<String, HashError> {
        let data = data.as_ref();
        self.report("SHA-256d", data.len(), crypto::sha256d(data))
    }

    /// RIPEMD-160 as 40 lowercase hex characters
    pub fn ripemd160(&self, data: impl AsRef<[u8]>) -> Result<String, HashError> {
        let data = data.as_ref();
        self.report("RIPEMD-160", data.len(), crypto::ripemd160(data))
    }

    /// RIPEMD-160 of SHA-256 as 40 lowercase hex characters
    pub fn hash160(&self, data: impl AsRef<[u8]>) -> Result<String, HashError> {
        let data = data.as_ref();
        self.report("Hash160", data.len(), crypto::hash160(data))
    }

    pub fn bytes_to_hex(&self, bytes: &[u8]) -> String {
        crypto::bytes_to_hex(bytes)
    }

    pub fn hex_to_bytes(&self, hex_str: &str) -> Result<Vec<u8>, HashError> {
        match crypto::hex_to_bytes(hex_str) {
            Ok(bytes) => {
                self.sink
                    .debug(&format!("Converted hex string to {} bytes", bytes.len()));
                Ok(bytes)
            }
            Err(e) => {
                self.sink
                    .error(&format!("Hex to bytes conversion failed: {}", e));
                Err(e)
            }
        }
    }

    fn check_leaf_limit(&self, count: usize) -> Result<(), HashError> {
        match self.config.max_merkle_leaves {
            Some(max) if count > max => {
                let e = HashError::MalformedInput(format!(
                    "{} hashes exceed the Merkle input limit of {}",
                    count, max
                ));
                self.sink
                    .error(&format!("Merkle root calculation failed: {}", e));
                Err(e)
            }
            _ => Ok(()),
        }
    }

    fn merkle_step<H: AsRef<str>>(&self, level: &[H]) -> Result<MerkleLevel, HashError> {
        if level.len() % 2 == 1 {
            self.sink.debug("Duplicating last hash for Merkle tree");
        }
        let next = crypto::next_level(level).map_err(|e| {
            self.sink
                .error(&format!("Merkle root calculation failed: {}", e));
            e
        })?;
        self.sink.debug(&format!(
            "Merkle tree level processed: {} -> {}",
            level.len(),
            next.len()
        ));
        Ok(next)
    }

    /// Merkle root of an ordered list of hex hashes
    ///
    /// Empty input yields an empty string and a warning; a single hash is
    /// returned as is.
    pub fn merkle_root<H: AsRef<str>>(&self, hashes: &[H]) -> Result<String, HashError> {
        self.check_leaf_limit(hashes.len())?;

        match hashes {
            [] => {
                self.sink.warning("Empty hash list provided for Merkle root");
                return Ok(String::new());
            }
            [only] => {
                self.sink
                    .debug(&format!("Single hash Merkle root: {}", only.as_ref()));
                return Ok(only.as_ref().to_string());
            }
            _ => {}
        }

        let mut current_level = self.merkle_step(hashes)?;
        while current_level.len() > 1 {
            current_level = self.merkle_step(&current_level)?;
        }

        Ok(current_level.into_iter().next().unwrap_or_default())
    }

    /// Full tree with every level retained, for inclusion proofs
    pub fn merkle_tree<H: AsRef<str>>(&self, hashes: &[H]) -> Result<MerkleTree, HashError> {
        self.check_leaf_limit(hashes.len())?;

        if hashes.is_empty() {
            self.sink.warning("Empty hash list provided for Merkle tree");
        }
        let tree = MerkleTree::build(hashes).map_err(|e| {
            self.sink
                .error(&format!("Merkle tree construction failed: {}", e));
            e
        })?;
        self.sink.debug(&format!(
            "Merkle tree built: {} leaves, depth {}",
            tree.leaf_count(),
            tree.depth()
        ));
        Ok(tree)
    }
}
