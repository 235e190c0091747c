//! Merkle tree aggregation over hex-encoded hashes
//!
//! Each parent is the double SHA-256 of the *hex text* of its two children
//! concatenated left then right. The bytes are never decoded first, so roots
//! produced here are only comparable with roots built the same way. An odd
//! level pairs its last node with itself.

use serde::{Deserialize, Serialize};

use super::error::HashError;
use super::hash::sha256d;

/// One level of the tree, left to right
pub type MerkleLevel = Vec<String>;

/// Hash two sibling nodes into their parent
pub fn hash_pair(left: &str, right: &str) -> Result<String, HashError> {
    let mut combined = String::with_capacity(left.len() + right.len());
    combined.push_str(left);
    combined.push_str(right);
    sha256d(combined)
}

/// Build the next level up from `level`
///
/// Produces `ceil(n / 2)` parents; the last node of an odd level is
/// duplicated. An empty level yields an empty level.
pub fn next_level<S: AsRef<str>>(level: &[S]) -> Result<MerkleLevel, HashError> {
    level
        .chunks(2)
        .map(|chunk| {
            let left = chunk[0].as_ref();
            let right = chunk.get(1).map_or(left, |r| r.as_ref());
            hash_pair(left, right)
        })
        .collect()
}

/// Calculate the merkle root of an ordered list of hex hashes
///
/// Returns an empty string for an empty list and the element itself,
/// unchanged, for a single-element list.
pub fn merkle_root<S: AsRef<str>>(hashes: &[S]) -> Result<String, HashError> {
    match hashes {
        [] => return Ok(String::new()),
        [only] => return Ok(only.as_ref().to_string()),
        _ => {}
    }

    let mut current_level = next_level(hashes)?;
    while current_level.len() > 1 {
        current_level = next_level(&current_level)?;
    }

    Ok(current_level.into_iter().next().unwrap_or_default())
}

/// A fully materialised merkle tree, leaves first and root last
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MerkleTree {
    levels: Vec<MerkleLevel>,
}

impl MerkleTree {
    /// Build every level of the tree from the leaves
    pub fn build<S: AsRef<str>>(hashes: &[S]) -> Result<Self, HashError> {
        if hashes.is_empty() {
            return Ok(Self::default());
        }

        let mut levels: Vec<MerkleLevel> =
            vec![hashes.iter().map(|h| h.as_ref().to_string()).collect()];

        while let Some(top) = levels.last().filter(|level| level.len() > 1) {
            let next = next_level(top)?;
            levels.push(next);
        }

        Ok(Self { levels })
    }

    /// Root hash, or an empty string for an empty tree
    pub fn root(&self) -> &str {
        self.levels
            .last()
            .and_then(|level| level.first())
            .map_or("", String::as_str)
    }

    pub fn levels(&self) -> &[MerkleLevel] {
        &self.levels
    }

    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Number of hashing levels above the leaves
    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Inclusion proof for the leaf at `leaf_index`
    pub fn proof(&self, leaf_index: usize) -> Option<MerkleProof> {
        if leaf_index >= self.leaf_count() {
            return None;
        }

        let mut siblings = Vec::with_capacity(self.depth());
        let mut index = leaf_index;

        for level in &self.levels[..self.depth()] {
            let node = level.get(index)?;
            if index % 2 == 0 {
                // Last node of an odd level is its own sibling
                let sibling = level.get(index + 1).unwrap_or(node);
                siblings.push((sibling.clone(), false));
            } else {
                siblings.push((level.get(index - 1)?.clone(), true));
            }
            index /= 2;
        }

        Some(MerkleProof {
            leaf_index,
            siblings,
        })
    }
}

/// Merkle proof for verifying inclusion of a leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    pub leaf_index: usize,
    /// Sibling hashes from leaf to root
    pub siblings: Vec<(String, bool)>, // (hash, is_left)
}

impl MerkleProof {
    /// Verify the proof against a root hash
    pub fn verify(&self, leaf: &str, root: &str) -> Result<bool, HashError> {
        let mut current = leaf.to_string();

        for (sibling, is_left) in &self.siblings {
            current = if *is_left {
                hash_pair(sibling, &current)?
            } else {
                hash_pair(&current, sibling)?
            };
        }

        Ok(current == root)
    }
}
