//! # Merge Cache
//!
//! Memoizes `pre-token -> merged subwords` for one vocabulary.
//!
//! A cache is owned by the caller, and is only valid for the merge list it
//! was filled against. Operations which are not handed a cache build a
//! fresh one per call.

use parking_lot::RwLock;

use crate::types::{CodecHashMap, hash_map_new};

/// Interior-mutable pre-token merge cache.
///
/// Safe to share between concurrent encode calls; the merged form of a
/// pre-token is deterministic, so concurrent writers of the same key
/// always agree and the last write wins.
#[derive(Debug, Default)]
pub struct MergeCache {
    entries: RwLock<CodecHashMap<String, String>>,
}

impl Clone for MergeCache {
    fn clone(&self) -> Self {
        Self {
            entries: RwLock::new(self.entries.read().clone()),
        }
    }
}

impl MergeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(hash_map_new()),
        }
    }

    /// Get the merged (space-joined) form of a pre-token, if cached.
    pub fn get(
        &self,
        pre_token: &str,
    ) -> Option<String> {
        self.entries.read().get(pre_token).cloned()
    }

    /// Record the merged form of a pre-token.
    pub fn insert(
        &self,
        pre_token: String,
        merged: String,
    ) {
        self.entries.write().insert(pre_token, merged);
    }

    /// The number of cached pre-tokens.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Is the cache empty?
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
