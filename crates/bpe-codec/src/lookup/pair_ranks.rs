//! # Pair ``{ (S, S) -> Rank }`` Merge Table

use std::collections::hash_map::Entry;

use crate::{
    errors::{CodecError, CodecResult},
    lookup::PairRankLookup,
    types::{CodecHashMap, Rank},
};

/// In-memory merge list.
///
/// Symbols are interned to dense ids, and pairs are keyed by
/// `(first_id, second_id)`; no string delimiter is involved, so any
/// symbol text is representable.
///
/// The insertion position of a pair is its rank.
#[derive(Debug, Clone, Default)]
pub struct PairRankMap {
    /// Symbol => interned id.
    symbol_ids: CodecHashMap<String, u32>,

    /// Interned pair => rank.
    pair_ranks: CodecHashMap<(u32, u32), Rank>,
}

impl PairRankMap {
    /// Build a [`PairRankMap`] from merge pairs in priority order.
    ///
    /// ## Arguments
    /// * `merges` - The ordered merge pairs; position is rank.
    ///
    /// ## Returns
    /// [`CodecError::VocabConflict`] if a pair is repeated.
    pub fn from_merges<I, S>(merges: I) -> CodecResult<Self>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut map = Self::default();
        for (first, second) in merges {
            map.push_merge(first.as_ref(), second.as_ref())?;
        }
        Ok(map)
    }

    /// The number of merges.
    pub fn len(&self) -> usize {
        self.pair_ranks.len()
    }

    /// Is the merge list empty?
    pub fn is_empty(&self) -> bool {
        self.pair_ranks.is_empty()
    }

    fn intern(
        &mut self,
        symbol: &str,
    ) -> u32 {
        if let Some(&id) = self.symbol_ids.get(symbol) {
            return id;
        }
        let id = self.symbol_ids.len() as u32;
        self.symbol_ids.insert(symbol.to_string(), id);
        id
    }

    /// Append a merge with the next (lowest priority) rank.
    ///
    /// ## Returns
    /// The assigned rank.
    pub fn push_merge(
        &mut self,
        first: &str,
        second: &str,
    ) -> CodecResult<Rank> {
        let rank = Rank::try_from(self.len())
            .map_err(|_| CodecError::VocabConflict("merge list exceeds rank capacity".into()))?;

        let key = (self.intern(first), self.intern(second));
        match self.pair_ranks.entry(key) {
            Entry::Occupied(prior) => Err(CodecError::VocabConflict(format!(
                "duplicate merge ({first:?}, {second:?}) at ranks {} and {rank}",
                prior.get()
            ))),
            Entry::Vacant(slot) => {
                slot.insert(rank);
                Ok(rank)
            }
        }
    }

    /// Look up the rank of a pair.
    pub fn get_rank(
        &self,
        first: &str,
        second: &str,
    ) -> Option<Rank> {
        let first = *self.symbol_ids.get(first)?;
        let second = *self.symbol_ids.get(second)?;
        self.pair_ranks.get(&(first, second)).copied()
    }
}

impl PairRankLookup for PairRankMap {
    fn pair_rank(
        &self,
        first: &str,
        second: &str,
    ) -> impl Future<Output = CodecResult<Option<Rank>>> + Send {
        futures::future::ready(Ok(self.get_rank(first, second)))
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    fn pair_rank_map_of(merges: &[(&str, &str)]) -> PairRankMap {
        PairRankMap::from_merges(merges.iter().copied()).unwrap()
    }

    fn lookup_rank<L: PairRankLookup>(
        lookup: L,
        first: &str,
        second: &str,
    ) -> Option<Rank> {
        block_on(lookup.pair_rank(first, second)).unwrap()
    }

    #[test]
    fn test_ranks_follow_order() {
        let map = pair_rank_map_of(&[("a", "b"), ("ab", "c"), ("b", "c")]);

        assert_eq!(map.len(), 3);
        assert!(!map.is_empty());

        assert_eq!(map.get_rank("a", "b"), Some(0));
        assert_eq!(map.get_rank("ab", "c"), Some(1));
        assert_eq!(map.get_rank("b", "c"), Some(2));

        // Order matters.
        assert_eq!(map.get_rank("b", "a"), None);
        assert_eq!(map.get_rank("c", "ab"), None);
        assert_eq!(map.get_rank("x", "y"), None);
    }

    #[test]
    fn test_symbols_may_hold_delimiters() {
        let map = PairRankMap::from_merges([("a b", "c"), ("a", "b c"), ("a\u{1f}b", "c")]).unwrap();

        assert_eq!(map.get_rank("a b", "c"), Some(0));
        assert_eq!(map.get_rank("a", "b c"), Some(1));
        assert_eq!(map.get_rank("a\u{1f}b", "c"), Some(2));
        assert_eq!(map.get_rank("a", "b\u{1f}c"), None);
    }

    #[test]
    fn test_duplicate_merge() {
        let err = PairRankMap::from_merges([("a", "b"), ("c", "d"), ("a", "b")]).unwrap_err();
        assert!(matches!(err, CodecError::VocabConflict(_)));

        let mut map = PairRankMap::default();
        map.push_merge("a", "b").unwrap();
        assert!(map.push_merge("a", "b").is_err());
        assert_eq!(map.get_rank("a", "b"), Some(0));
    }

    #[test]
    fn test_lookup_contract() {
        let map = pair_rank_map_of(&[("Ġ", "t"), ("h", "e")]);

        assert_eq!(block_on(map.pair_rank("h", "e")).unwrap(), Some(1));
        assert_eq!(lookup_rank(&map, "Ġ", "t"), Some(0));

        let shared = std::sync::Arc::new(map);
        assert_eq!(lookup_rank(shared.clone(), "h", "e"), Some(1));
        assert_eq!(lookup_rank(shared, "t", "h"), None);
    }
}
