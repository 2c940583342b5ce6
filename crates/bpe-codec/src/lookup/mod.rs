//! # Lookup Contracts
//!
//! The codec core never owns its vocabulary; it asks two narrow
//! lookups for everything it needs:
//!
//! * [`PairRankLookup`] - `(symbol, symbol) -> rank`, the merge list.
//! * [`TokenMappingLookup`] - `subword <-> id`, the token mapping.
//!
//! Every lookup returns a future, so implementations may be backed by
//! out-of-process stores; the in-memory implementations
//! ([`PairRankMap`], [`TokenMapping`]) resolve immediately.
//!
//! Both contracts are implemented for `&L` and `Arc<L>`.

pub mod pair_ranks;
pub mod token_mapping;

use std::{borrow::Cow, sync::Arc};

#[doc(inline)]
pub use pair_ranks::PairRankMap;
#[doc(inline)]
pub use token_mapping::TokenMapping;

use crate::{
    errors::CodecResult,
    types::{Rank, TokenType},
};

/// Pair-Rank lookup contract.
pub trait PairRankLookup: Send + Sync {
    /// Look up the merge rank of the adjacent pair `(first, second)`.
    ///
    /// ## Returns
    /// * `Ok(Some(rank))` - the pair is a legal merge.
    /// * `Ok(None)` - the pair is not a legal merge.
    /// * `Err(_)` - the backend failed.
    fn pair_rank(
        &self,
        first: &str,
        second: &str,
    ) -> impl Future<Output = CodecResult<Option<Rank>>> + Send;
}

/// Vocabulary Mapping lookup contract.
pub trait TokenMappingLookup<T: TokenType>: Send + Sync {
    /// Look up the id of a subword.
    fn token_id(
        &self,
        symbol: &str,
    ) -> impl Future<Output = CodecResult<Option<T>>> + Send;

    /// Look up the subword of an id.
    fn token_symbol(
        &self,
        token: T,
    ) -> impl Future<Output = CodecResult<Option<Cow<'_, str>>>> + Send;
}

impl<L: PairRankLookup> PairRankLookup for &L {
    fn pair_rank(
        &self,
        first: &str,
        second: &str,
    ) -> impl Future<Output = CodecResult<Option<Rank>>> + Send {
        (**self).pair_rank(first, second)
    }
}

impl<L: PairRankLookup> PairRankLookup for Arc<L> {
    fn pair_rank(
        &self,
        first: &str,
        second: &str,
    ) -> impl Future<Output = CodecResult<Option<Rank>>> + Send {
        (**self).pair_rank(first, second)
    }
}

impl<T: TokenType, L: TokenMappingLookup<T>> TokenMappingLookup<T> for &L {
    fn token_id(
        &self,
        symbol: &str,
    ) -> impl Future<Output = CodecResult<Option<T>>> + Send {
        (**self).token_id(symbol)
    }

    fn token_symbol(
        &self,
        token: T,
    ) -> impl Future<Output = CodecResult<Option<Cow<'_, str>>>> + Send {
        (**self).token_symbol(token)
    }
}

impl<T: TokenType, L: TokenMappingLookup<T>> TokenMappingLookup<T> for Arc<L> {
    fn token_id(
        &self,
        symbol: &str,
    ) -> impl Future<Output = CodecResult<Option<T>>> + Send {
        (**self).token_id(symbol)
    }

    fn token_symbol(
        &self,
        token: T,
    ) -> impl Future<Output = CodecResult<Option<Cow<'_, str>>>> + Send {
        (**self).token_symbol(token)
    }
}

/// Await a batch of independent lookups.
///
/// When `concurrent` is set all futures are polled together and joined;
/// otherwise each is awaited in turn, so a backend never sees overlapping
/// requests. Results are in input order, and the first error is returned.
pub(crate) async fn resolve_all<I, F, O>(
    lookups: I,
    concurrent: bool,
) -> CodecResult<Vec<O>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = CodecResult<O>>,
{
    if concurrent {
        return futures::future::try_join_all(lookups).await;
    }

    let lookups = lookups.into_iter();
    let mut results = Vec::with_capacity(lookups.size_hint().0);
    for lookup in lookups {
        results.push(lookup.await?);
    }
    Ok(results)
}
