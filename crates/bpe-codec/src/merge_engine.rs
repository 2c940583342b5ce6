//! # Merge Engine
//!
//! Rank-ordered iterative pair merging over one pre-token.
//!
//! Each round collects the distinct adjacent symbol pairs of the word,
//! asks the [`PairRankLookup`] for all of their ranks, and merges every
//! non-overlapping occurrence of the lowest ranked pair. The loop stops
//! when no pair is a legal merge, or when the word is a single symbol.

use crate::{
    errors::CodecResult,
    lookup::{PairRankLookup, resolve_all},
    merge_cache::MergeCache,
    types::{CodecHashSet, Rank},
};

/// Merge a byte-symbol pre-token into its final subwords.
///
/// ## Arguments
/// * `pre_token` - The pre-token, one byte symbol per source byte.
/// * `ranks` - The merge list.
/// * `cache` - The merge cache; consulted first, and filled on completion.
/// * `concurrent_lookups` - Dispatch the rank lookups of a round together.
///
/// ## Returns
/// The final subwords, joined by a single space.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "trace", skip(ranks, cache))
)]
pub async fn merge_pre_token<R: PairRankLookup>(
    pre_token: &str,
    ranks: &R,
    cache: &MergeCache,
    concurrent_lookups: bool,
) -> CodecResult<String> {
    if let Some(merged) = cache.get(pre_token) {
        log::trace!("merge cache hit: {pre_token:?}");
        return Ok(merged);
    }

    let mut word: Vec<String> = pre_token.chars().map(String::from).collect();

    while word.len() > 1 {
        let Some((first, second)) = lowest_ranked_pair(&word, ranks, concurrent_lookups).await?
        else {
            break;
        };
        word = merge_pair(word, &first, &second);
    }

    let merged = word.join(" ");
    cache.insert(pre_token.to_string(), merged.clone());
    Ok(merged)
}

/// The distinct adjacent pairs of `word`, in order of first appearance.
fn distinct_pairs(word: &[String]) -> Vec<(&str, &str)> {
    let mut seen = CodecHashSet::default();
    word.windows(2)
        .map(|w| (w[0].as_str(), w[1].as_str()))
        .filter(|&pair| seen.insert(pair))
        .collect()
}

/// Find the legal merge with the lowest rank.
///
/// Ranks are unique in a well-formed merge list; should a backend report a
/// tie, the leftmost pair wins.
async fn lowest_ranked_pair<R: PairRankLookup>(
    word: &[String],
    ranks: &R,
    concurrent_lookups: bool,
) -> CodecResult<Option<(String, String)>> {
    let pairs = distinct_pairs(word);

    let pair_ranks: Vec<Option<Rank>> = resolve_all(
        pairs
            .iter()
            .map(|&(first, second)| ranks.pair_rank(first, second)),
        concurrent_lookups,
    )
    .await?;

    let best = pairs
        .into_iter()
        .zip(pair_ranks)
        .filter_map(|(pair, rank)| rank.map(|rank| (rank, pair)))
        .min_by_key(|&(rank, _)| rank);

    Ok(best.map(|(rank, (first, second))| {
        log::trace!("merge ({first:?}, {second:?}) at rank {rank}");
        (first.to_string(), second.to_string())
    }))
}

/// Replace each non-overlapping `(first, second)` occurrence, scanning left to right.
fn merge_pair(
    word: Vec<String>,
    first: &str,
    second: &str,
) -> Vec<String> {
    let mut merged = Vec::with_capacity(word.len());
    let mut symbols = word.into_iter().peekable();
    while let Some(symbol) = symbols.next() {
        if symbol == first && symbols.peek().is_some_and(|next| next == second) {
            symbols.next();
            merged.push(symbol + second);
        } else {
            merged.push(symbol);
        }
    }
    merged
}
