//! # Testing Utilities
//!
//! A small reference vocabulary, and lookup wrappers which exercise the
//! asynchronous edges of the lookup contracts.

use std::{
    borrow::Cow,
    pin::Pin,
    sync::atomic::{AtomicUsize, Ordering},
    task::{Context, Poll},
};

use crate::{
    byte_symbols::BYTE_SYMBOLS,
    codec::{BpeCodec, CodecOptions},
    errors::{CodecError, CodecResult},
    io::read_merge_list,
    lookup::{PairRankLookup, PairRankMap, TokenMapping, TokenMappingLookup},
    types::{Rank, TokenType},
};

/// A merge list covering a few words of the GPT-2 test sentences.
///
/// Merge `k` produces token `256 + k`:
/// * `"This"` => 258, `" This"` => 275,
/// * `" is"` => 259, `" some"` => 263, `" text"` => 267,
/// * `"indivisible"` => `[269, 270, 274]` (`"ind"`, `"iv"`, `"isible"`).
pub const TEST_MERGE_LIST: &str = "#version: 0.2
T h
i s
Th is
Ġ is
s o
m e
Ġ so
Ġso me
t e
x t
Ġ te
Ġte xt
i n
in d
i v
b l
bl e
is i
isi ble
Ġ This
";

/// The single-byte token ids, in GPT-2 order.
///
/// Printable bytes come first, in byte order, followed by the remaining
/// bytes in byte order; so `"!"` is 0, `","` is 11, `"\t"` is 197, `" "` is 220.
pub fn gpt2_byte_token_order() -> Vec<u8> {
    let is_printable = |b: &u8| BYTE_SYMBOLS.get_symbol(*b) as u32 == *b as u32;
    let mut order: Vec<u8> = (0..=255).filter(is_printable).collect();
    order.extend((0..=255).filter(|b| !is_printable(b)));
    order
}

/// Build the [`PairRankMap`] of [`TEST_MERGE_LIST`].
pub fn build_test_pair_ranks() -> PairRankMap {
    read_merge_list(TEST_MERGE_LIST.as_bytes()).unwrap()
}

/// Build the [`TokenMapping`] matching [`TEST_MERGE_LIST`].
pub fn build_test_token_mapping<T: TokenType>() -> TokenMapping<T> {
    let mut mapping = TokenMapping::with_capacity(300);

    let mut buf = String::new();
    for (token, byte) in gpt2_byte_token_order().into_iter().enumerate() {
        buf.clear();
        buf.push(BYTE_SYMBOLS.get_symbol(byte));
        mapping
            .insert(buf.clone(), T::from_usize(token).unwrap())
            .unwrap();
    }

    for (rank, line) in TEST_MERGE_LIST.lines().skip(1).enumerate() {
        let (first, second) = line.split_once(' ').unwrap();
        mapping
            .insert(format!("{first}{second}"), T::from_usize(256 + rank).unwrap())
            .unwrap();
    }

    mapping
}

/// Build a [`BpeCodec`] over the test vocabulary.
pub fn build_test_codec<T: TokenType>() -> BpeCodec<PairRankMap, TokenMapping<T>> {
    BpeCodec::with_options(
        build_test_pair_ranks(),
        build_test_token_mapping(),
        CodecOptions::default(),
    )
    .unwrap()
}

/// A future which is pending exactly once.
struct YieldOnce {
    yielded: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<()> {
        if self.yielded {
            return Poll::Ready(());
        }
        self.yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

/// A lookup wrapper which suspends once before every answer.
#[derive(Debug, Default)]
pub struct SuspendingLookup<L> {
    inner: L,
    suspensions: AtomicUsize,
}

impl<L> SuspendingLookup<L> {
    /// Wrap a lookup.
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            suspensions: AtomicUsize::new(0),
        }
    }

    /// The number of suspended lookups so far.
    pub fn suspensions(&self) -> usize {
        self.suspensions.load(Ordering::Relaxed)
    }

    async fn suspend(&self) {
        self.suspensions.fetch_add(1, Ordering::Relaxed);
        YieldOnce { yielded: false }.await;
    }
}

impl<L: PairRankLookup> PairRankLookup for SuspendingLookup<L> {
    fn pair_rank(
        &self,
        first: &str,
        second: &str,
    ) -> impl Future<Output = CodecResult<Option<Rank>>> + Send {
        async move {
            self.suspend().await;
            self.inner.pair_rank(first, second).await
        }
    }
}

impl<T: TokenType, L: TokenMappingLookup<T>> TokenMappingLookup<T> for SuspendingLookup<L> {
    fn token_id(
        &self,
        symbol: &str,
    ) -> impl Future<Output = CodecResult<Option<T>>> + Send {
        async move {
            self.suspend().await;
            self.inner.token_id(symbol).await
        }
    }

    fn token_symbol(
        &self,
        token: T,
    ) -> impl Future<Output = CodecResult<Option<Cow<'_, str>>>> + Send {
        async move {
            self.suspend().await;
            self.inner.token_symbol(token).await
        }
    }
}

/// A lookup whose backend always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingLookup;

impl FailingLookup {
    fn failure() -> CodecError {
        CodecError::Lookup("backend unavailable".to_string())
    }
}

impl PairRankLookup for FailingLookup {
    fn pair_rank(
        &self,
        _first: &str,
        _second: &str,
    ) -> impl Future<Output = CodecResult<Option<Rank>>> + Send {
        futures::future::ready(Err(Self::failure()))
    }
}

impl<T: TokenType> TokenMappingLookup<T> for FailingLookup {
    fn token_id(
        &self,
        _symbol: &str,
    ) -> impl Future<Output = CodecResult<Option<T>>> + Send {
        futures::future::ready(Err(Self::failure()))
    }

    fn token_symbol(
        &self,
        _token: T,
    ) -> impl Future<Output = CodecResult<Option<Cow<'_, str>>>> + Send {
        futures::future::ready(Err(Self::failure()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpt2_byte_token_order() {
        let order = gpt2_byte_token_order();
        assert_eq!(order.len(), 256);
        assert_eq!(order[0], b'!');
        assert_eq!(order[11], b',');
        assert_eq!(order[197], b'\t');
        assert_eq!(order[220], b' ');
    }

    #[test]
    fn test_vocabulary_is_complete() {
        type T = u32;
        let mapping = build_test_token_mapping::<T>();
        let ranks = build_test_pair_ranks();

        assert_eq!(ranks.len(), 20);
        assert_eq!(mapping.len(), 256 + ranks.len());
        assert!(mapping.missing_byte_symbols().is_empty());

        assert_eq!(mapping.get_token("This"), Some(258));
        assert_eq!(mapping.get_token("ĠThis"), Some(275));
        assert_eq!(mapping.get_token("isible"), Some(274));
    }
}
