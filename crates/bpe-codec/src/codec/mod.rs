//! # Codec
//!
//! Encoder and decoder orchestration over the lookup contracts.
//!
//! [`BpeCodec`] bundles the lookups with a configured pre-tokenizer;
//! the free functions [`encode`], [`decode`] and [`token_length`] take
//! the lookups directly and always use the GPT-2 pre-tokenizer.
//!
//! ## Example
//!
//! ```rust
//! use bpe_codec::{BpeCodec, MergeCache, PairRankMap, TokenMapping};
//!
//! let merges = "#version: 0.2\nĠ h\nĠh i\n";
//! let mapping = r#"{"Ġhi": 1000, "Ġ": 220, "h": 71, "i": 72}"#;
//!
//! let codec = BpeCodec::<PairRankMap, TokenMapping<u32>>::from_readers(
//!     merges.as_bytes(),
//!     mapping.as_bytes(),
//!     Default::default(),
//! )
//! .unwrap();
//!
//! let cache = MergeCache::new();
//! let tokens: Vec<u32> = codec.encode_blocking(" hi hi", Some(&cache)).unwrap();
//! assert_eq!(tokens, vec![1000, 1000]);
//! assert_eq!(codec.decode_blocking(&tokens).unwrap(), " hi hi");
//! ```

mod bpe_codec;
mod codec_options;
mod decoder;
mod encoder;

#[doc(inline)]
pub use bpe_codec::BpeCodec;
#[doc(inline)]
pub use codec_options::CodecOptions;

use crate::{
    errors::CodecResult,
    lookup::{PairRankLookup, TokenMappingLookup},
    merge_cache::MergeCache,
    pre_tokenizer::PreTokenizer,
    types::TokenType,
};

/// Encode text to ids.
///
/// ## Arguments
/// * `text` - The text to encode.
/// * `ranks` - The merge list lookup.
/// * `mapping` - The token mapping lookup.
/// * `cache` - An optional shared merge cache; a fresh one is used if `None`.
pub async fn encode<T, R, V>(
    text: &str,
    ranks: &R,
    mapping: &V,
    cache: Option<&MergeCache>,
) -> CodecResult<Vec<T>>
where
    T: TokenType,
    R: PairRankLookup,
    V: TokenMappingLookup<T>,
{
    let codec = BpeCodec::new(ranks, mapping)?;
    codec.encode(text, cache).await
}

/// Decode ids to text.
///
/// Decoding never consults the merge list.
pub async fn decode<T, V>(
    tokens: &[T],
    mapping: &V,
) -> CodecResult<String>
where
    T: TokenType,
    V: TokenMappingLookup<T>,
{
    let mut buf = Vec::new();
    decoder::decode_append_bytes(tokens, mapping, true, &mut buf).await?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Count the tokens `text` encodes to.
///
/// Only the merge list is consulted; ids are never resolved.
pub async fn token_length<R: PairRankLookup>(
    text: &str,
    ranks: &R,
    cache: Option<&MergeCache>,
) -> CodecResult<usize> {
    let local;
    let cache = match cache {
        Some(cache) => cache,
        None => {
            local = MergeCache::new();
            &local
        }
    };

    encoder::EncodeContext {
        pre_tokenizer: PreTokenizer::gpt2()?,
        ranks,
        cache,
        concurrent_lookups: true,
    }
    .token_length(text)
    .await
}
