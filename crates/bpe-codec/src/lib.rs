//! # `bpe-codec` Byte-Level BPE Text Codec
//!
//! Converts text into GPT-2 style byte-level BPE token ids, and back.
//!
//! The codec never owns its vocabulary; it is driven through two narrow,
//! future-returning lookups, so merge lists and token mappings may live
//! in memory or behind an external store.
//!
//! See:
//! * [`codec`] to encode text into tokens, and decode tokens into text.
//! * [`lookup`] for the vocabulary lookup contracts, and in-memory implementations.
//! * [`io`] to read "vocab.bpe" / "encoder.json" vocabulary assets.
//! * [`merge_engine`] for the rank-ordered merge loop.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``rayon``
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``; which is a performance
//! win on many/(most?) modern CPUs.
//!
//! This is done by the ``types::Codec{HashMap, HashSet}`` type alias machinery.
//!
//! #### feature: ``rayon``
//!
//! This enables the ``BpeCodec::*_batch`` parallel helpers, using the ``rayon`` crate.
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//!
//! #### feature: ``testing``
//!
//! This exports the ``testing`` vocabulary and lookup wrappers for downstream tests.
//!
//! ## Loading GPT-2 Assets
//!
//! ```rust,ignore
//! use std::{fs::File, io::BufReader};
//!
//! use bpe_codec::{BpeCodec, CodecOptions, MergeCache, PairRankMap, TokenMapping};
//!
//! type T = u32;
//!
//! let codec = BpeCodec::<PairRankMap, TokenMapping<T>>::from_readers(
//!     BufReader::new(File::open("vocab.bpe")?),
//!     BufReader::new(File::open("encoder.json")?),
//!     CodecOptions::default(),
//! )?;
//!
//! let cache = MergeCache::new();
//! let tokens: Vec<T> = codec.encode_blocking("This is some text", Some(&cache))?;
//! assert_eq!(tokens, vec![1212, 318, 617, 2420]);
//! ```
#![warn(missing_docs, unused)]

#[cfg(feature = "rayon")]
pub mod batch;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub mod byte_symbols;
pub mod codec;
pub mod errors;
pub mod io;
pub mod lookup;
pub mod merge_cache;
pub mod merge_engine;
pub mod pre_tokenizer;
pub mod types;

#[doc(inline)]
pub use byte_symbols::{BYTE_SYMBOLS, ByteSymbolTable};
#[doc(inline)]
pub use codec::{BpeCodec, CodecOptions, decode, encode, token_length};
#[doc(inline)]
pub use errors::{CodecError, CodecResult};
#[doc(inline)]
pub use lookup::{PairRankLookup, PairRankMap, TokenMapping, TokenMappingLookup};
#[doc(inline)]
pub use merge_cache::MergeCache;
#[doc(inline)]
pub use pre_tokenizer::{GPT2_WORD_PATTERN, PreTokenizer};
#[doc(inline)]
pub use types::{Rank, TokenType};
