use std::{
    borrow::Cow,
    io::{BufRead, Read},
};

use futures::executor::block_on;

use crate::{
    codec::{
        CodecOptions,
        decoder::decode_append_bytes,
        encoder::EncodeContext,
    },
    errors::CodecResult,
    io::{read_merge_list, read_token_mapping},
    lookup::{PairRankLookup, PairRankMap, TokenMapping, TokenMappingLookup},
    merge_cache::MergeCache,
    pre_tokenizer::{GPT2_WORD_PATTERN, PreTokenizer},
    types::TokenType,
};

/// A byte-level BPE codec.
///
/// Bundles a merge list (`R`), a token mapping (`V`), and a compiled
/// pre-tokenizer.
///
/// Every operation takes an optional [`MergeCache`]; when none is given,
/// a fresh cache lives for the duration of the call.
#[derive(Debug, Clone)]
pub struct BpeCodec<R, V> {
    ranks: R,
    mapping: V,
    pre_tokenizer: Cow<'static, PreTokenizer>,
    options: CodecOptions,
}

impl<R, V> BpeCodec<R, V>
where
    R: PairRankLookup,
{
    /// Build a codec with the default options.
    pub fn new(
        ranks: R,
        mapping: V,
    ) -> CodecResult<Self> {
        Self::with_options(ranks, mapping, CodecOptions::default())
    }

    /// Build a codec.
    ///
    /// ## Arguments
    /// * `ranks` - The merge list lookup.
    /// * `mapping` - The token mapping lookup.
    /// * `options` - The codec options.
    ///
    /// ## Returns
    /// [`CodecError::Pattern`](crate::CodecError::Pattern) if the word
    /// pattern does not compile.
    pub fn with_options(
        ranks: R,
        mapping: V,
        options: CodecOptions,
    ) -> CodecResult<Self> {
        let pre_tokenizer = if options.word_pattern() == GPT2_WORD_PATTERN {
            Cow::Borrowed(PreTokenizer::gpt2()?)
        } else {
            Cow::Owned(PreTokenizer::new(options.word_pattern())?)
        };

        Ok(Self {
            ranks,
            mapping,
            pre_tokenizer,
            options,
        })
    }

    /// Get the merge list lookup.
    pub fn ranks(&self) -> &R {
        &self.ranks
    }

    /// Get the token mapping lookup.
    pub fn mapping(&self) -> &V {
        &self.mapping
    }

    /// Get the pre-tokenizer.
    pub fn pre_tokenizer(&self) -> &PreTokenizer {
        &self.pre_tokenizer
    }

    /// Get the codec options.
    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    fn encode_context<'a>(
        &'a self,
        cache: &'a MergeCache,
    ) -> EncodeContext<'a, R> {
        EncodeContext {
            pre_tokenizer: &self.pre_tokenizer,
            ranks: &self.ranks,
            cache,
            concurrent_lookups: self.options.concurrent_lookups(),
        }
    }

    /// Encode text, appending the ids to a target buffer.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    /// * `cache` - An optional shared merge cache.
    /// * `tokens` - The target buffer; untouched on error.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, text, cache, tokens), fields(len = text.len()))
    )]
    pub async fn encode_append<T>(
        &self,
        text: &str,
        cache: Option<&MergeCache>,
        tokens: &mut Vec<T>,
    ) -> CodecResult<()>
    where
        T: TokenType,
        V: TokenMappingLookup<T>,
    {
        let local;
        let cache = match cache {
            Some(cache) => cache,
            None => {
                local = MergeCache::new();
                &local
            }
        };

        self.encode_context(cache)
            .encode_append(text, &self.mapping, tokens)
            .await
    }

    /// Encode text to ids.
    ///
    /// ## Returns
    /// [`CodecError::MissingVocabularyEntry`](crate::CodecError::MissingVocabularyEntry)
    /// if a merged subword has no id.
    pub async fn encode<T>(
        &self,
        text: &str,
        cache: Option<&MergeCache>,
    ) -> CodecResult<Vec<T>>
    where
        T: TokenType,
        V: TokenMappingLookup<T>,
    {
        let mut tokens = Vec::new();
        self.encode_append(text, cache, &mut tokens).await?;
        Ok(tokens)
    }

    /// Count the tokens `text` encodes to, without resolving their ids.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, text, cache), fields(len = text.len()))
    )]
    pub async fn token_length(
        &self,
        text: &str,
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

        self.encode_context(cache).token_length(text).await
    }

    /// Decode ids to raw bytes.
    ///
    /// ## Returns
    /// [`CodecError::UnknownTokenId`](crate::CodecError::UnknownTokenId)
    /// for the first id without a subword.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, tokens), fields(len = tokens.len()))
    )]
    pub async fn decode_bytes<T>(
        &self,
        tokens: &[T],
    ) -> CodecResult<Vec<u8>>
    where
        T: TokenType,
        V: TokenMappingLookup<T>,
    {
        let mut buf = Vec::new();
        decode_append_bytes(
            tokens,
            &self.mapping,
            self.options.concurrent_lookups(),
            &mut buf,
        )
        .await?;
        Ok(buf)
    }

    /// Decode ids to text.
    ///
    /// Invalid UTF-8 (only produced by corrupted id sequences) is replaced
    /// with `U+FFFD`.
    pub async fn decode<T>(
        &self,
        tokens: &[T],
    ) -> CodecResult<String>
    where
        T: TokenType,
        V: TokenMappingLookup<T>,
    {
        let bytes = self.decode_bytes(tokens).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Blocking form of [`encode`](Self::encode).
    pub fn encode_blocking<T>(
        &self,
        text: &str,
        cache: Option<&MergeCache>,
    ) -> CodecResult<Vec<T>>
    where
        T: TokenType,
        V: TokenMappingLookup<T>,
    {
        block_on(self.encode(text, cache))
    }

    /// Blocking form of [`token_length`](Self::token_length).
    pub fn token_length_blocking(
        &self,
        text: &str,
        cache: Option<&MergeCache>,
    ) -> CodecResult<usize> {
        block_on(self.token_length(text, cache))
    }

    /// Blocking form of [`decode_bytes`](Self::decode_bytes).
    pub fn decode_bytes_blocking<T>(
        &self,
        tokens: &[T],
    ) -> CodecResult<Vec<u8>>
    where
        T: TokenType,
        V: TokenMappingLookup<T>,
    {
        block_on(self.decode_bytes(tokens))
    }

    /// Blocking form of [`decode`](Self::decode).
    pub fn decode_blocking<T>(
        &self,
        tokens: &[T],
    ) -> CodecResult<String>
    where
        T: TokenType,
        V: TokenMappingLookup<T>,
    {
        block_on(self.decode(tokens))
    }
}

impl<T: TokenType> BpeCodec<PairRankMap, TokenMapping<T>> {
    /// Load an in-memory codec from "vocab.bpe" and "encoder.json" sources.
    ///
    /// ## Arguments
    /// * `merges` - The merge list source.
    /// * `mapping` - The JSON token mapping source.
    /// * `options` - The codec options.
    pub fn from_readers<M, J>(
        merges: M,
        mapping: J,
        options: CodecOptions,
    ) -> CodecResult<Self>
    where
        M: BufRead,
        J: Read,
    {
        let ranks = read_merge_list(merges)?;
        let mapping = read_token_mapping(mapping)?;
        Self::with_options(ranks, mapping, options)
    }
}
