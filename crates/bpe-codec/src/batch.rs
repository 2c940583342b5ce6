//! # Rayon Batch Helpers
//!
//! [`rayon`] powered batch forms of the [`BpeCodec`] operations.
//!
//! Each text is driven to completion on its worker thread with
//! [`block_on`]; all texts of a batch share one [`MergeCache`].

use futures::executor::block_on;
use rayon::prelude::*;

use crate::{
    codec::BpeCodec,
    errors::CodecResult,
    lookup::{PairRankLookup, TokenMappingLookup},
    merge_cache::MergeCache,
    types::TokenType,
};

impl<R, V> BpeCodec<R, V>
where
    R: PairRankLookup,
    V: Send + Sync,
{
    /// Encode a batch of texts in parallel.
    ///
    /// ## Arguments
    /// * `texts` - The texts to encode.
    /// * `cache` - An optional shared merge cache; a fresh one is shared
    ///   by the batch if `None`.
    ///
    /// ## Returns
    /// The ids of each text, in input order; or the first error.
    pub fn encode_batch<T, S>(
        &self,
        texts: &[S],
        cache: Option<&MergeCache>,
    ) -> CodecResult<Vec<Vec<T>>>
    where
        T: TokenType,
        V: TokenMappingLookup<T>,
        S: AsRef<str> + Sync,
    {
        let local;
        let cache = match cache {
            Some(cache) => cache,
            None => {
                local = MergeCache::new();
                &local
            }
        };

        texts
            .par_iter()
            .map(|text| block_on(self.encode(text.as_ref(), Some(cache))))
            .collect()
    }

    /// Count the tokens of a batch of texts in parallel.
    ///
    /// See: [`encode_batch`](Self::encode_batch)
    pub fn token_length_batch<S>(
        &self,
        texts: &[S],
        cache: Option<&MergeCache>,
    ) -> CodecResult<Vec<usize>>
    where
        S: AsRef<str> + Sync,
    {
        let local;
        let cache = match cache {
            Some(cache) => cache,
            None => {
                local = MergeCache::new();
                &local
            }
        };

        texts
            .par_iter()
            .map(|text| block_on(self.token_length(text.as_ref(), Some(cache))))
            .collect()
    }

    /// Decode a batch of id sequences in parallel.
    pub fn decode_batch<T, S>(
        &self,
        batch: &[S],
    ) -> CodecResult<Vec<String>>
    where
        T: TokenType,
        V: TokenMappingLookup<T>,
        S: AsRef<[T]> + Sync,
    {
        batch
            .par_iter()
            .map(|tokens| block_on(self.decode(tokens.as_ref())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::CodecError, testing::build_test_codec};

    #[test]
    fn test_encode_batch() {
        type T = u32;
        let codec = build_test_codec::<T>();
        let cache = MergeCache::new();

        let texts = vec!["This is some text", "indivisible", "", " \t"];
        let batch: Vec<Vec<T>> = codec.encode_batch(&texts, Some(&cache)).unwrap();
        for (text, tokens) in texts.iter().zip(&batch) {
            let expected: Vec<T> = codec.encode_blocking(text, None).unwrap();
            assert_eq!(tokens, &expected);
        }
        assert_eq!(batch[1], vec![269, 270, 274]);
        assert!(cache.get("indivisible").is_some());

        let lengths = codec.token_length_batch(&texts, None).unwrap();
        assert_eq!(
            lengths,
            batch.iter().map(|tokens| tokens.len()).collect::<Vec<_>>()
        );

        assert_eq!(codec.decode_batch(&batch).unwrap(), texts);
    }

    #[test]
    fn test_batch_errors() {
        type T = u32;
        let codec = build_test_codec::<T>();

        let batch: Vec<Vec<T>> = vec![vec![258], vec![258, 999_999]];
        assert!(matches!(
            codec.decode_batch(&batch),
            Err(CodecError::UnknownTokenId { id: 999_999 })
        ));
    }
}
