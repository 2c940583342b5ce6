//! # Encoder Pipeline
//!
//! `text -> spans -> byte symbols -> merged subwords -> ids`.

use crate::{
    byte_symbols::BYTE_SYMBOLS,
    errors::{CodecError, CodecResult},
    lookup::{PairRankLookup, TokenMappingLookup, resolve_all},
    merge_cache::MergeCache,
    merge_engine::merge_pre_token,
    pre_tokenizer::PreTokenizer,
    types::TokenType,
};

/// Shared per-call encoder state.
pub(crate) struct EncodeContext<'a, R> {
    pub pre_tokenizer: &'a PreTokenizer,
    pub ranks: &'a R,
    pub cache: &'a MergeCache,
    pub concurrent_lookups: bool,
}

impl<R: PairRankLookup> EncodeContext<'_, R> {
    /// The merged (space-joined) form of each span of `text`, in order.
    async fn merge_spans(
        &self,
        text: &str,
    ) -> CodecResult<Vec<String>> {
        let mut merged_spans = Vec::new();
        let mut pre_token = String::new();
        for span in self.pre_tokenizer.spans(text) {
            let span = span?;

            pre_token.clear();
            BYTE_SYMBOLS.append_symbols(span.as_bytes(), &mut pre_token);

            merged_spans.push(
                merge_pre_token(&pre_token, self.ranks, self.cache, self.concurrent_lookups)
                    .await?,
            );
        }
        Ok(merged_spans)
    }

    /// Encode `text`, appending its ids to `tokens`.
    ///
    /// On error, `tokens` is untouched.
    pub async fn encode_append<T, V>(
        &self,
        text: &str,
        mapping: &V,
        tokens: &mut Vec<T>,
    ) -> CodecResult<()>
    where
        T: TokenType,
        V: TokenMappingLookup<T>,
    {
        let mut ids = Vec::new();
        for merged in self.merge_spans(text).await? {
            let span_ids = resolve_all(
                merged.split(' ').map(|symbol| async move {
                    mapping.token_id(symbol).await?.ok_or_else(|| {
                        CodecError::MissingVocabularyEntry {
                            symbol: symbol.to_string(),
                        }
                    })
                }),
                self.concurrent_lookups,
            )
            .await?;
            ids.extend(span_ids);
        }
        tokens.extend(ids);
        Ok(())
    }

    /// Count the subwords of `text`, without resolving their ids.
    pub async fn token_length(
        &self,
        text: &str,
    ) -> CodecResult<usize> {
        Ok(self
            .merge_spans(text)
            .await?
            .iter()
            .map(|merged| merged.split(' ').count())
            .sum())
    }
}
