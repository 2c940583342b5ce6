//! # Decoder Pipeline
//!
//! `ids -> subwords -> byte symbols -> bytes -> text`.

use crate::{
    byte_symbols::BYTE_SYMBOLS,
    errors::{CodecError, CodecResult},
    lookup::{TokenMappingLookup, resolve_all},
    types::TokenType,
};

/// Decode `tokens` to bytes, appending them to `buf`.
///
/// ## Arguments
/// * `tokens` - The ids to decode.
/// * `mapping` - The token mapping.
/// * `concurrent_lookups` - Dispatch the subword lookups together.
/// * `buf` - The target buffer; untouched on error.
///
/// ## Returns
/// [`CodecError::UnknownTokenId`] for the first id without a subword.
pub(crate) async fn decode_append_bytes<T, V>(
    tokens: &[T],
    mapping: &V,
    concurrent_lookups: bool,
    buf: &mut Vec<u8>,
) -> CodecResult<()>
where
    T: TokenType,
    V: TokenMappingLookup<T>,
{
    let subwords = resolve_all(
        tokens.iter().map(|&token| async move {
            mapping
                .token_symbol(token)
                .await?
                .ok_or_else(|| CodecError::UnknownTokenId {
                    id: token.to_u64().unwrap_or(u64::MAX),
                })
        }),
        concurrent_lookups,
    )
    .await?;

    let mut bytes = Vec::with_capacity(subwords.iter().map(|s| s.len()).sum());
    for subword in &subwords {
        BYTE_SYMBOLS.append_bytes(subword, &mut bytes)?;
    }
    buf.extend(bytes);
    Ok(())
}
