//! # Token Mapping ``{ String <-> T }``

use std::{borrow::Cow, collections::hash_map::Entry};

use crate::{
    byte_symbols::BYTE_SYMBOLS,
    errors::{CodecError, CodecResult},
    lookup::TokenMappingLookup,
    types::{CodecHashMap, TokenType, hash_map_with_capacity},
};

/// In-memory bijection between subword strings and token ids.
///
/// Keys are plain strings; names such as `constructor` or `toString`
/// are ordinary entries.
#[derive(Debug, Clone)]
pub struct TokenMapping<T: TokenType> {
    /// Subword => token.
    symbol_tokens: CodecHashMap<String, T>,

    /// Token => subword.
    token_symbols: CodecHashMap<T, String>,
}

impl<T: TokenType> Default for TokenMapping<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T: TokenType> TokenMapping<T> {
    /// Create an empty mapping with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            symbol_tokens: hash_map_with_capacity(capacity),
            token_symbols: hash_map_with_capacity(capacity),
        }
    }

    /// Build a [`TokenMapping`] from `(subword, token)` pairs.
    ///
    /// ## Returns
    /// [`CodecError::VocabConflict`] if the pairs are not a bijection.
    pub fn from_pairs<I, S>(pairs: I) -> CodecResult<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
    {
        let pairs = pairs.into_iter();
        let mut mapping = Self::with_capacity(pairs.size_hint().0);
        for (symbol, token) in pairs {
            mapping.insert(symbol.into(), token)?;
        }
        Ok(mapping)
    }

    /// Add an entry.
    ///
    /// Re-inserting an identical entry is a no-op.
    ///
    /// ## Returns
    /// [`CodecError::VocabConflict`] if either side is already mapped elsewhere.
    pub fn insert(
        &mut self,
        symbol: String,
        token: T,
    ) -> CodecResult<()> {
        if let Some(&prior) = self.symbol_tokens.get(&symbol) {
            if prior == token {
                return Ok(());
            }
            return Err(CodecError::VocabConflict(format!(
                "subword {symbol:?} mapped to both {prior} and {token}"
            )));
        }
        match self.token_symbols.entry(token) {
            Entry::Occupied(prior) => Err(CodecError::VocabConflict(format!(
                "token {token} mapped to both {:?} and {symbol:?}",
                prior.get()
            ))),
            Entry::Vacant(slot) => {
                slot.insert(symbol.clone());
                self.symbol_tokens.insert(symbol, token);
                Ok(())
            }
        }
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.symbol_tokens.len()
    }

    /// Is the mapping empty?
    pub fn is_empty(&self) -> bool {
        self.symbol_tokens.is_empty()
    }

    /// The largest token id, if any.
    pub fn max_token(&self) -> Option<T> {
        self.token_symbols.keys().copied().max()
    }

    /// Look up the token for a subword.
    pub fn get_token(
        &self,
        symbol: &str,
    ) -> Option<T> {
        self.symbol_tokens.get(symbol).copied()
    }

    /// Look up the subword for a token.
    pub fn get_symbol(
        &self,
        token: T,
    ) -> Option<&str> {
        self.token_symbols.get(&token).map(String::as_str)
    }

    /// The byte symbols which have no entry.
    ///
    /// A complete byte-level vocabulary maps all 256 of them.
    pub fn missing_byte_symbols(&self) -> Vec<char> {
        let mut buf = [0u8; 4];
        BYTE_SYMBOLS
            .byte_symbols()
            .iter()
            .copied()
            .filter(|c| !self.symbol_tokens.contains_key(&*c.encode_utf8(&mut buf)))
            .collect()
    }

    /// Iterate over `(subword, token)` entries, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, T)> {
        self.symbol_tokens.iter().map(|(s, &t)| (s.as_str(), t))
    }
}

impl<T: TokenType> TokenMappingLookup<T> for TokenMapping<T> {
    fn token_id(
        &self,
        symbol: &str,
    ) -> impl Future<Output = CodecResult<Option<T>>> + Send {
        futures::future::ready(Ok(self.get_token(symbol)))
    }

    fn token_symbol(
        &self,
        token: T,
    ) -> impl Future<Output = CodecResult<Option<Cow<'_, str>>>> + Send {
        futures::future::ready(Ok(self.get_symbol(token).map(Cow::Borrowed)))
    }
}
