use crate::pre_tokenizer::GPT2_WORD_PATTERN;

/// Options for configuring a [`BpeCodec`](crate::BpeCodec).
#[derive(Debug, Clone, PartialEq)]
pub struct CodecOptions {
    /// The pre-tokenizer word pattern.
    pub word_pattern: String,

    /// Dispatch independent lookups together.
    pub concurrent_lookups: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            word_pattern: GPT2_WORD_PATTERN.to_string(),
            concurrent_lookups: true,
        }
    }
}

impl CodecOptions {
    /// Gets the configured word pattern.
    pub fn word_pattern(&self) -> &str {
        &self.word_pattern
    }

    /// Sets the configured word pattern.
    pub fn set_word_pattern<S: Into<String>>(
        &mut self,
        pattern: S,
    ) {
        self.word_pattern = pattern.into();
    }

    /// Sets the configured word pattern.
    pub fn with_word_pattern<S: Into<String>>(
        mut self,
        pattern: S,
    ) -> Self {
        self.set_word_pattern(pattern);
        self
    }

    /// Gets the configured concurrent lookups value.
    ///
    /// When enabled, the rank lookups of one merge round, and the
    /// per-position id/subword lookups of encode and decode, are
    /// polled together; otherwise each is awaited in turn.
    pub fn concurrent_lookups(&self) -> bool {
        self.concurrent_lookups
    }

    /// Sets the configured concurrent lookups value.
    ///
    /// See: [`concurrent_lookups`](Self::concurrent_lookups)
    pub fn set_concurrent_lookups(
        &mut self,
        concurrent: bool,
    ) {
        self.concurrent_lookups = concurrent;
    }

    /// Sets the configured concurrent lookups value.
    ///
    /// See: [`concurrent_lookups`](Self::concurrent_lookups)
    pub fn with_concurrent_lookups(
        mut self,
        concurrent: bool,
    ) -> Self {
        self.set_concurrent_lookups(concurrent);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options() {
        let options = CodecOptions::default();
        assert_eq!(options.word_pattern(), GPT2_WORD_PATTERN);
        assert!(options.concurrent_lookups());

        let options = options
            .with_word_pattern(r"\S+|\s+")
            .with_concurrent_lookups(false);
        assert_eq!(options.word_pattern(), r"\S+|\s+");
        assert!(!options.concurrent_lookups());

        let mut options = options;
        options.set_concurrent_lookups(true);
        options.set_word_pattern(GPT2_WORD_PATTERN);
        assert_eq!(options, CodecOptions::default());
    }
}
