//! # Pre-Tokenizer
//!
//! Splits text into the maximal word-like spans which are merged
//! independently of each other.

use core::ops::Range;
use std::sync::LazyLock;

use crate::errors::CodecResult;

/// Concatenate string literals with "|", building a regex alternation.
///
/// ```rust
/// use bpe_codec::join_patterns;
///
/// assert_eq!(join_patterns!("a", "b", "c"), "a|b|c");
/// ```
#[macro_export]
macro_rules! join_patterns {
    ($first:literal $(, $rest:literal)* $(,)?) => {
        concat!($first $(, "|", $rest)*)
    };
}

/// The GPT-2 word pattern.
///
/// Alternatives, in priority order:
/// contractions, letter runs, digit runs, symbol runs (each with an optional
/// leading space), whitespace not followed by a non-space, any whitespace.
pub const GPT2_WORD_PATTERN: &str = join_patterns!(
    r"'s",
    r"'t",
    r"'re",
    r"'ve",
    r"'m",
    r"'ll",
    r"'d",
    r" ?\p{L}+",
    r" ?\p{N}+",
    r" ?[^\s\p{L}\p{N}]+",
    r"\s+(?!\S)",
    r"\s+",
);

static GPT2_PRE_TOKENIZER: LazyLock<Result<PreTokenizer, fancy_regex::Error>> =
    LazyLock::new(|| fancy_regex::Regex::new(GPT2_WORD_PATTERN).map(PreTokenizer::from));

/// Regex-driven text splitter.
///
/// Spans are produced leftmost-first, in input order. Text between matches
/// (which the GPT-2 pattern never leaves) is yielded as its own span,
/// so the concatenation of all spans is always the input text.
#[derive(Debug, Clone)]
pub struct PreTokenizer {
    regex: fancy_regex::Regex,
}

impl From<fancy_regex::Regex> for PreTokenizer {
    fn from(regex: fancy_regex::Regex) -> Self {
        Self { regex }
    }
}

impl PreTokenizer {
    /// Compile a pre-tokenizer from a word pattern.
    pub fn new(pattern: &str) -> CodecResult<Self> {
        Ok(fancy_regex::Regex::new(pattern)?.into())
    }

    /// The shared GPT-2 pre-tokenizer.
    pub fn gpt2() -> CodecResult<&'static PreTokenizer> {
        GPT2_PRE_TOKENIZER
            .as_ref()
            .map_err(|err| err.clone().into())
    }

    /// Get the underlying regex pattern.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Iterate over the spans of `text`.
    pub fn spans<'r, 't>(
        &'r self,
        text: &'t str,
    ) -> Spans<'r, 't> {
        Spans {
            text,
            matches: self.regex.find_iter(text),
            last_end: 0,
            pending: None,
            done: false,
        }
    }

    /// Collect the spans of `text`.
    pub fn split<'t>(
        &self,
        text: &'t str,
    ) -> CodecResult<Vec<&'t str>> {
        self.spans(text).collect()
    }
}

/// Iterator over the spans of a text; see [`PreTokenizer::spans`].
pub struct Spans<'r, 't> {
    text: &'t str,
    matches: fancy_regex::Matches<'r, 't>,
    last_end: usize,
    pending: Option<Range<usize>>,
    done: bool,
}

impl<'t> Iterator for Spans<'_, 't> {
    type Item = CodecResult<&'t str>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(range) = self.pending.take() {
            self.last_end = range.end;
            return Some(Ok(&self.text[range]));
        }

        while !self.done {
            match self.matches.next() {
                Some(Ok(m)) => {
                    if m.start() == m.end() {
                        continue;
                    }
                    if m.start() > self.last_end {
                        let gap = self.last_end..m.start();
                        self.last_end = m.start();
                        self.pending = Some(m.range());
                        return Some(Ok(&self.text[gap]));
                    }
                    self.last_end = m.end();
                    return Some(Ok(m.as_str()));
                }
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
                None => {
                    self.done = true;
                    if self.last_end < self.text.len() {
                        let tail = &self.text[self.last_end..];
                        self.last_end = self.text.len();
                        return Some(Ok(tail));
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gpt2_split(text: &str) -> Vec<&str> {
        PreTokenizer::gpt2().unwrap().split(text).unwrap()
    }

    #[test]
    fn test_gpt2_pattern_compiles() {
        let pre_tokenizer = PreTokenizer::gpt2().unwrap();
        assert_eq!(pre_tokenizer.as_str(), GPT2_WORD_PATTERN);
        assert!(PreTokenizer::new(GPT2_WORD_PATTERN).is_ok());
    }

    #[test]
    fn test_words_and_spaces() {
        assert_eq!(gpt2_split(""), Vec::<&str>::new());
        assert_eq!(gpt2_split("This is some text"), vec![
            "This", " is", " some", " text"
        ]);
        assert_eq!(gpt2_split("This is some text, This is some text"), vec![
            "This", " is", " some", " text", ",", " This", " is", " some", " text"
        ]);
    }

    #[test]
    fn test_contractions() {
        assert_eq!(gpt2_split("I'll don't we've"), vec![
            "I", "'ll", " don", "'t", " we", "'ve"
        ]);
        // Only lowercase contractions are special.
        assert_eq!(gpt2_split("DON'T"), vec!["DON", "'", "T"]);
    }

    #[test]
    fn test_numbers_and_symbols() {
        assert_eq!(gpt2_split("123 + 456 = 789"), vec![
            "123", " +", " 456", " =", " 789"
        ]);
        assert_eq!(gpt2_split("$$$!!!...---"), vec!["$$$!!!...---"]);
    }

    #[test]
    fn test_whitespace_runs() {
        // The last space of a run attaches to the following word.
        assert_eq!(gpt2_split("a   b"), vec!["a", "  ", " b"]);
        assert_eq!(gpt2_split("a\n\nb"), vec!["a", "\n", "\n", "b"]);
        assert_eq!(gpt2_split("trailing  "), vec!["trailing", "  "]);
        assert_eq!(gpt2_split(" "), vec![" "]);
        assert_eq!(gpt2_split("\t"), vec!["\t"]);
    }

    #[test]
    fn test_unicode_categories() {
        assert_eq!(gpt2_split("café naïve 你好"), vec!["café", " naïve", " 你好"]);
        assert_eq!(gpt2_split("x²٣"), vec!["x", "²٣"]);
        assert_eq!(gpt2_split("hello 👋 world"), vec!["hello", " 👋", " world"]);
    }

    #[test]
    fn test_gaps_are_kept() {
        let pre_tokenizer = PreTokenizer::new(r"\d+").unwrap();
        assert_eq!(pre_tokenizer.split("ab12cd3").unwrap(), vec![
            "ab", "12", "cd", "3"
        ]);
        assert_eq!(pre_tokenizer.split("12").unwrap(), vec!["12"]);
        assert_eq!(pre_tokenizer.split("ab").unwrap(), vec!["ab"]);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(PreTokenizer::new(r"(unclosed").is_err());
    }

    fn span_offset(
        text: &str,
        span: &str,
    ) -> usize {
        span.as_ptr() as usize - text.as_ptr() as usize
    }

    proptest::proptest! {
        #![proptest_config(proptest::prelude::ProptestConfig::with_cases(2000))]

        #[test]
        fn spans_cover_text(text in "\\PC{0,200}|[ \\t\\n\\r'a-zA-Z0-9]{0,60}") {
            let digits = PreTokenizer::new(r"\d+").unwrap();
            for pre_tokenizer in [PreTokenizer::gpt2().unwrap(), &digits] {
                let spans = pre_tokenizer.split(&text).unwrap();

                let mut end = 0;
                for (i, span) in spans.iter().enumerate() {
                    proptest::prop_assert!(!span.is_empty(), "empty span at index {}", i);
                    proptest::prop_assert_eq!(
                        span_offset(&text, span),
                        end,
                        "gap before span {}",
                        i
                    );
                    end += span.len();
                }
                proptest::prop_assert_eq!(end, text.len());
            }
        }
    }
}
