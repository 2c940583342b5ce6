use std::io::{BufRead, Write};

use bpe_codec::MergeCache;

use crate::{
    input_output::{InputArgs, OutputArgs},
    vocab_args::{FileCodec, VocabArgs},
};

/// Args for the encode command.
#[derive(clap::Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    vocab: VocabArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Clear the merge cache between chunks once it holds more pre-tokens.
    #[clap(long, default_value_t = 1 << 16)]
    cache_limit: usize,
}

impl EncodeArgs {
    /// Run the encode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let codec = self.vocab.load_codec()?;

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        let cache = MergeCache::new();
        run_encode(&codec, &cache, self.cache_limit, &mut reader, &mut writer)
    }
}

/// Can `chunk` be encoded apart from the `next` text without changing any span?
///
/// With the GPT-2 pattern, a lone `'\n'` between two non-whitespace chars
/// always forms its own span, so the text may be cut after it.
fn is_span_boundary(
    chunk: &str,
    next: &str,
) -> bool {
    let mut tail = chunk.chars().rev();
    tail.next() == Some('\n')
        && tail.next().is_some_and(|c| !c.is_whitespace())
        && next.chars().next().is_some_and(|c| !c.is_whitespace())
}

/// Encode all of `reader` to one line of space-separated ids.
///
/// Input is read line by line and encoded in chunks cut only at span
/// boundaries, so the ids match a single encode of the whole text.
/// `cache` is cleared between chunks once it holds more than
/// `cache_limit` pre-tokens.
pub fn run_encode(
    codec: &FileCodec,
    cache: &MergeCache,
    cache_limit: usize,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut chunk = String::new();
    let mut line = String::new();
    let mut written = 0usize;

    loop {
        line.clear();
        let eof = reader.read_line(&mut line)? == 0;

        if !chunk.is_empty() && (eof || is_span_boundary(&chunk, &line)) {
            let tokens: Vec<u32> = codec.encode_blocking(&chunk, Some(cache))?;
            for token in tokens {
                write!(writer, "{}{}", if written == 0 { "" } else { " " }, token)?;
                written += 1;
            }
            chunk.clear();

            if cache.len() > cache_limit {
                log::debug!("clearing merge cache of {} pre-tokens", cache.len());
                cache.clear();
            }
        }

        if eof {
            break;
        }
        chunk.push_str(&line);
    }

    writeln!(writer)?;
    writer.flush()?;

    log::debug!("encoded {written} tokens");
    Ok(())
}
