use std::io::{BufRead, Write};

use crate::{
    input_output::{InputArgs, OutputArgs},
    vocab_args::{FileCodec, VocabArgs},
};

/// Args for the decode command.
#[derive(clap::Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    vocab: VocabArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl DecodeArgs {
    /// Run the decode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let codec = self.vocab.load_codec()?;

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        run_decode(&codec, &mut reader, &mut writer)
    }
}

/// Decode each line of ids in `reader`.
pub fn run_decode(
    codec: &FileCodec,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    for (idx, line) in reader.lines().enumerate() {
        let tokens = line?
            .split_whitespace()
            .map(|s| s.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| format!("line {}: {err}", idx + 1))?;

        let bytes = codec.decode_bytes_blocking(&tokens)?;

        writer.write_all(&bytes)?;
        writer.flush()?;
    }
    Ok(())
}
