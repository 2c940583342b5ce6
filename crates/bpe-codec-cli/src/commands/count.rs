use std::io::{Read, Write};

use crate::{
    input_output::{InputArgs, OutputArgs},
    vocab_args::{FileCodec, VocabArgs},
};

/// Args for the count command.
#[derive(clap::Args, Debug)]
pub struct CountArgs {
    #[command(flatten)]
    vocab: VocabArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl CountArgs {
    /// Run the count command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let codec = self.vocab.load_codec()?;

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        run_count(&codec, &mut reader, &mut writer)
    }
}

/// Write the token count of all of `reader`.
pub fn run_count(
    codec: &FileCodec,
    reader: &mut dyn Read,
    writer: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let count = codec.token_length_blocking(&text, None)?;
    writeln!(writer, "{count}")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::build_test_codec;

    #[test]
    fn test_run_count() {
        let codec = build_test_codec();

        let mut out = Vec::new();
        run_count(&codec, &mut "hi hi\nhi".as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "4\n");
    }
}
