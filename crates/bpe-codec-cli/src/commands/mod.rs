use crate::commands::{
    count::CountArgs,
    decode::DecodeArgs,
    encode::EncodeArgs,
    minify::MinifyArgs,
};

pub mod count;
pub mod decode;
pub mod encode;
pub mod minify;

/// Subcommands for bpe-codec-cli
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Encode text to one line of ids.
    Encode(EncodeArgs),

    /// Decode lines of whitespace-separated ids.
    Decode(DecodeArgs),

    /// Count the tokens of the input.
    Count(CountArgs),

    /// Minify a JSON vocabulary asset.
    Minify(MinifyArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Encode(cmd) => cmd.run(),
            Commands::Decode(cmd) => cmd.run(),
            Commands::Count(cmd) => cmd.run(),
            Commands::Minify(cmd) => cmd.run(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use bpe_codec::{BpeCodec, CodecOptions};

    use crate::vocab_args::FileCodec;

    pub(crate) fn build_test_codec() -> FileCodec {
        let merges = "#version: 0.2\nh i\nĠ hi\nĊ Ċ\n";
        let mapping = r#"{"hi": 1, "Ġhi": 3, "Ċ": 4, "h": 5, "i": 6, "Ġ": 7, "ĊĊ": 8}"#;
        BpeCodec::from_readers(
            merges.as_bytes(),
            mapping.as_bytes(),
            CodecOptions::default(),
        )
        .unwrap()
    }
}
