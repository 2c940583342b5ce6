use std::{fs::File, io::BufReader};

use bpe_codec::{BpeCodec, CodecOptions, PairRankMap, TokenMapping};

/// The codec built from a pair of vocabulary assets.
pub type FileCodec = BpeCodec<PairRankMap, TokenMapping<u32>>;

/// Vocabulary asset arg group.
#[derive(clap::Args, Debug)]
pub struct VocabArgs {
    /// Path to the merge list ("vocab.bpe").
    #[clap(long)]
    pub merges: String,

    /// Path to the token mapping ("encoder.json").
    #[clap(long)]
    pub mapping: String,

    /// Await vocabulary lookups one at a time.
    #[clap(long)]
    pub sequential_lookups: bool,
}

impl VocabArgs {
    /// Load the codec.
    pub fn load_codec(&self) -> Result<FileCodec, Box<dyn std::error::Error>> {
        log::info!("loading merges: {}", self.merges);
        log::info!("loading mapping: {}", self.mapping);

        let options = CodecOptions::default().with_concurrent_lookups(!self.sequential_lookups);
        Ok(BpeCodec::from_readers(
            BufReader::new(File::open(&self.merges)?),
            BufReader::new(File::open(&self.mapping)?),
            options,
        )?)
    }
}
