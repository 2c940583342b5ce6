use std::io::Write;

use bpe_codec::io::minify_json;

use crate::input_output::{InputArgs, OutputArgs};

/// Args for the minify command.
#[derive(clap::Args, Debug)]
pub struct MinifyArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl MinifyArgs {
    /// Run the minify command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        minify_json(reader, &mut writer)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;

    #[test]
    fn test_minify_command() {
        let dir = TempDir::new("bpe_codec_cli").unwrap();
        let input = dir.path().join("encoder.json");
        let output = dir.path().join("encoder.min.json");
        std::fs::write(&input, "{\n  \"Ġhi\": 4,\n  \"h\": 71\n}\n").unwrap();

        MinifyArgs {
            input: InputArgs {
                input: Some(input.display().to_string()),
            },
            output: OutputArgs {
                output: Some(output.display().to_string()),
            },
        }
        .run()
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "{\"h\":71,\"Ġhi\":4}\n"
        );
    }
}
