//! # Merge List ("vocab.bpe") Reader

use std::io::BufRead;

use crate::{
    errors::{CodecError, CodecResult},
    lookup::PairRankMap,
};

/// Read a merge list.
///
/// The first line is a version marker, and is ignored; as are blank lines.
/// Every other line must hold exactly two whitespace-separated symbols.
///
/// ## Arguments
/// * `reader` - The merge list source.
///
/// ## Returns
/// * [`CodecError::Parse`] for a malformed line.
/// * [`CodecError::VocabConflict`] for a repeated pair.
pub fn read_merge_list<R: BufRead>(reader: R) -> CodecResult<PairRankMap> {
    let mut ranks = PairRankMap::default();

    for (idx, line) in reader.lines().enumerate().skip(1) {
        let line = line?;

        let mut symbols = line.split_whitespace();
        match (symbols.next(), symbols.next(), symbols.next()) {
            (None, _, _) => continue,
            (Some(first), Some(second), None) => {
                ranks.push_merge(first, second)?;
            }
            _ => {
                return Err(CodecError::Parse(format!(
                    "merge list line {}: expected two symbols, found {line:?}",
                    idx + 1
                )));
            }
        }
    }

    log::debug!("read {} merges", ranks.len());
    Ok(ranks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_merge_list() {
        let source = "#version: 0.2\nĠ t\nĠ a\nh e\r\n\nĠt he\n";
        let ranks = read_merge_list(source.as_bytes()).unwrap();

        assert_eq!(ranks.len(), 4);
        assert_eq!(ranks.get_rank("Ġ", "t"), Some(0));
        assert_eq!(ranks.get_rank("Ġ", "a"), Some(1));
        assert_eq!(ranks.get_rank("h", "e"), Some(2));
        assert_eq!(ranks.get_rank("Ġt", "he"), Some(3));
    }

    #[test]
    fn test_version_line_is_skipped() {
        // The first line is skipped even when it looks like a pair.
        let ranks = read_merge_list("a b\nc d\n".as_bytes()).unwrap();
        assert_eq!(ranks.len(), 1);
        assert_eq!(ranks.get_rank("a", "b"), None);
        assert_eq!(ranks.get_rank("c", "d"), Some(0));

        assert!(read_merge_list("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_lines() {
        let err = read_merge_list("#version\na b\nabc\n".as_bytes()).unwrap_err();
        match err {
            CodecError::Parse(msg) => assert!(msg.contains("line 3"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = read_merge_list("#version\na b c\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CodecError::Parse(_)));

        let err = read_merge_list("#version\na b\na b\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CodecError::VocabConflict(_)));
    }
}
