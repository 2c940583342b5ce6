//! # Token Mapping ("encoder.json") Reader

use std::io::{Read, Write};

use serde_json::{Map, Value};

use crate::{
    errors::{CodecError, CodecResult},
    lookup::TokenMapping,
    types::TokenType,
};

/// Read a flat JSON `{ subword: id }` token mapping.
///
/// ## Arguments
/// * `reader` - The JSON source.
///
/// ## Returns
/// * [`CodecError::Parse`] if the source is not a flat object of ids
///   representable as `T`.
/// * [`CodecError::VocabConflict`] if two subwords share an id.
pub fn read_token_mapping<T, R>(reader: R) -> CodecResult<TokenMapping<T>>
where
    T: TokenType,
    R: Read,
{
    let entries: Map<String, Value> = serde_json::from_reader(reader)?;

    let mut mapping = TokenMapping::with_capacity(entries.len());
    for (symbol, value) in entries {
        let token = value.as_u64().and_then(T::from_u64).ok_or_else(|| {
            CodecError::Parse(format!("invalid token id for {symbol:?}: {value}"))
        })?;
        mapping.insert(symbol, token)?;
    }

    let missing = mapping.missing_byte_symbols();
    if !missing.is_empty() {
        log::warn!(
            "token mapping lacks {} single-byte symbols; inputs using them will fail to encode",
            missing.len()
        );
    }

    log::debug!("read token mapping with {} entries", mapping.len());
    Ok(mapping)
}

/// Re-serialize a JSON document without insignificant whitespace.
///
/// Object keys are written in sorted order.
pub fn minify_json<R, W>(
    reader: R,
    writer: W,
) -> CodecResult<()>
where
    R: Read,
    W: Write,
{
    let value: Value = serde_json::from_reader(reader)?;
    serde_json::to_writer(writer, &value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs::File, io::BufReader};

    use tempdir::TempDir;

    use super::*;

    #[test]
    fn test_read_token_mapping() {
        type T = u32;
        let source = r#"{"!": 0, "Ġ": 220, "Ġthe": 262, "constructor": 41571}"#;
        let mapping: TokenMapping<T> = read_token_mapping(source.as_bytes()).unwrap();

        assert_eq!(mapping.len(), 4);
        assert_eq!(mapping.get_token("Ġ"), Some(220));
        assert_eq!(mapping.get_token("constructor"), Some(41571));
        assert_eq!(mapping.get_symbol(262), Some("Ġthe"));
    }

    #[test]
    fn test_invalid_token_mappings() {
        type T = u16;

        for source in [
            r#"["a", "b"]"#,
            r#"{"a": -1}"#,
            r#"{"a": "1"}"#,
            r#"{"a": 1.5}"#,
            r#"{"a": 70000}"#,
            r#"{"a": 1"#,
        ] {
            let result = read_token_mapping::<T, _>(source.as_bytes());
            assert!(
                matches!(result, Err(CodecError::Parse(_))),
                "{source}: {result:?}"
            );
        }

        let result = read_token_mapping::<T, _>(r#"{"a": 1, "b": 1}"#.as_bytes());
        assert!(matches!(result, Err(CodecError::VocabConflict(_))));
    }

    #[test]
    fn test_minify_json() {
        let source = "{\n  \"b\": 2,\n  \"a\": [1, 2,\n 3]\n}\n";
        let mut out = Vec::new();
        minify_json(source.as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), r#"{"a":[1,2,3],"b":2}"#);

        assert!(minify_json("{".as_bytes(), Vec::new()).is_err());
    }

    #[test]
    fn test_read_token_mapping_file() {
        type T = u32;
        let dir = TempDir::new("bpe_codec_io").unwrap();
        let path = dir.path().join("encoder.json");

        let mut minified = Vec::new();
        minify_json(r#"{ "a": 0, "Ġa": 1 }"#.as_bytes(), &mut minified).unwrap();
        std::fs::write(&path, &minified).unwrap();

        let reader = BufReader::new(File::open(&path).unwrap());
        let mapping: TokenMapping<T> = read_token_mapping(reader).unwrap();
        assert_eq!(mapping.get_token("Ġa"), Some(1));
    }
}
