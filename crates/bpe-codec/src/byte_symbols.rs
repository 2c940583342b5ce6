//! # Byte/Symbol Bijection Table
//!
//! Byte-level BPE merges operate on strings; but not every byte is a
//! printable (or even valid) character. Every byte is therefore assigned a
//! printable stand-in symbol:
//!
//! * the visible ISO/IEC 8859-1 ranges `[0x21-0x7E]`, `[0xA1-0xAC]`, `[0xAE-0xFF]`
//!   stand for themselves;
//! * the remaining 68 bytes (controls, space, NBSP, soft hyphen) are assigned
//!   `U+0100..U+0143`, in ascending byte order.
//!
//! No symbol is whitespace, so a space can safely join symbols.

use crate::errors::{CodecError, CodecResult};

/// The number of bytes without a printable ISO/IEC 8859-1 form.
const SPARE_BYTE_COUNT: usize = 68;

/// The first codepoint assigned to a spare byte.
const SPARE_SYMBOL_BASE: u32 = 0x100;

const fn is_printable_byte(byte: u8) -> bool {
    matches!(byte, 0x21..=0x7E | 0xA1..=0xAC | 0xAE..=0xFF)
}

/// ``0..=255`` Byte/Symbol Bijection Table.
///
/// The table is computed at compile time, and is identical for every
/// vocabulary; use the shared [`BYTE_SYMBOLS`] instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteSymbolTable {
    /// Table mapping from byte ordinal (position) to symbol.
    byte_symbols: [char; 256],

    /// Table mapping from `symbol - U+0100` to byte.
    spare_bytes: [u8; SPARE_BYTE_COUNT],
}

/// The process-wide byte/symbol table.
pub static BYTE_SYMBOLS: ByteSymbolTable = ByteSymbolTable::new();

impl Default for ByteSymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSymbolTable {
    /// Build the table.
    pub const fn new() -> Self {
        let mut byte_symbols = ['\0'; 256];
        let mut spare_bytes = [0u8; SPARE_BYTE_COUNT];

        let mut n = 0;
        let mut idx = 0;
        while idx < 256 {
            let byte = idx as u8;
            byte_symbols[idx] = if is_printable_byte(byte) {
                byte as char
            } else {
                spare_bytes[n] = byte;
                n += 1;
                match char::from_u32(SPARE_SYMBOL_BASE + (n as u32) - 1) {
                    Some(c) => c,
                    None => panic!("spare symbol out of range"),
                }
            };
            idx += 1;
        }
        assert!(n == SPARE_BYTE_COUNT);

        Self {
            byte_symbols,
            spare_bytes,
        }
    }

    /// Get the byte-ord => symbol mapping table.
    pub fn byte_symbols(&self) -> &[char; 256] {
        &self.byte_symbols
    }

    /// Get the symbol standing for a byte.
    #[inline(always)]
    pub fn get_symbol(
        &self,
        byte: u8,
    ) -> char {
        self.byte_symbols[byte as usize]
    }

    /// Get the byte a symbol stands for, if any.
    #[inline(always)]
    pub fn get_byte(
        &self,
        symbol: char,
    ) -> Option<u8> {
        let cp = symbol as u32;
        if cp < SPARE_SYMBOL_BASE {
            let byte = cp as u8;
            return is_printable_byte(byte).then_some(byte);
        }
        self.spare_bytes
            .get((cp - SPARE_SYMBOL_BASE) as usize)
            .copied()
    }

    /// Append the symbols for `bytes` to a target string.
    ///
    /// ## Arguments
    /// * `bytes` - The slice of bytes to translate and append.
    /// * `buf` - The target string.
    pub fn append_symbols(
        &self,
        bytes: &[u8],
        buf: &mut String,
    ) {
        buf.extend(bytes.iter().map(|&b| self.get_symbol(b)));
    }

    /// Translate `bytes` to a symbol string.
    pub fn encode_bytes(
        &self,
        bytes: &[u8],
    ) -> String {
        let mut buf = String::with_capacity(bytes.len() * 2);
        self.append_symbols(bytes, &mut buf);
        buf
    }

    /// Append the bytes for a symbol string to a target buffer.
    ///
    /// ## Arguments
    /// * `symbols` - The symbol string to translate.
    /// * `buf` - The target byte buffer.
    ///
    /// ## Returns
    /// [`CodecError::UnmappedSymbol`] on the first character outside the table.
    pub fn append_bytes(
        &self,
        symbols: &str,
        buf: &mut Vec<u8>,
    ) -> CodecResult<()> {
        buf.reserve(symbols.len());
        for symbol in symbols.chars() {
            let byte = self
                .get_byte(symbol)
                .ok_or(CodecError::UnmappedSymbol { symbol })?;
            buf.push(byte);
        }
        Ok(())
    }

    /// Translate a symbol string back to bytes.
    pub fn decode_symbols(
        &self,
        symbols: &str,
    ) -> CodecResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(symbols.len());
        self.append_bytes(symbols, &mut buf)?;
        Ok(buf)
    }
}
