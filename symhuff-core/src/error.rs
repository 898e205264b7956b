//! Error types for SymHuff operations.
//!
//! Every failure the encoder or decoder can hit is a variant of
//! [`HuffError`]. None of them are fatal: they are returned to the caller,
//! and retrying with the same input yields the same error.

use std::io;
use thiserror::Error;

/// The main error type for SymHuff operations.
#[derive(Debug, Error)]
pub enum HuffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A symbol was submitted for encoding that has no code table entry.
    #[error("Unknown symbol {symbol}: no entry in code table")]
    UnknownSymbol {
        /// The symbol that could not be encoded.
        symbol: i32,
    },

    /// A generated code is longer than the wire format allows.
    #[error("Code for symbol {symbol} is {length} bits long, maximum is {max}")]
    CodeTooLong {
        /// Symbol whose code overflowed.
        symbol: i32,
        /// Length the code would have had.
        length: usize,
        /// Maximum allowed code length.
        max: u8,
    },

    /// Serialized code table is inconsistent.
    #[error("Malformed code table: {message}")]
    MalformedTable {
        /// Description of the inconsistency.
        message: String,
    },

    /// Non-empty residual bits at end of stream that match no code.
    #[error("Ambiguous trailing bits: {residual_bits} residual bits after {decoded} symbols")]
    AmbiguousTrailingBits {
        /// Number of bits left in the working buffer.
        residual_bits: u8,
        /// Symbols decoded before the stream ended.
        decoded: u64,
        /// Symbols the header announced (framed container only).
        expected: Option<u64>,
    },

    /// Accumulated bits grew past the longest code without a match.
    #[error("Invalid Huffman code at bit position {bit_position}")]
    InvalidCode {
        /// Bit position where the invalid code was found.
        bit_position: u64,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: expected {expected} more bytes")]
    UnexpectedEof {
        /// Number of bytes that were expected but not available.
        expected: usize,
    },

    /// Invalid magic number in framed header.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// Framed header carries a version or flag set this crate cannot read.
    #[error("Unsupported format version {version} (flags {flags:#04x})")]
    UnsupportedVersion {
        /// Version byte from the header.
        version: u8,
        /// Flags byte from the header.
        flags: u8,
    },

    /// CRC-32 checksum mismatch.
    #[error("Checksum mismatch: expected {expected:#010x}, computed {computed:#010x}")]
    ChecksumMismatch {
        /// Expected CRC value from the header.
        expected: u32,
        /// Computed CRC value from data.
        computed: u32,
    },

    /// Payload inconsistent with the header.
    #[error("Corrupted data at offset {offset}: {message}")]
    CorruptedData {
        /// Byte offset where corruption was detected.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// A tree was requested for an empty frequency map.
    #[error("Cannot build a Huffman tree from an empty alphabet")]
    EmptyAlphabet,

    /// The alphabet does not fit the 16-bit table size field.
    #[error("Too many distinct symbols: {count} (maximum {max})")]
    TooManySymbols {
        /// Number of distinct symbols.
        count: usize,
        /// Maximum the format can represent.
        max: usize,
    },

    /// Decoding would produce more symbols than allowed.
    #[error("Decoded symbol limit exceeded: {count} > {limit}")]
    LimitExceeded {
        /// Number of symbols requested or produced.
        count: u64,
        /// Configured limit.
        limit: u64,
    },

    /// Configuration value out of range.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the bad setting.
        message: String,
    },
}

/// Result type alias for SymHuff operations.
pub type Result<T> = std::result::Result<T, HuffError>;

impl HuffError {
    /// Create an unknown symbol error.
    pub fn unknown_symbol(symbol: i32) -> Self {
        Self::UnknownSymbol { symbol }
    }

    /// Create a code too long error.
    pub fn code_too_long(symbol: i32, length: usize, max: u8) -> Self {
        Self::CodeTooLong {
            symbol,
            length,
            max,
        }
    }

    /// Create a malformed table error.
    pub fn malformed_table(message: impl Into<String>) -> Self {
        Self::MalformedTable {
            message: message.into(),
        }
    }

    /// Create an ambiguous trailing bits error.
    pub fn trailing_bits(residual_bits: u8, decoded: u64, expected: Option<u64>) -> Self {
        Self::AmbiguousTrailingBits {
            residual_bits,
            decoded,
            expected,
        }
    }

    /// Create an invalid code error.
    pub fn invalid_code(bit_position: u64) -> Self {
        Self::InvalidCode { bit_position }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a checksum mismatch error.
    pub fn checksum_mismatch(expected: u32, computed: u32) -> Self {
        Self::ChecksumMismatch { expected, computed }
    }

    /// Create a corrupted data error.
    pub fn corrupted(offset: u64, message: impl Into<String>) -> Self {
        Self::CorruptedData {
            offset,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
