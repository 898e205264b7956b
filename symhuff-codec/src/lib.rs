//! # SymHuff Codec: Static Huffman Coding for Integer Symbols
//!
//! This crate compresses sequences of `i32` symbols with a static Huffman
//! code and writes the code table alongside the packed bits, so the output
//! is self-describing.
//!
//! ## Pipeline
//!
//! ```text
//! encode: symbols ─► FrequencyMap ─► HuffmanTree ─► CodeTable ─► Encoder ─► container
//! decode: container ─► read_table ─► DecodeTable ─► Decoder ─► symbols
//! ```
//!
//! ## Containers
//!
//! - **Framed** (default): a 26-byte header with magic `SHUF`, the symbol
//!   count, the exact payload bit length and a CRC-32 of the body. Decoding
//!   is exact.
//! - **Bare**: code table followed directly by the payload. Padding bits in
//!   the last byte cannot be told apart from data, so extra symbols may be
//!   decoded when the table contains a short all-zero code.
//!
//! ## Code assignment
//!
//! Trees are built with a fixed tie-break (see [`tree`]), so a given input
//! always produces the same bytes.
//!
//! ## Example
//!
//! ```rust
//! use symhuff_codec::{compress, decompress};
//!
//! let symbols = [3, 3, 3, 7, 7, 2, 2, 2, 2, 9, 9, 6];
//!
//! let compressed = compress(&symbols).unwrap();
//! let decompressed = decompress(&compressed).unwrap();
//!
//! assert_eq!(decompressed, symbols);
//! ```
//!
//! ## Bare output
//!
//! ```rust
//! use symhuff_codec::{HuffConfig, compress_with, decompress_bare};
//!
//! let bytes = compress_with(&[5, 5, 5], &HuffConfig::BARE).unwrap();
//!
//! // table: 1 entry, symbol 5 -> "0"; payload "000" padded to one byte
//! assert_eq!(bytes, [1, 0, 5, 0, 0, 0, 1, 0, 0, 0, 0, 0]);
//!
//! // the five padding zeros decode as five more 5s
//! assert_eq!(decompress_bare(&bytes).unwrap(), [5; 8]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod code;
pub mod config;
pub mod decode;
pub mod encode;
pub mod format;
pub mod frequency;
pub mod stats;
pub mod tree;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub use code::{Code, CodeTable, DecodeTable};
pub use config::{Container, HuffConfig, MAX_CODE_LENGTH};
pub use decode::{Decoder, HuffDecoder};
pub use encode::{Bitstream, Encoder, HuffEncoder};
pub use format::{ContainerInfo, inspect};
pub use frequency::FrequencyMap;
pub use stats::CompressionStats;
pub use symhuff_core::error::{HuffError, Result};
pub use tree::HuffmanTree;

/// A symbol of the input alphabet.
pub type Symbol = i32;

/// Compress symbols into a framed container.
///
/// # Example
///
/// ```rust
/// use symhuff_codec::compress;
///
/// let bytes = compress(&[1, 2, 2, 3]).unwrap();
/// assert_eq!(&bytes[..4], b"SHUF");
/// ```
pub fn compress(symbols: &[Symbol]) -> Result<Vec<u8>> {
    compress_with(symbols, &HuffConfig::FRAMED)
}

/// Compress symbols with the given configuration.
pub fn compress_with(symbols: &[Symbol], config: &HuffConfig) -> Result<Vec<u8>> {
    HuffEncoder::new(*config)?.encode(symbols)
}

/// Decompress a framed or bare container.
///
/// Input starting with the `SHUF` magic is read as framed, anything else
/// as bare.
pub fn decompress(data: &[u8]) -> Result<Vec<Symbol>> {
    decompress_with(data, &HuffConfig::FRAMED)
}

/// Decompress with the given configuration.
///
/// The container is still detected from the input; the configuration
/// supplies the decoded symbol limit.
pub fn decompress_with(data: &[u8], config: &HuffConfig) -> Result<Vec<Symbol>> {
    HuffDecoder::new(*config)?.decode(data)
}

/// Decompress `data` as the bare layout.
///
/// Use this for captures whose table size and first entry happen to spell
/// the framed magic.
pub fn decompress_bare(data: &[u8]) -> Result<Vec<Symbol>> {
    HuffDecoder::default().decode_bare(data)
}

/// Compress symbols into a framed container at `path`.
pub fn compress_to_file<P: AsRef<Path>>(path: P, symbols: &[Symbol]) -> Result<CompressionStats> {
    compress_to_file_with(path, symbols, &HuffConfig::FRAMED)
}

/// Compress symbols into a file with the given configuration.
///
/// The file is created or truncated.
pub fn compress_to_file_with<P: AsRef<Path>>(
    path: P,
    symbols: &[Symbol],
    config: &HuffConfig,
) -> Result<CompressionStats> {
    let encoder = HuffEncoder::new(*config)?;
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    let stats = encoder.encode_to_writer(symbols, &mut writer)?;
    writer.flush()?;
    log::debug!("wrote {}", path.as_ref().display());
    Ok(stats)
}

/// Decompress the container stored at `path`.
#[cfg(not(feature = "mmap"))]
pub fn decompress_file<P: AsRef<Path>>(path: P) -> Result<Vec<Symbol>> {
    let data = std::fs::read(path)?;
    decompress(&data)
}

/// Decompress the container stored at `path`, reading it through a
/// memory map.
#[cfg(feature = "mmap")]
pub fn decompress_file<P: AsRef<Path>>(path: P) -> Result<Vec<Symbol>> {
    let mapped = symhuff_core::mmap::MappedFile::open(path)?;
    decompress(&mapped)
}
