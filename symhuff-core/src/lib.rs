//! # SymHuff Core
//!
//! Core components for the SymHuff Huffman codec.
//!
//! This crate provides the building blocks shared by the codec layer:
//!
//! - [`bitstream`]: MSB-first bit-level I/O for variable-length codes
//! - [`crc`]: CRC-32 checksum for the framed container
//! - [`error`]: Error types
//! - `mmap` (feature `mmap`): memory-mapped file input
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L2: Codec (symhuff-codec)                               │
//! │     Frequencies, tree, code table, container format    │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, CRC-32, errors                 │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use symhuff_core::bitstream::BitReader;
//! use symhuff_core::crc::Crc32;
//!
//! // Read bits from data, most significant bit first
//! let data = [0xAB, 0xCD];
//! let mut reader = BitReader::new(&data[..]);
//! assert_eq!(reader.read_bits(12).unwrap(), 0xABC);
//!
//! // Compute CRC-32
//! let crc = Crc32::compute(b"Hello, World!");
//! assert_eq!(crc, 0xEC4AC3D0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod crc;
pub mod error;
#[cfg(feature = "mmap")]
pub mod mmap;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use crc::Crc32;
pub use error::{HuffError, Result};
