//! Huffman encoder (compression).

use crate::Symbol;
use crate::code::CodeTable;
use crate::config::{Container, HuffConfig};
use crate::format::{FRAME_HEADER_LEN, FrameHeader, MAX_TABLE_SIZE, write_table};
use crate::frequency::FrequencyMap;
use crate::stats::CompressionStats;
use std::fmt;
use std::io::Write;
use symhuff_core::bitstream::BitWriter;
use symhuff_core::crc::Crc32;
use symhuff_core::error::{HuffError, Result};

/// Packed code bits, most significant bit first, final byte zero-padded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitstream {
    bytes: Vec<u8>,
    bit_len: u64,
}

impl Bitstream {
    /// The packed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of meaningful bits, padding excluded.
    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Whether no bits were written.
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Take the packed bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Display for Bitstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.bit_len {
            let byte = self.bytes[(i / 8) as usize];
            let bit = if (byte >> (7 - i % 8)) & 1 == 1 { '1' } else { '0' };
            fmt::Write::write_char(f, bit)?;
        }
        Ok(())
    }
}

/// Translates symbols into their codes under a fixed table.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    table: &'a CodeTable,
}

impl<'a> Encoder<'a> {
    /// Create an encoder for `table`.
    pub fn new(table: &'a CodeTable) -> Self {
        Self { table }
    }

    /// Encode `symbols` in order.
    ///
    /// Fails with [`HuffError::UnknownSymbol`] at the first symbol that
    /// has no entry in the table.
    pub fn encode(&self, symbols: &[Symbol]) -> Result<Bitstream> {
        let mut writer = BitWriter::new(Vec::with_capacity(symbols.len() / 2 + 1));

        for &symbol in symbols {
            let code = self
                .table
                .get(symbol)
                .ok_or_else(|| HuffError::unknown_symbol(symbol))?;
            writer.write_bits(code.bits(), code.len())?;
        }

        let bit_len = writer.bits_written();
        let bytes = writer.finish()?;
        Ok(Bitstream { bytes, bit_len })
    }
}

/// Huffman encoder for whole symbol sequences.
///
/// Counts the input, builds the code table and writes the container
/// selected by its [`HuffConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffEncoder {
    config: HuffConfig,
}

impl HuffEncoder {
    /// Create a new encoder with the given configuration.
    pub fn new(config: HuffConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The encoder's configuration.
    pub fn config(&self) -> &HuffConfig {
        &self.config
    }

    /// Compress `symbols` into a new buffer.
    pub fn encode(&self, symbols: &[Symbol]) -> Result<Vec<u8>> {
        self.encode_with_stats(symbols).map(|(bytes, _)| bytes)
    }

    /// Compress `symbols` and report statistics about the result.
    pub fn encode_with_stats(&self, symbols: &[Symbol]) -> Result<(Vec<u8>, CompressionStats)> {
        let mut out = Vec::new();
        let stats = self.encode_to_writer(symbols, &mut out)?;
        Ok((out, stats))
    }

    /// Compress `symbols` into `writer`.
    ///
    /// Nothing is written if encoding fails before the output is complete
    /// in memory; only an I/O error can leave `writer` partially written.
    pub fn encode_to_writer<W: Write>(
        &self,
        symbols: &[Symbol],
        writer: &mut W,
    ) -> Result<CompressionStats> {
        let freqs = FrequencyMap::from_symbols(symbols);
        if freqs.len() > MAX_TABLE_SIZE {
            return Err(HuffError::TooManySymbols {
                count: freqs.len(),
                max: MAX_TABLE_SIZE,
            });
        }

        let table = if freqs.is_empty() {
            CodeTable::default()
        } else {
            CodeTable::from_frequencies(&freqs, self.config.max_code_length)?
        };
        log::debug!(
            "encoding {} symbols: {} distinct, longest code {} bits",
            symbols.len(),
            table.len(),
            table.max_code_length()
        );

        let bitstream = Encoder::new(&table).encode(symbols)?;

        let mut body = Vec::new();
        let table_bytes = write_table(&table, &mut body)?;
        body.extend_from_slice(bitstream.as_bytes());

        let header_len = match self.config.container {
            Container::Framed => {
                FrameHeader {
                    symbol_count: symbols.len() as u64,
                    bit_length: bitstream.bit_len(),
                    crc32: Crc32::compute(&body),
                }
                .write(writer)?;
                FRAME_HEADER_LEN
            }
            Container::Bare => 0,
        };
        writer.write_all(&body)?;

        let stats = CompressionStats {
            symbol_count: symbols.len() as u64,
            distinct_symbols: table.len(),
            encoded_bits: bitstream.bit_len(),
            table_bytes,
            total_bytes: header_len + body.len(),
            fixed_width_bits: if table.is_empty() {
                0
            } else {
                symbols.len() as u64 * CompressionStats::fixed_width(table.len()) as u64
            },
        };
        log::debug!(
            "wrote {:?} container: {} bytes ({} payload bits)",
            self.config.container,
            stats.total_bytes,
            stats.encoded_bits
        );

        Ok(stats)
    }
}
