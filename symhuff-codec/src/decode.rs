//! Huffman decoder (decompression).
//!
//! Bits are accumulated into a working code and looked up after every bit;
//! a match emits the symbol and clears the working code. Because the table
//! is prefix-free, the first match is the only possible one.
//!
//! The framed container states the exact payload bit length and symbol
//! count, so decoding stops precisely at the last symbol. The bare layout
//! carries neither: decoding runs to the end of input and any zero padding
//! in the final byte that happens to spell out a code is decoded as well.

use crate::Symbol;
use crate::code::DecodeTable;
use crate::config::HuffConfig;
use crate::format::{FrameHeader, is_framed, read_table};
use std::io::Read;
use symhuff_core::bitstream::BitReader;
use symhuff_core::crc::Crc32;
use symhuff_core::error::{HuffError, Result};

/// Bit-by-bit payload decoder over a [`DecodeTable`].
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    table: &'a DecodeTable,
    limit: u64,
}

impl<'a> Decoder<'a> {
    /// Create a decoder with no output limit.
    pub fn new(table: &'a DecodeTable) -> Self {
        Self {
            table,
            limit: u64::MAX,
        }
    }

    /// Cap the number of symbols a decode may produce.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Decode exactly `symbol_count` symbols spread over `bit_length` bits.
    ///
    /// `payload` must be exactly `ceil(bit_length / 8)` bytes and the bits
    /// after `bit_length` must be zero.
    pub fn decode_exact(
        &self,
        payload: &[u8],
        symbol_count: u64,
        bit_length: u64,
    ) -> Result<Vec<Symbol>> {
        if bit_length.div_ceil(8) != payload.len() as u64 {
            return Err(HuffError::corrupted(
                payload.len() as u64,
                format!(
                    "payload is {} bytes, header declares {} bits",
                    payload.len(),
                    bit_length
                ),
            ));
        }
        if symbol_count > self.limit {
            return Err(HuffError::LimitExceeded {
                count: symbol_count,
                limit: self.limit,
            });
        }
        // every code is at least one bit long
        if symbol_count > bit_length {
            return Err(HuffError::corrupted(
                0,
                format!(
                    "{} symbols cannot fit in {} bits",
                    symbol_count, bit_length
                ),
            ));
        }

        let mut output = Vec::with_capacity(symbol_count as usize);
        let mut reader = BitReader::new(payload);
        let mut bits = 0u32;
        let mut len = 0u8;

        for _ in 0..bit_length {
            bits = (bits << 1) | reader.read_bit()? as u32;
            len += 1;

            if let Some(symbol) = self.table.lookup(bits, len) {
                if output.len() as u64 == symbol_count {
                    return Err(HuffError::corrupted(
                        reader.bits_read() / 8,
                        format!("more than {} symbols in payload", symbol_count),
                    ));
                }
                output.push(symbol);
                bits = 0;
                len = 0;
            } else if len >= self.table.max_len() {
                return Err(HuffError::invalid_code(reader.bits_read() - len as u64));
            }
        }

        if len != 0 || output.len() as u64 != symbol_count {
            return Err(HuffError::trailing_bits(
                len,
                output.len() as u64,
                Some(symbol_count),
            ));
        }

        if reader.align_to_byte() != 0 {
            return Err(HuffError::corrupted(
                payload.len().saturating_sub(1) as u64,
                "non-zero padding bits",
            ));
        }

        Ok(output)
    }

    /// Decode until `payload` is exhausted.
    ///
    /// A residual of fewer than 8 zero bits is taken as padding; any other
    /// residual fails with [`HuffError::AmbiguousTrailingBits`].
    pub fn decode_greedy(&self, payload: &[u8]) -> Result<Vec<Symbol>> {
        if let Some(code) = self.table.zero_code().filter(|code| code.len() < 8) {
            log::warn!(
                "bare decode with all-zero code {}: padding may decode as extra symbols",
                code
            );
        }

        let mut output = Vec::new();
        let mut reader = BitReader::new(payload);
        let mut bits = 0u32;
        let mut len = 0u8;

        while let Some(bit) = reader.try_read_bit()? {
            bits = (bits << 1) | bit as u32;
            len += 1;

            if let Some(symbol) = self.table.lookup(bits, len) {
                if output.len() as u64 >= self.limit {
                    return Err(HuffError::LimitExceeded {
                        count: self.limit.saturating_add(1),
                        limit: self.limit,
                    });
                }
                output.push(symbol);
                bits = 0;
                len = 0;
            } else if len >= self.table.max_len() {
                return Err(HuffError::invalid_code(reader.bits_read() - len as u64));
            }
        }

        if len > 0 {
            if len < 8 && bits == 0 {
                log::debug!("accepted {} zero bits as padding", len);
            } else {
                return Err(HuffError::trailing_bits(len, output.len() as u64, None));
            }
        }

        Ok(output)
    }
}

/// Huffman decoder for complete containers.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffDecoder {
    config: HuffConfig,
}

impl HuffDecoder {
    /// Create a new decoder with the given configuration.
    pub fn new(config: HuffConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The decoder's configuration.
    pub fn config(&self) -> &HuffConfig {
        &self.config
    }

    /// Decode a container, detecting framed or bare layout from its first
    /// bytes.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<Symbol>> {
        if is_framed(data) {
            self.decode_framed(data)
        } else {
            self.decode_bare(data)
        }
    }

    /// Decode `data` as the bare layout, even if it starts with the framed
    /// magic.
    pub fn decode_bare(&self, data: &[u8]) -> Result<Vec<Symbol>> {
        let mut cursor = data;
        let table = read_table(&mut cursor)?.decode_table();
        log::debug!("decoding bare container: {} payload bytes", cursor.len());

        Decoder::new(&table)
            .with_limit(self.config.max_decoded_symbols)
            .decode_greedy(cursor)
    }

    /// Read all of `reader` and decode it.
    pub fn decode_from_reader<R: Read>(&self, reader: &mut R) -> Result<Vec<Symbol>> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.decode(&data)
    }

    fn decode_framed(&self, data: &[u8]) -> Result<Vec<Symbol>> {
        let mut cursor = data;
        let header = FrameHeader::read(&mut cursor)?;

        let computed = Crc32::compute(cursor);
        if computed != header.crc32 {
            return Err(HuffError::checksum_mismatch(header.crc32, computed));
        }

        let table = read_table(&mut cursor)?.decode_table();
        log::debug!(
            "decoding framed container: {} symbols in {} bits",
            header.symbol_count,
            header.bit_length
        );

        Decoder::new(&table)
            .with_limit(self.config.max_decoded_symbols)
            .decode_exact(cursor, header.symbol_count, header.bit_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Code, CodeTable};
    use crate::encode::HuffEncoder;
    use crate::frequency::FrequencyMap;

    const SCENARIO: [Symbol; 12] = [3, 3, 3, 7, 7, 2, 2, 2, 2, 9, 9, 6];
    const PAYLOAD: [u8; 4] = [0x56, 0xDF, 0xF0, 0x80];

    fn scenario_table() -> DecodeTable {
        CodeTable::from_frequencies(&FrequencyMap::from_symbols(&SCENARIO), 32)
            .unwrap()
            .decode_table()
    }

    #[test]
    fn test_decode_exact() {
        let table = scenario_table();
        let decoded = Decoder::new(&table).decode_exact(&PAYLOAD, 12, 27).unwrap();
        assert_eq!(decoded, SCENARIO);
    }

    #[test]
    fn test_decode_greedy_includes_padding_symbols() {
        let table = scenario_table();
        let decoded = Decoder::new(&table).decode_greedy(&PAYLOAD).unwrap();

        // five zero padding bits read as "00" "00" plus one leftover zero
        let mut expected = SCENARIO.to_vec();
        expected.extend([9, 9]);
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_decode_exact_wrong_count() {
        let table = scenario_table();
        let err = Decoder::new(&table)
            .decode_exact(&PAYLOAD, 13, 27)
            .unwrap_err();
        assert!(matches!(
            err,
            HuffError::AmbiguousTrailingBits {
                residual_bits: 0,
                decoded: 12,
                expected: Some(13),
            }
        ));

        let err = Decoder::new(&table)
            .decode_exact(&PAYLOAD, 11, 27)
            .unwrap_err();
        assert!(matches!(err, HuffError::CorruptedData { .. }));
    }

    #[test]
    fn test_decode_exact_residual_bits() {
        let table = scenario_table();
        // stop one bit into the final "100"
        let err = Decoder::new(&table)
            .decode_exact(&PAYLOAD, 12, 25)
            .unwrap_err();
        assert!(matches!(
            err,
            HuffError::AmbiguousTrailingBits {
                residual_bits: 1,
                decoded: 11,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_exact_payload_size() {
        let table = scenario_table();
        let err = Decoder::new(&table)
            .decode_exact(&PAYLOAD[..3], 12, 27)
            .unwrap_err();
        assert!(matches!(err, HuffError::CorruptedData { .. }));
    }

    #[test]
    fn test_decode_exact_nonzero_padding() {
        let table = scenario_table();
        let payload = [0x56, 0xDF, 0xF0, 0x81];
        let err = Decoder::new(&table)
            .decode_exact(&payload, 12, 27)
            .unwrap_err();
        assert!(matches!(err, HuffError::CorruptedData { .. }));
    }

    #[test]
    fn test_decode_limit() {
        let table = scenario_table();
        let err = Decoder::new(&table)
            .with_limit(5)
            .decode_exact(&PAYLOAD, 12, 27)
            .unwrap_err();
        assert!(matches!(err, HuffError::LimitExceeded { count: 12, limit: 5 }));

        let err = Decoder::new(&table)
            .with_limit(5)
            .decode_greedy(&PAYLOAD)
            .unwrap_err();
        assert!(matches!(err, HuffError::LimitExceeded { limit: 5, .. }));
    }

    #[test]
    fn test_decode_greedy_trailing_bits() {
        // 3 -> "0", 4 -> "10", 5 -> "110", 6 -> "111"
        let table = CodeTable::from_frequencies(
            &[(3, 4), (4, 2), (5, 1), (6, 1)].into_iter().collect(),
            32,
        )
        .unwrap();
        assert_eq!(table.get(6).unwrap().to_bit_string(), "111");
        let decode = table.decode_table();

        assert_eq!(
            Decoder::new(&decode).decode_greedy(&[0b1011_0111]).unwrap(),
            vec![4, 5, 3, 6]
        );

        let err = Decoder::new(&decode)
            .decode_greedy(&[0b0000_0011])
            .unwrap_err();
        assert!(matches!(
            err,
            HuffError::AmbiguousTrailingBits {
                residual_bits: 2,
                decoded: 6,
                expected: None,
            }
        ));
    }

    #[test]
    fn test_invalid_code() {
        // only "0" and "10" exist; "11" can never match
        let table = CodeTable::from_entries([
            (1, Code::new(0b0, 1).unwrap()),
            (2, Code::new(0b10, 2).unwrap()),
        ])
        .unwrap()
        .decode_table();

        let err = Decoder::new(&table)
            .decode_greedy(&[0b0110_0000])
            .unwrap_err();
        assert!(matches!(err, HuffError::InvalidCode { bit_position: 1 }));

        let err = Decoder::new(&table)
            .decode_exact(&[0b1100_0000], 1, 2)
            .unwrap_err();
        assert!(matches!(err, HuffError::InvalidCode { bit_position: 0 }));
    }

    #[test]
    fn test_empty_table_with_bits() {
        let table = CodeTable::default().decode_table();
        let err = Decoder::new(&table).decode_greedy(&[0x80]).unwrap_err();
        assert!(matches!(err, HuffError::InvalidCode { bit_position: 0 }));
    }

    #[test]
    fn test_huff_decoder_auto_detect() {
        let framed = HuffEncoder::default().encode(&SCENARIO).unwrap();
        let bare = HuffEncoder::new(HuffConfig::BARE)
            .unwrap()
            .encode(&SCENARIO)
            .unwrap();

        let decoder = HuffDecoder::default();
        assert_eq!(decoder.decode(&framed).unwrap(), SCENARIO);
        assert_eq!(decoder.decode(&bare).unwrap().len(), 14);
        assert_eq!(
            decoder.decode_from_reader(&mut &framed[..]).unwrap(),
            SCENARIO
        );
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut framed = HuffEncoder::default().encode(&SCENARIO).unwrap();
        let last = framed.len() - 1;
        framed[last] ^= 0x01;

        let err = HuffDecoder::default().decode(&framed).unwrap_err();
        assert!(matches!(err, HuffError::ChecksumMismatch { .. }));
    }
}
