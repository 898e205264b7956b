//! Bit-level I/O for Huffman bitstreams.
//!
//! This module provides `BitReader` and `BitWriter` for reading and writing
//! data at the bit level.
//!
//! # Bit Ordering
//!
//! SymHuff packs bits MSB-first (Most Significant Bit first): the first bit
//! of the stream is bit 7 of the first byte. When a multi-bit value is
//! written, its most significant bit goes out first, so a code written as
//! `write_bits(0b101, 3)` appears in the stream as `1`, `0`, `1`. A final
//! partial byte is padded with zeros in its low-order bits.
//!
//! # Example
//!
//! ```
//! use symhuff_core::bitstream::{BitReader, BitWriter};
//!
//! // Writing bits
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b1100, 4).unwrap();
//! let output = writer.finish().unwrap();
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! // Reading bits
//! let mut reader = BitReader::new(&output[..]);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{HuffError, Result};
use std::io::{ErrorKind, Read, Write};

/// A bit-level reader that wraps any `Read` implementation.
///
/// Bytes are pulled one at a time into a 64-bit buffer; bits are handed out
/// from the most significant end of each byte.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Bit buffer (MSB-first, valid bits are the low `bits_in_buffer` bits).
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume this `BitReader` and return the underlying reader.
    ///
    /// Bits already buffered but not consumed are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Get the total number of bits read so far, which is also the position
    /// of the next bit.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Pull one byte from the underlying reader into the buffer.
    ///
    /// Returns `false` on a clean end of input.
    fn pull_byte(&mut self) -> Result<bool> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(false),
                Ok(_) => {
                    self.buffer = (self.buffer << 8) | byte[0] as u64;
                    self.bits_in_buffer += 8;
                    return Ok(true);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Ensure at least `count` bits are available in the buffer.
    #[inline]
    fn fill_buffer(&mut self, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot fill more than 32 bits at once");

        while self.bits_in_buffer < count {
            if !self.pull_byte()? {
                let missing_bits = count - self.bits_in_buffer;
                return Err(HuffError::unexpected_eof(missing_bits.div_ceil(8) as usize));
            }
        }
        Ok(())
    }

    /// Read up to 32 bits from the stream.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of bits to read (0-32)
    ///
    /// # Returns
    ///
    /// The bits read as a u32, with the first bit read in the most
    /// significant of the returned `count` bits.
    #[inline]
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        if count == 0 {
            return Ok(0);
        }

        self.fill_buffer(count)?;

        let shift = self.bits_in_buffer - count;
        let mask = (1u64 << count).wrapping_sub(1);
        let result = ((self.buffer >> shift) & mask) as u32;

        self.bits_in_buffer -= count;
        self.buffer &= (1u64 << self.bits_in_buffer).wrapping_sub(1);
        self.total_bits_read += count as u64;

        Ok(result)
    }

    /// Read a single bit, failing at end of input.
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Read a single bit, returning `None` at a clean end of input.
    #[inline]
    pub fn try_read_bit(&mut self) -> Result<Option<bool>> {
        if self.bits_in_buffer == 0 && !self.pull_byte()? {
            return Ok(None);
        }
        self.read_bit().map(Some)
    }

    /// Discard the rest of the current byte.
    ///
    /// Returns the discarded bits, right-aligned. A stream written by
    /// [`BitWriter`] always yields zero here.
    pub fn align_to_byte(&mut self) -> u32 {
        let remainder = self.bits_in_buffer % 8;
        if remainder == 0 {
            return 0;
        }
        let shift = self.bits_in_buffer - remainder;
        let discarded = ((self.buffer >> shift) & ((1u64 << remainder) - 1)) as u32;
        self.bits_in_buffer -= remainder;
        self.buffer &= (1u64 << self.bits_in_buffer).wrapping_sub(1);
        self.total_bits_read += remainder as u64;
        discarded
    }

    /// Check if the reader is at end of stream.
    ///
    /// Note: This only checks if the buffer is empty and attempts one read.
    pub fn is_eof(&mut self) -> bool {
        if self.bits_in_buffer > 0 {
            return false;
        }
        !matches!(self.pull_byte(), Ok(true))
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// `BitWriter` accumulates bits in an internal buffer and writes complete
/// bytes to the underlying writer. Call [`BitWriter::finish`] (or
/// [`BitWriter::flush`]) when done so the final partial byte is padded and
/// written; dropping the writer without it loses up to 7 bits.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Bit buffer (MSB-first, valid bits are the low `bits_in_buffer` bits).
    buffer: u64,
    /// Number of bits in buffer.
    bits_in_buffer: u8,
    /// Total bits written, excluding padding.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get the total number of bits written so far (padding excluded).
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Write complete bytes from the buffer to the writer.
    #[inline]
    fn flush_bytes(&mut self) -> Result<()> {
        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.writer.write_all(&[byte])?;
            self.bits_in_buffer -= 8;
        }
        self.buffer &= (1u64 << self.bits_in_buffer).wrapping_sub(1);
        Ok(())
    }

    /// Write up to 32 bits to the stream.
    ///
    /// # Arguments
    ///
    /// * `value` - The bits to write; the most significant of the low
    ///   `count` bits is written first
    /// * `count` - Number of bits to write (0-32)
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        if count == 0 {
            return Ok(());
        }

        let mask = (1u64 << count) - 1;
        self.buffer = (self.buffer << count) | (value as u64 & mask);
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;

        self.flush_bytes()
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u32, 1)
    }

    /// Pad to byte boundary with zeros.
    pub fn align_to_byte(&mut self) -> Result<()> {
        let remainder = self.bits_in_buffer % 8;
        if remainder != 0 {
            let padding = 8 - remainder;
            self.buffer <<= padding;
            self.bits_in_buffer += padding;
            self.flush_bytes()?;
        }
        Ok(())
    }

    /// Flush any remaining bits to the underlying writer.
    ///
    /// If there are partial bits, they are padded with zeros to complete
    /// the final byte.
    pub fn flush(&mut self) -> Result<()> {
        self.align_to_byte()?;
        self.writer.flush()?;
        Ok(())
    }

    /// Flush the final partial byte and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_bitreader_basic() {
        // 0b10110101 = 0xB5
        let data = vec![0xB5];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.read_bits(1).unwrap(), 1); // MSB first
        assert_eq!(reader.read_bits(1).unwrap(), 0);
        assert_eq!(reader.read_bits(1).unwrap(), 1);
        assert_eq!(reader.read_bits(1).unwrap(), 1);
        assert_eq!(reader.read_bits(1).unwrap(), 0);
        assert_eq!(reader.read_bits(1).unwrap(), 1);
        assert_eq!(reader.read_bits(1).unwrap(), 0);
        assert_eq!(reader.read_bits(1).unwrap(), 1);
    }

    #[test]
    fn test_bitreader_multi_byte() {
        let data = vec![0xF0, 0x0F];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.read_bits(4).unwrap(), 0xF);
        assert_eq!(reader.read_bits(8).unwrap(), 0x00); // Crosses byte boundary
        assert_eq!(reader.read_bits(4).unwrap(), 0xF);
        assert_eq!(reader.bits_read(), 16);
    }

    #[test]
    fn test_bits_read_counts_aligned_bits() {
        let data = vec![0b1011_0000, 0xC0];
        let mut reader = BitReader::new(&data[..]);

        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.bits_read(), 3);
        assert_eq!(reader.align_to_byte(), 0b10000);
        assert_eq!(reader.bits_read(), 8);
        assert_eq!(reader.read_bits(4).unwrap(), 0xC);
        assert_eq!(reader.bits_read(), 12);
    }

    #[test]
    fn test_bitreader_32_bits() {
        let data = vec![0xDE, 0xAD, 0xBE, 0xEF, 0x80];
        let mut reader = BitReader::new(&data[..]);

        assert_eq!(reader.read_bits(1).unwrap(), 1);
        assert_eq!(reader.read_bits(32).unwrap(), 0xBD5B_7DDF);
        assert_eq!(reader.read_bits(7).unwrap(), 0);
    }

    #[test]
    fn test_try_read_bit_end() {
        let data = vec![0x80];
        let mut reader = BitReader::new(&data[..]);

        assert_eq!(reader.try_read_bit().unwrap(), Some(true));
        for _ in 0..7 {
            assert_eq!(reader.try_read_bit().unwrap(), Some(false));
        }
        assert_eq!(reader.try_read_bit().unwrap(), None);
        assert!(reader.is_eof());
    }

    #[test]
    fn test_read_past_end() {
        let data = vec![0xFF];
        let mut reader = BitReader::new(&data[..]);

        reader.read_bits(6).unwrap();
        let err = reader.read_bits(4).unwrap_err();
        assert!(matches!(err, HuffError::UnexpectedEof { expected: 1 }));
    }

    #[test]
    fn test_bitwriter_basic() {
        let mut writer = BitWriter::new(Vec::new());
        // Write 0b10110101 bit by bit
        for bit in [true, false, true, true, false, true, false, true] {
            writer.write_bit(bit).unwrap();
        }
        assert_eq!(writer.bits_written(), 8);
        assert_eq!(writer.finish().unwrap(), vec![0xB5]);
    }

    #[test]
    fn test_bitwriter_pads_low_bits() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b11001, 5).unwrap();
        writer.write_bits(0b1, 1).unwrap();
        assert_eq!(writer.bits_written(), 9);
        // 101_11001, then 1 followed by seven zero padding bits
        assert_eq!(writer.finish().unwrap(), vec![0xB9, 0x80]);
    }

    #[test]
    fn test_bitwriter_full_width() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0b1, 1).unwrap();
        writer.write_bits(u32::MAX, 32).unwrap();
        assert_eq!(
            writer.finish().unwrap(),
            vec![0xFF, 0xFF, 0xFF, 0xFF, 0x80]
        );
    }

    #[test]
    fn test_roundtrip() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b1111, 4).unwrap();
        writer.write_bits(0b10, 2).unwrap();
        writer.write_bits(0b110011, 6).unwrap();
        writer.write_bits(0x1234_5678, 32).unwrap();
        let output = writer.finish().unwrap();

        let mut reader = BitReader::new(Cursor::new(&output));
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1111);
        assert_eq!(reader.read_bits(2).unwrap(), 0b10);
        assert_eq!(reader.read_bits(6).unwrap(), 0b110011);
        assert_eq!(reader.read_bits(32).unwrap(), 0x1234_5678);
        assert_eq!(reader.align_to_byte(), 0);
        assert!(reader.is_eof());
    }

    #[test]
    fn test_align_to_byte() {
        let data = vec![0b1110_0101, 0xAA];
        let mut reader = BitReader::new(Cursor::new(data));

        reader.read_bits(3).unwrap(); // Read 3 bits
        assert_eq!(reader.align_to_byte(), 0b00101); // Skip remaining 5 bits
        assert_eq!(reader.read_bits(8).unwrap(), 0xAA);
    }
}
