//! Container layouts and code table serialization.
//!
//! # Bare layout
//!
//! ```text
//! +--------+=====================+===========+
//! | u16 n  | n table entries     | payload   |
//! +--------+=====================+===========+
//! entry: i32 symbol | u8 length | u32 pattern   (9 bytes)
//! ```
//!
//! # Framed layout
//!
//! ```text
//! +------+---+---+--------+--------+-------+=============+
//! |"SHUF"|ver|flg| u64 n  | u64 b  | crc32 | bare layout |
//! +------+---+---+--------+--------+-------+=============+
//! ```
//!
//! - `n`: number of encoded symbols
//! - `b`: exact payload length in bits
//! - `crc32`: CRC-32 of everything after the header
//!
//! All integers are little-endian. Entries are written in ascending symbol
//! order. The payload is packed most significant bit first and the final
//! byte is padded with zero bits.

use crate::Symbol;
use crate::code::{Code, CodeTable};
use crate::config::Container;
use std::io::{self, Read, Write};
use symhuff_core::error::{HuffError, Result};

/// Magic bytes opening a framed container.
pub const MAGIC: [u8; 4] = *b"SHUF";

/// Framed container version written by this crate.
pub const FORMAT_VERSION: u8 = 1;

/// Size of the framed header in bytes.
pub const FRAME_HEADER_LEN: usize = 26;

/// Size of one serialized table entry in bytes.
pub const TABLE_ENTRY_LEN: usize = 9;

/// Largest number of entries the 16-bit size field can describe.
pub const MAX_TABLE_SIZE: usize = u16::MAX as usize;

/// Header of a framed container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Number of symbols encoded in the payload.
    pub symbol_count: u64,
    /// Exact payload length in bits, padding excluded.
    pub bit_length: u64,
    /// CRC-32 of the bare body that follows the header.
    pub crc32: u32,
}

impl FrameHeader {
    /// Number of payload bytes implied by `bit_length`.
    pub fn payload_len(&self) -> u64 {
        self.bit_length.div_ceil(8)
    }

    /// Write the header to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut buf = [0u8; FRAME_HEADER_LEN];
        buf[0..4].copy_from_slice(&MAGIC);
        buf[4] = FORMAT_VERSION;
        buf[5] = 0;
        buf[6..14].copy_from_slice(&self.symbol_count.to_le_bytes());
        buf[14..22].copy_from_slice(&self.bit_length.to_le_bytes());
        buf[22..26].copy_from_slice(&self.crc32.to_le_bytes());
        writer.write_all(&buf)?;
        Ok(())
    }

    /// Read a framed header from a reader.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut magic = [0u8; 4];
        read_fully(reader, &mut magic)?;
        if magic != MAGIC {
            return Err(HuffError::invalid_magic(MAGIC.to_vec(), magic.to_vec()));
        }

        let mut buf = [0u8; FRAME_HEADER_LEN - 4];
        read_fully(reader, &mut buf)?;

        let version = buf[0];
        let flags = buf[1];
        if version != FORMAT_VERSION || flags != 0 {
            return Err(HuffError::UnsupportedVersion { version, flags });
        }

        let symbol_count = u64::from_le_bytes([
            buf[2], buf[3], buf[4], buf[5], buf[6], buf[7], buf[8], buf[9],
        ]);
        let bit_length = u64::from_le_bytes([
            buf[10], buf[11], buf[12], buf[13], buf[14], buf[15], buf[16], buf[17],
        ]);
        let crc32 = u32::from_le_bytes([buf[18], buf[19], buf[20], buf[21]]);

        Ok(Self {
            symbol_count,
            bit_length,
            crc32,
        })
    }
}

/// Fill `buf` completely, reporting a short read as
/// [`HuffError::UnexpectedEof`] with the number of missing bytes.
fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => return Err(HuffError::unexpected_eof(buf.len() - filled)),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Whether `data` starts with the framed container magic.
pub fn is_framed(data: &[u8]) -> bool {
    data.starts_with(&MAGIC)
}

/// Serialized size of a table with `entries` entries.
pub fn table_len(entries: usize) -> usize {
    2 + entries * TABLE_ENTRY_LEN
}

/// Write a code table. Returns the number of bytes written.
pub fn write_table<W: Write>(table: &CodeTable, writer: &mut W) -> Result<usize> {
    if table.len() > MAX_TABLE_SIZE {
        return Err(HuffError::TooManySymbols {
            count: table.len(),
            max: MAX_TABLE_SIZE,
        });
    }

    let mut buf = Vec::with_capacity(table_len(table.len()));
    buf.extend_from_slice(&(table.len() as u16).to_le_bytes());
    for (symbol, code) in table.iter() {
        buf.extend_from_slice(&symbol.to_le_bytes());
        buf.push(code.len());
        buf.extend_from_slice(&code.bits().to_le_bytes());
    }
    writer.write_all(&buf)?;
    Ok(buf.len())
}

/// Read and validate a code table.
pub fn read_table<R: Read>(reader: &mut R) -> Result<CodeTable> {
    let mut size = [0u8; 2];
    read_fully(reader, &mut size)?;
    let count = u16::from_le_bytes(size) as usize;

    let mut entries: Vec<(Symbol, Code)> = Vec::with_capacity(count);
    let mut entry = [0u8; TABLE_ENTRY_LEN];
    for index in 0..count {
        match read_fully(reader, &mut entry) {
            Ok(()) => {}
            Err(HuffError::UnexpectedEof { .. }) => {
                return Err(HuffError::malformed_table(format!(
                    "truncated entry {} of {}",
                    index, count
                )));
            }
            Err(e) => return Err(e),
        }
        let symbol = i32::from_le_bytes([entry[0], entry[1], entry[2], entry[3]]);
        let bits = u32::from_le_bytes([entry[5], entry[6], entry[7], entry[8]]);
        entries.push((symbol, Code::new(bits, entry[4])?));
    }

    let table = CodeTable::from_entries(entries)?;
    log::debug!(
        "read code table: {} entries, longest code {} bits",
        table.len(),
        table.max_code_length()
    );
    Ok(table)
}

/// Description of a container, obtained without decoding its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerInfo {
    /// Detected layout.
    pub container: Container,
    /// Symbol count from the header (framed only).
    pub symbol_count: Option<u64>,
    /// Payload bit length from the header (framed only).
    pub bit_length: Option<u64>,
    /// Body checksum from the header (framed only).
    pub crc32: Option<u32>,
    /// The code table.
    pub table: CodeTable,
    /// Payload size in bytes.
    pub payload_len: usize,
}

/// Parse the header and code table of a container.
///
/// The checksum is reported but not verified.
pub fn inspect(data: &[u8]) -> Result<ContainerInfo> {
    let mut cursor = data;
    let header = if is_framed(data) {
        Some(FrameHeader::read(&mut cursor)?)
    } else {
        None
    };
    let table = read_table(&mut cursor)?;

    Ok(ContainerInfo {
        container: if header.is_some() {
            Container::Framed
        } else {
            Container::Bare
        },
        symbol_count: header.map(|h| h.symbol_count),
        bit_length: header.map(|h| h.bit_length),
        crc32: header.map(|h| h.crc32),
        table,
        payload_len: cursor.len(),
    })
}
