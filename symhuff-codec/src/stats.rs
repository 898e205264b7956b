//! Compression statistics.

/// Summary of one encode run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompressionStats {
    /// Number of input symbols.
    pub symbol_count: u64,
    /// Number of distinct symbols (code table entries).
    pub distinct_symbols: usize,
    /// Payload length in bits, padding excluded.
    pub encoded_bits: u64,
    /// Size of the serialized code table in bytes.
    pub table_bytes: usize,
    /// Size of the whole output in bytes, header included.
    pub total_bytes: usize,
    /// Bits a fixed-width code over the same alphabet would need.
    pub fixed_width_bits: u64,
}

impl CompressionStats {
    /// Bits per symbol of the smallest fixed-width code for `distinct`
    /// symbols (at least 1).
    pub fn fixed_width(distinct: usize) -> u32 {
        if distinct <= 2 {
            1
        } else {
            usize::BITS - (distinct - 1).leading_zeros()
        }
    }

    /// Average payload bits per input symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.symbol_count == 0 {
            0.0
        } else {
            self.encoded_bits as f64 / self.symbol_count as f64
        }
    }

    /// Fraction of payload bits saved against the fixed-width baseline.
    pub fn savings_ratio(&self) -> f64 {
        if self.fixed_width_bits == 0 {
            0.0
        } else {
            1.0 - self.encoded_bits as f64 / self.fixed_width_bits as f64
        }
    }
}
