//! Codec configuration.

use symhuff_core::error::{HuffError, Result};

/// Longest code the wire format can carry (width of the pattern field).
pub const MAX_CODE_LENGTH: u8 = 32;

/// On-disk container layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Container {
    /// Magic, version, symbol count, bit length and CRC-32 ahead of the
    /// table. Decoding stops exactly at the last symbol.
    #[default]
    Framed,
    /// Table followed directly by the payload, as found in older captures.
    /// Trailing padding cannot be told apart from data.
    Bare,
}

/// Codec configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HuffConfig {
    /// Container written by the encoder.
    ///
    /// The decoder auto-detects the container unless it is told to read
    /// the bare layout explicitly.
    pub container: Container,
    /// Longest code the encoder may generate (1-32).
    pub max_code_length: u8,
    /// Upper bound on the number of symbols a single decode may produce.
    pub max_decoded_symbols: u64,
}

impl HuffConfig {
    /// Framed container, full 32-bit code space, no decode limit.
    pub const FRAMED: Self = Self {
        container: Container::Framed,
        max_code_length: MAX_CODE_LENGTH,
        max_decoded_symbols: u64::MAX,
    };

    /// Bare container, for consumers that only read the table and payload.
    pub const BARE: Self = Self {
        container: Container::Bare,
        max_code_length: MAX_CODE_LENGTH,
        max_decoded_symbols: u64::MAX,
    };

    /// Create the default (framed) configuration.
    pub fn new() -> Self {
        Self::FRAMED
    }

    /// Set the container layout.
    pub fn with_container(mut self, container: Container) -> Self {
        self.container = container;
        self
    }

    /// Set the maximum code length.
    pub fn with_max_code_length(mut self, max_code_length: u8) -> Self {
        self.max_code_length = max_code_length;
        self
    }

    /// Set the decoded symbol limit.
    pub fn with_max_decoded_symbols(mut self, limit: u64) -> Self {
        self.max_decoded_symbols = limit;
        self
    }

    /// Check that every parameter is in range.
    pub fn validate(&self) -> Result<()> {
        if self.max_code_length == 0 || self.max_code_length > MAX_CODE_LENGTH {
            return Err(HuffError::invalid_config(format!(
                "max_code_length {} outside 1..={}",
                self.max_code_length, MAX_CODE_LENGTH
            )));
        }
        Ok(())
    }
}

impl Default for HuffConfig {
    fn default() -> Self {
        Self::new()
    }
}
