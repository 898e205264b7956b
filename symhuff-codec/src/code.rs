//! Prefix codes and code tables.

use crate::Symbol;
use crate::config::MAX_CODE_LENGTH;
use crate::frequency::FrequencyMap;
use crate::tree::{HuffmanTree, Node, NodeId};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use symhuff_core::error::{HuffError, Result};

/// A variable-length code of 1 to 32 bits.
///
/// The code occupies the low `len` bits of `bits`; the first bit of the
/// code is the most significant of those.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCode"))]
pub struct Code {
    bits: u32,
    len: u8,
}

/// Unchecked wire form of a [`Code`]; deserialization goes through
/// [`Code::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCode {
    bits: u32,
    len: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCode> for Code {
    type Error = HuffError;

    fn try_from(raw: RawCode) -> Result<Self> {
        Code::new(raw.bits, raw.len)
    }
}

impl Code {
    /// Create a code, checking that `len` is 1-32 and `bits` fits in it.
    pub fn new(bits: u32, len: u8) -> Result<Self> {
        if len == 0 || len > MAX_CODE_LENGTH {
            return Err(HuffError::malformed_table(format!(
                "code length {} outside 1..={}",
                len, MAX_CODE_LENGTH
            )));
        }
        if len < 32 && bits >> len != 0 {
            return Err(HuffError::malformed_table(format!(
                "pattern {:#010x} has bits above length {}",
                bits, len
            )));
        }
        Ok(Self { bits, len })
    }

    /// The code bits, right-aligned.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Number of bits in the code.
    pub fn len(&self) -> u8 {
        self.len
    }

    /// Always false: codes have at least one bit.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The first `len` bits of this code.
    fn prefix(&self, len: u8) -> Code {
        Code {
            bits: self.bits >> (self.len - len),
            len,
        }
    }

    /// Whether `self` is a proper or equal prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.prefix(self.len) == *self
    }

    /// Render as a string of `0` and `1`, first bit leftmost.
    pub fn to_bit_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len).rev() {
            let bit = if (self.bits >> i) & 1 == 1 { '1' } else { '0' };
            fmt::Write::write_char(f, bit)?;
        }
        Ok(())
    }
}

/// Mapping from symbol to its prefix code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "BTreeMap<Symbol, Code>",
        into = "BTreeMap<Symbol, Code>"
    )
)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, Code>,
}

impl TryFrom<BTreeMap<Symbol, Code>> for CodeTable {
    type Error = HuffError;

    /// Same checks as [`CodeTable::from_entries`].
    fn try_from(codes: BTreeMap<Symbol, Code>) -> Result<Self> {
        Self::from_entries(codes)
    }
}

impl From<CodeTable> for BTreeMap<Symbol, Code> {
    fn from(table: CodeTable) -> Self {
        table.codes
    }
}

impl CodeTable {
    /// Derive codes from a tree: `0` for a left branch, `1` for a right one.
    ///
    /// A tree that is a single leaf gives that symbol the one-bit code `0`.
    /// Fails with [`HuffError::CodeTooLong`] if a leaf sits deeper than
    /// `max_len`, and with [`HuffError::InvalidConfig`] if `max_len` is
    /// outside `1..=32`.
    pub fn from_tree(tree: &HuffmanTree, max_len: u8) -> Result<Self> {
        if max_len == 0 || max_len > MAX_CODE_LENGTH {
            return Err(HuffError::invalid_config(format!(
                "max_code_length {} outside 1..={}",
                max_len, MAX_CODE_LENGTH
            )));
        }
        let mut codes = BTreeMap::new();

        if let Node::Leaf { symbol, .. } = *tree.node(tree.root()) {
            codes.insert(symbol, Code { bits: 0, len: 1 });
            return Ok(Self { codes });
        }

        // (node, code bits so far, depth); right pushed first so left pops first
        let mut stack: Vec<(NodeId, u32, usize)> = vec![(tree.root(), 0, 0)];
        while let Some((id, bits, depth)) = stack.pop() {
            match *tree.node(id) {
                Node::Leaf { symbol, .. } => {
                    if depth > max_len as usize {
                        return Err(HuffError::code_too_long(symbol, depth, max_len));
                    }
                    let code = Code {
                        bits,
                        len: depth as u8,
                    };
                    log::trace!("symbol {} -> {}", symbol, code);
                    codes.insert(symbol, code);
                }
                Node::Internal { left, right, .. } => {
                    stack.push((right, (bits << 1) | 1, depth + 1));
                    stack.push((left, bits << 1, depth + 1));
                }
            }
        }

        Ok(Self { codes })
    }

    /// Build the tree for `freqs` and derive its codes.
    pub fn from_frequencies(freqs: &FrequencyMap, max_len: u8) -> Result<Self> {
        let tree = HuffmanTree::build(freqs)?;
        Self::from_tree(&tree, max_len)
    }

    /// Assemble a table from explicit entries, as read from a file.
    ///
    /// Fails with [`HuffError::MalformedTable`] on duplicate symbols,
    /// duplicate codes, or codes that are a prefix of another.
    pub fn from_entries<I: IntoIterator<Item = (Symbol, Code)>>(entries: I) -> Result<Self> {
        let mut codes = BTreeMap::new();
        let mut seen = HashSet::new();
        for (symbol, code) in entries {
            if codes.insert(symbol, code).is_some() {
                return Err(HuffError::malformed_table(format!(
                    "duplicate symbol {}",
                    symbol
                )));
            }
            if !seen.insert(code) {
                return Err(HuffError::malformed_table(format!(
                    "duplicate code {} (symbol {})",
                    code, symbol
                )));
            }
        }

        let table = Self { codes };
        if let Some((symbol, code)) = table.first_prefix_violation(&seen) {
            return Err(HuffError::malformed_table(format!(
                "code {} of symbol {} has another code as prefix",
                code, symbol
            )));
        }
        Ok(table)
    }

    /// Code for `symbol`, if present.
    pub fn get(&self, symbol: Symbol) -> Option<Code> {
        self.codes.get(&symbol).copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, Code)> + '_ {
        self.codes.iter().map(|(&symbol, &code)| (symbol, code))
    }

    /// Length of the longest code, 0 for an empty table.
    pub fn max_code_length(&self) -> u8 {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// Whether no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let all: HashSet<Code> = self.codes.values().copied().collect();
        all.len() == self.codes.len() && self.first_prefix_violation(&all).is_none()
    }

    fn first_prefix_violation(&self, all: &HashSet<Code>) -> Option<(Symbol, Code)> {
        self.iter().find(|(_, code)| {
            (1..code.len()).any(|len| all.contains(&code.prefix(len)))
        })
    }

    /// Number of payload bits needed to encode symbols with these counts.
    ///
    /// Symbols absent from the table contribute nothing.
    pub fn encoded_bit_len(&self, freqs: &FrequencyMap) -> u64 {
        freqs
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| code.len() as u64 * count))
            .sum()
    }

    /// Build the exact-match lookup used by the decoder.
    pub fn decode_table(&self) -> DecodeTable {
        DecodeTable {
            lookup: self.iter().map(|(symbol, code)| (code, symbol)).collect(),
            max_len: self.max_code_length(),
        }
    }
}

/// Exact-match lookup from code to symbol.
#[derive(Debug, Clone)]
pub struct DecodeTable {
    lookup: HashMap<Code, Symbol>,
    max_len: u8,
}

impl DecodeTable {
    /// Symbol whose code is exactly `code`.
    #[inline]
    pub fn get(&self, code: &Code) -> Option<Symbol> {
        self.lookup.get(code).copied()
    }

    /// Symbol whose code is the low `len` bits of `bits`.
    #[inline]
    pub fn lookup(&self, bits: u32, len: u8) -> Option<Symbol> {
        self.get(&Code { bits, len })
    }

    /// Length of the longest code.
    pub fn max_len(&self) -> u8 {
        self.max_len
    }

    /// Number of codes.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    /// Whether the table has no codes.
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// The unique code consisting only of zero bits, if it is in the table.
    pub fn zero_code(&self) -> Option<Code> {
        (1..=self.max_len)
            .map(|len| Code { bits: 0, len })
            .find(|code| self.lookup.contains_key(code))
    }
}
