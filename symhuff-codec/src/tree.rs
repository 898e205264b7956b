//! Huffman tree construction.
//!
//! Nodes live in a flat arena and refer to their children by index, so the
//! whole tree is released in one drop once the code table has been derived.
//!
//! # Merge order
//!
//! The priority queue is keyed by `(frequency, node id)`. Leaves occupy ids
//! `0..n` in ascending symbol order and internal nodes are appended as they
//! are created, so among equal frequencies leaves come before internal
//! nodes, leaves break ties by symbol value, and internal nodes by creation
//! order. Of the two nodes taken from the queue, the first becomes the left
//! child (bit `0`) and the second the right child (bit `1`). These rules are
//! part of the format: they decide which codes, and therefore which bytes,
//! an encoder produces.

use crate::Symbol;
use crate::frequency::FrequencyMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use symhuff_core::error::{HuffError, Result};

/// Index of a node inside a [`HuffmanTree`].
pub type NodeId = usize;

/// A tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// A symbol and its frequency.
    Leaf {
        /// The symbol.
        symbol: Symbol,
        /// Occurrence count.
        freq: u64,
    },
    /// A merge of two subtrees.
    Internal {
        /// Sum of both children's frequencies.
        freq: u64,
        /// Child reached with bit `0`.
        left: NodeId,
        /// Child reached with bit `1`.
        right: NodeId,
    },
}

impl Node {
    /// Frequency carried by this node.
    pub fn freq(&self) -> u64 {
        match *self {
            Node::Leaf { freq, .. } | Node::Internal { freq, .. } => freq,
        }
    }
}

/// An immutable Huffman tree stored as a node arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree for a frequency map.
    ///
    /// Symbols with a zero count are skipped. Fails with
    /// [`HuffError::EmptyAlphabet`] when nothing remains.
    pub fn build(freqs: &FrequencyMap) -> Result<Self> {
        let mut nodes: Vec<Node> = freqs
            .iter()
            .filter(|&(_, freq)| freq > 0)
            .map(|(symbol, freq)| Node::Leaf { symbol, freq })
            .collect();

        if nodes.is_empty() {
            return Err(HuffError::EmptyAlphabet);
        }

        let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = nodes
            .iter()
            .enumerate()
            .map(|(id, node)| Reverse((node.freq(), id)))
            .collect();

        let mut root = 0;
        while let Some(Reverse((left_freq, left))) = heap.pop() {
            let Some(Reverse((right_freq, right))) = heap.pop() else {
                root = left;
                break;
            };
            let freq = left_freq.saturating_add(right_freq);
            let id = nodes.len();
            nodes.push(Node::Internal { freq, left, right });
            heap.push(Reverse((freq, id)));
        }

        log::debug!(
            "built Huffman tree: {} leaves, {} nodes, root frequency {}",
            nodes.len().div_ceil(2),
            nodes.len(),
            nodes[root].freq()
        );

        Ok(Self { nodes, root })
    }

    /// Id of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Total number of nodes (leaves and internal).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a built tree has at least one leaf.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaves, i.e. distinct symbols.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf { .. }))
            .count()
    }
}
