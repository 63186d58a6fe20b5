//! Huffman tree construction.
//!
//! The tree is built bottom-up with a min-priority queue. Ties between equal
//! frequencies are broken by insertion order: leaves enter the queue in
//! ascending symbol order and merged nodes are appended after them, so the
//! same frequency table always yields the same tree.

use crate::codeword::CodewordTable;
use crate::frequency::FrequencyTable;
use crate::symbol::SymbolKey;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A node of a Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A symbol and its frequency.
    Leaf {
        /// The symbol.
        symbol: SymbolKey,
        /// Occurrence count.
        frequency: u64,
    },
    /// Two subtrees; `frequency` is the sum of theirs.
    Internal {
        /// Subtree reached with bit `0`.
        left: Box<HuffmanNode>,
        /// Subtree reached with bit `1`.
        right: Box<HuffmanNode>,
        /// Combined frequency.
        frequency: u64,
    },
}

impl HuffmanNode {
    /// Create a leaf.
    pub fn leaf(symbol: SymbolKey, frequency: u64) -> Self {
        Self::Leaf { symbol, frequency }
    }

    /// Combine two nodes under a new parent.
    pub fn merge(left: HuffmanNode, right: HuffmanNode) -> Self {
        let frequency = left.frequency() + right.frequency();
        Self::Internal {
            left: Box::new(left),
            right: Box::new(right),
            frequency,
        }
    }

    /// Frequency of this subtree.
    pub fn frequency(&self) -> u64 {
        match self {
            Self::Leaf { frequency, .. } | Self::Internal { frequency, .. } => *frequency,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Priority queue entry: lowest frequency first, then lowest sequence.
#[derive(Debug)]
struct QueueEntry {
    sequence: u64,
    node: HuffmanNode,
}

impl QueueEntry {
    fn key(&self) -> (u64, u64) {
        (self.node.frequency(), self.sequence)
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap
        other.key().cmp(&self.key())
    }
}

/// A Huffman tree over symbol keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build a tree from a frequency table.
    ///
    /// Returns `None` for an empty table. A table with one distinct symbol
    /// yields a single leaf.
    pub fn build(table: &FrequencyTable) -> Option<Self> {
        let mut heap = BinaryHeap::with_capacity(table.len());
        let mut sequence = 0u64;

        for (symbol, frequency) in table.sorted() {
            heap.push(QueueEntry {
                sequence,
                node: HuffmanNode::leaf(symbol.clone(), frequency),
            });
            sequence += 1;
        }

        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                break;
            };
            heap.push(QueueEntry {
                sequence,
                node: HuffmanNode::merge(left.node, right.node),
            });
            sequence += 1;
        }

        heap.pop().map(|entry| Self { root: entry.node })
    }

    /// The root node.
    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Assign a codeword to every leaf.
    pub fn codewords(&self) -> CodewordTable {
        CodewordTable::from_tree(&self.root)
    }
}
