//! Derives the symbol -> code mapping from a Huffman tree.
//!
//! Codes are accumulated while walking down the tree: every step shifts the running code left
//! and appends 0 (left) or 1 (right) as the new low bit, and moves a one-hot length marker up by
//! one. At a leaf the marker sits on the code's most significant bit, which is where the
//! encoder starts emitting.

use log::debug;

use super::huffman::{HuffmanTree, Node, NodeData};
use crate::ALPHABET_SIZE;

/// A variable-length code. `marker` is zero for unused slots, otherwise a single set bit on the
/// most significant bit of `code`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Code {
    pub code: u64,
    pub marker: u64,
}

impl Code {
    /// Code length in bits. Zero for unused slots.
    pub fn len(&self) -> u32 {
        if self.marker == 0 {
            0
        } else {
            self.marker.trailing_zeros() + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.marker == 0
    }

    /// True if every bit of `self` matches the leading bits of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        let (a, b) = (self.len(), other.len());
        a > 0 && a <= b && other.code >> (b - a) == self.code
    }

    /// The code as a string of 0s and 1s, root decision first.
    pub fn to_bit_string(&self) -> String {
        (0..self.len())
            .rev()
            .map(|i| if (self.code >> i) & 1 == 1 { '1' } else { '0' })
            .collect()
    }
}

/// One code per possible byte value. Slots for symbols that do not occur stay empty.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: [Code; ALPHABET_SIZE],
}

impl CodeTable {
    /// Walk the tree and record the path to every leaf. A tree that is a single leaf has no path,
    /// so that symbol gets the one-bit code 0.
    pub fn from_tree(tree: &HuffmanTree) -> CodeTable {
        let mut table = CodeTable {
            codes: [Code::default(); ALPHABET_SIZE],
        };
        walk(&tree.root, &mut table.codes, 0, 0);
        debug!(
            "Generated {} codes, longest is {} bits",
            table.used().count(),
            table.used().map(|(_, c)| c.len()).max().unwrap_or(0)
        );
        table
    }

    /// Code for `sym`. Empty if the symbol was not in the tree.
    pub fn get(&self, sym: u8) -> Code {
        self.codes[sym as usize]
    }

    /// Iterate over (symbol, code) for every symbol that has a code.
    pub fn used(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_empty())
            .map(|(sym, c)| (sym as u8, c))
    }

    /// Total payload size in bits for the given frequency table.
    pub fn payload_bits(&self, weights: &[u32; ALPHABET_SIZE]) -> u64 {
        self.codes
            .iter()
            .zip(weights.iter())
            .map(|(c, &w)| c.len() as u64 * w as u64)
            .sum()
    }
}

fn walk(node: &Node, codes: &mut [Code; ALPHABET_SIZE], code: u64, marker: u64) {
    match &node.node_data {
        NodeData::Kids(left, right) => {
            let next = if marker == 0 { 1 } else { marker << 1 };
            assert!(next != 0, "code longer than 64 bits");
            walk(left, codes, code << 1, next);
            walk(right, codes, (code << 1) | 1, next);
        }
        NodeData::Leaf(sym) => {
            codes[*sym as usize] = if marker == 0 {
                Code { code: 0, marker: 1 }
            } else {
                Code { code, marker }
            };
        }
    }
}
