//! Serializes the shape of a Huffman tree onto the bitstream and reads it back.
//!
//! The tree is written pre-order:
//! - internal node: bit 0, then the left subtree, then the right subtree
//! - leaf: bit 1, then the 8-bit symbol, most significant bit first
//!
//! The encoding is self-terminating, so no size field is needed. Directly after the tree comes
//! the number of encoded symbols as a 32-bit value, most significant bit first.
//!

use std::io::{Read, Write};

use log::{debug, trace};

use super::huffman::{HuffmanTree, Node, NodeData};
use crate::bitstream::{bitreader::BitReader, bitwriter::BitWriter};
use crate::error::{HuffError, Result};
use crate::ALPHABET_SIZE;

/// A tree over 256 symbols cannot be deeper than 255 edges.
const MAX_DEPTH: usize = ALPHABET_SIZE - 1;

/// Write the tree followed by the symbol count.
pub fn write_header<W: Write>(bw: &mut BitWriter<W>, tree: &HuffmanTree, count: u32) -> Result<()> {
    write_node(bw, &tree.root)?;
    bw.out32(count)?;
    debug!(
        "Wrote tree with {} leaves and a symbol count of {}",
        tree.leaf_count(),
        count
    );
    Ok(())
}

/// Read the tree and the symbol count.
pub fn read_header<R: Read>(br: &mut BitReader<R>) -> Result<(HuffmanTree, u32)> {
    let mut seen = [false; ALPHABET_SIZE];
    let root = read_node(br, 0, &mut seen)?;
    let tree = HuffmanTree::from_root(root);
    let count = br
        .bint(32)?
        .ok_or(HuffError::CorruptTree("stream ends inside the symbol count"))?;
    debug!(
        "Read tree with {} leaves and a symbol count of {}",
        tree.leaf_count(),
        count
    );
    Ok((tree, count))
}

/// Pre-order write of one subtree.
pub fn write_node<W: Write>(bw: &mut BitWriter<W>, node: &Node) -> Result<()> {
    match &node.node_data {
        NodeData::Kids(left, right) => {
            bw.out_bit(false)?;
            write_node(bw, left)?;
            write_node(bw, right)?;
        }
        NodeData::Leaf(sym) => {
            bw.out_bit(true)?;
            bw.out8(*sym)?;
        }
    }
    Ok(())
}

/// Pre-order read of one subtree. `seen` tracks symbols already placed in a leaf.
pub fn read_node<R: Read>(
    br: &mut BitReader<R>,
    depth: usize,
    seen: &mut [bool; ALPHABET_SIZE],
) -> Result<Node> {
    if depth > MAX_DEPTH {
        return Err(HuffError::CorruptTree("tree is deeper than any 256 symbol tree"));
    }
    let is_leaf = br
        .bit()?
        .ok_or(HuffError::CorruptTree("stream ends inside the tree"))?;
    if is_leaf {
        let sym = br
            .byte()?
            .ok_or(HuffError::CorruptTree("stream ends inside a leaf symbol"))?;
        if seen[sym as usize] {
            return Err(HuffError::CorruptTree("symbol appears in more than one leaf"));
        }
        seen[sym as usize] = true;
        trace!("Leaf {:#04x} at depth {} {}", sym, depth, br.loc());
        // Weights are not carried on the stream
        Ok(Node::leaf(sym, 0))
    } else {
        let left = read_node(br, depth + 1, seen)?;
        let right = read_node(br, depth + 1, seen)?;
        Ok(Node::kids(left, right, 0))
    }
}
