//! The huffman module builds the prefix code used by huffpack and moves the code tree on and off
//! the bitstream.
//!
//! The model is static: one frequency table is counted over the whole input, one tree is built
//! from it, and that tree is written at the head of the output so the decoder can rebuild it.
//!
//! - min_heap: the priority queue that drives tree construction.
//! - huffman: tree nodes and the tree builder.
//! - code_table: the symbol -> code mapping derived from a tree.
//! - tree_codec: pre-order serialization of the tree plus the symbol count header.
//!

pub mod code_table;
pub mod huffman;
pub mod min_heap;
pub mod tree_codec;
