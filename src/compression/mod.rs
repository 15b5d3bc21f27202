//! The compression module holds the two codec entry points.
//!
//! Compression happens in the following steps:
//! - Frequency count: one pass over the input counts every byte value.
//! - Tree build: a min-heap merges the two lightest nodes until one tree remains.
//! - Code table: walking the tree gives every symbol its prefix code.
//! - Header: the tree shape (pre-order) and the 32-bit symbol count go on the stream.
//! - Payload: a second pass over the input emits one code per byte, packed MSB-first.
//!
//! Decompression reads the tree back, then walks it bit by bit, emitting one symbol per leaf
//! reached until the declared symbol count has been produced.
//!

pub mod compress;
pub mod decompress;
