use std::io::{Read, Write};

use log::{info, trace};

use crate::bitstream::bitreader::BitReader;
use crate::error::{HuffError, Result};
use crate::huffman_coding::huffman::{HuffmanTree, NodeData};
use crate::huffman_coding::tree_codec::read_header;
use crate::tools::cli::CodecOpts;

/// Decompress a huffpack stream from `source` into `sink`. Returns the number of bytes
/// reproduced. A source with no data at all is an empty stream and writes nothing.
pub fn decompress<R: Read, W: Write>(
    source: &mut R,
    sink: &mut W,
    opts: &CodecOpts,
) -> Result<u64> {
    let mut br = BitReader::new(source, opts.buffer_size);

    // No header at all means there was nothing to compress in the first place
    if !br.have_data()? {
        info!("Input is empty, nothing to decompress");
        return Ok(0);
    }

    let (tree, count) = read_header(&mut br)?;
    if log::log_enabled!(log::Level::Debug) {
        tree.print_structure();
    }

    let decoded = decode_stream(&mut br, &tree, count, sink, opts.buffer_size)?;
    info!("Decompressed {} bytes.", decoded);
    Ok(decoded)
}

/// Walk the tree once per output symbol: 0 goes left, 1 goes right, a leaf emits its symbol
/// and sends us back to the root. Stops after exactly `count` symbols.
pub fn decode_stream<R: Read, W: Write>(
    br: &mut BitReader<R>,
    tree: &HuffmanTree,
    count: u32,
    sink: &mut W,
    buffer_size: usize,
) -> Result<u64> {
    let capacity = buffer_size.max(1);
    let mut out: Vec<u8> = Vec::with_capacity(capacity);
    let mut decoded: u32 = 0;

    while decoded < count {
        let sym = match &tree.root.node_data {
            // A lone leaf has no edges. Each symbol was written as the one-bit code 0.
            NodeData::Leaf(sym) => match br.bit()? {
                Some(false) => *sym,
                Some(true) => {
                    return Err(HuffError::CorruptPayload(
                        "single symbol stream holds a 1 bit",
                    ))
                }
                None => return Err(truncated(count, decoded)),
            },
            NodeData::Kids(..) => {
                let mut node = &tree.root;
                loop {
                    match &node.node_data {
                        NodeData::Kids(left, right) => {
                            node = match br.bit()? {
                                Some(true) => right,
                                Some(false) => left,
                                None => return Err(truncated(count, decoded)),
                            };
                        }
                        NodeData::Leaf(sym) => break *sym,
                    }
                }
            }
        };

        out.push(sym);
        decoded += 1;
        if out.len() == capacity {
            trace!("Decoder flushing {} bytes at {}", out.len(), br.loc());
            sink.write_all(&out)?;
            out.clear();
        }
    }

    sink.write_all(&out)?;
    sink.flush()?;
    Ok(decoded as u64)
}

fn truncated(expected: u32, decoded: u32) -> HuffError {
    HuffError::Truncated { expected, decoded }
}

/// Decompress an in-memory buffer.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decompress(&mut &data[..], &mut out, &CodecOpts::default())?;
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::compression::compress::compress_bytes;

    #[test]
    fn empty_stream_test() {
        assert!(decompress_bytes(&[]).unwrap().is_empty());
    }

    #[test]
    fn aaab_test() {
        let packed = [0b0101_0000, 0b1010_1000, 0b0010_0000, 0, 0, 0, 0b1001_1100];
        assert_eq!(decompress_bytes(&packed).unwrap(), b"AAAB".to_vec());
    }

    #[test]
    fn single_symbol_test() {
        let packed = compress_bytes(&[0x41; 1000]).unwrap();
        let out = decompress_bytes(&packed).unwrap();
        assert_eq!(out.len(), 1000);
        assert!(out.iter().all(|&b| b == 0x41));
    }

    #[test]
    fn single_symbol_one_bit_test() {
        // Leaf 0x41, count 1, then a 1 bit where only 0 is valid
        let packed = [0b1010_0000, 0b1000_0000, 0, 0, 0, 0b1100_0000];
        assert!(matches!(
            decompress_bytes(&packed),
            Err(HuffError::CorruptPayload(_))
        ));
    }

    #[test]
    fn truncated_payload_test() {
        let data = b"a long enough message that the payload spans several bytes";
        let packed = compress_bytes(data).unwrap();
        let cut = &packed[..packed.len() - 3];
        match decompress_bytes(cut) {
            Err(HuffError::Truncated { expected, decoded }) => {
                assert_eq!(expected as usize, data.len());
                assert!(decoded < expected);
            }
            other => panic!("expected a truncation error, got {:?}", other),
        }
    }

    #[test]
    fn small_buffers_test() {
        let data = b"tiny buffers force a refill and a flush on every single byte".to_vec();
        let packed = compress_bytes(&data).unwrap();
        let mut out = Vec::new();
        let n = decompress(
            &mut packed.as_slice(),
            &mut out,
            &CodecOpts::with_buffer_size(1),
        )
        .unwrap();
        assert_eq!(n as usize, data.len());
        assert_eq!(out, data);
    }

    #[test]
    fn zero_count_test() {
        // Leaf 0x41 followed by a count of zero decodes to nothing
        let packed = [0b1010_0000, 0b1000_0000, 0, 0, 0, 0];
        assert!(decompress_bytes(&packed).unwrap().is_empty());
    }
}
