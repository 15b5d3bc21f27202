use std::io::{Cursor, ErrorKind, Read, Seek, SeekFrom, Write};

use log::{debug, info};

use crate::bitstream::bitwriter::BitWriter;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::huffman::HuffmanTree;
use crate::huffman_coding::tree_codec::write_header;
use crate::tools::cli::CodecOpts;
use crate::tools::freq_count::read_freqs;

/*
    Compression makes two passes over the source. The first pass counts every byte value, which
    gives us the tree and the code table. The second pass starts again from where the source was
    when we were called and pushes one code per byte through the BitWriter, right behind the
    serialized tree and the symbol count.
*/

/// Compress everything from the current position of `source` to its end into `sink`.
/// Returns the number of bytes written. An empty source writes nothing and returns 0.
pub fn compress<R: Read + Seek, W: Write>(
    source: &mut R,
    sink: &mut W,
    opts: &CodecOpts,
) -> Result<u64> {
    // Remember where the payload starts so the second pass can come back here
    let start = source.stream_position()?;

    let weights = match read_freqs(source, opts.buffer_size)? {
        Some(weights) => weights,
        None => return Ok(0),
    };
    let tree = match HuffmanTree::from_weights(&weights) {
        Some(tree) => tree,
        None => return Ok(0),
    };
    if log::log_enabled!(log::Level::Debug) {
        tree.print_structure();
    }
    let table = CodeTable::from_tree(&tree);
    let count = tree.weight();
    debug!(
        "Payload will take {} bits for {} symbols",
        table.payload_bits(&weights),
        count
    );

    source.seek(SeekFrom::Start(start))?;

    let mut bw = BitWriter::new(sink, opts.buffer_size);
    write_header(&mut bw, &tree, count)?;
    let encoded = encode_stream(source, &table, &mut bw, opts.buffer_size)?;
    if encoded != count as u64 {
        return Err(HuffError::SourceChanged);
    }
    bw.flush()?;

    info!(
        "Compressed {} bytes into {} bytes ({} distinct symbols).",
        count,
        bw.written(),
        tree.leaf_count()
    );
    Ok(bw.written())
}

/// Read the source in `buffer_size` chunks and put the code of every byte on the stream.
/// Returns the number of bytes encoded. The caller flushes the writer.
pub fn encode_stream<R: Read, W: Write>(
    source: &mut R,
    table: &CodeTable,
    bw: &mut BitWriter<W>,
    buffer_size: usize,
) -> Result<u64> {
    let mut buf = vec![0_u8; buffer_size.max(1)];
    let mut encoded: u64 = 0;
    loop {
        let read = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        for &byte in &buf[..read] {
            let code = table.get(byte);
            // A byte the first pass never saw has no code
            if code.is_empty() {
                return Err(HuffError::SourceChanged);
            }
            bw.out_code(code.code, code.marker)?;
        }
        encoded += read as u64;
    }
    Ok(encoded)
}

/// Compress an in-memory buffer.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    compress(&mut Cursor::new(data), &mut out, &CodecOpts::default())?;
    Ok(out)
}
