//! zlib streaming for stored objects
//!
//! Both directions move data in fixed-size chunks, so an object is never held
//! twice in memory by the compressor itself.

use crate::errors::{StoreError, StoreResult};
use derive_new::new;
use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use std::io::{ErrorKind, Read, Write};
use std::ops::ControlFlow;

pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Input step used when only the start of a stream is wanted
const PREFIX_READ_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, new)]
pub struct Compressor {
    level: Compression,
    chunk_size: usize,
}

impl Default for Compressor {
    fn default() -> Self {
        Compressor::new(Compression::default(), DEFAULT_CHUNK_SIZE)
    }
}

impl Compressor {
    /// Deflate everything `source` yields into `dest`, terminating the stream
    ///
    /// Returns the number of uncompressed bytes consumed.
    pub fn compress<R: Read, W: Write>(&self, mut source: R, dest: W) -> StoreResult<u64> {
        let mut encoder = ZlibEncoder::new(dest, self.level);
        let mut chunk = vec![0u8; self.chunk_size.max(1)];
        let mut consumed = 0u64;

        loop {
            let read = read_chunk(&mut source, &mut chunk)?;
            if read == 0 {
                break;
            }

            encoder.write_all(&chunk[..read])?;
            consumed += read as u64;
        }

        let mut dest = encoder.finish()?;
        dest.flush()?;

        Ok(consumed)
    }

    /// Inflate a zlib stream from `source` into `dest`
    ///
    /// Fails with `CorruptObject` on a format or dictionary error, or when the
    /// source runs dry before the stream's end marker. Returns the number of
    /// bytes written to `dest`.
    pub fn decompress<R: Read, W: Write>(&self, source: R, mut dest: W) -> StoreResult<u64> {
        let mut written = 0u64;

        self.inflate(source, self.chunk_size, |chunk| {
            dest.write_all(chunk)?;
            written += chunk.len() as u64;
            Ok(ControlFlow::Continue(()))
        })?;
        dest.flush()?;

        Ok(written)
    }

    /// Inflate only as far as the first `delimiter`, which is included
    ///
    /// Reads the source in small steps and stops as soon as the delimiter has
    /// been produced, so the rest of the stream is never inflated. A stream
    /// that ends without the delimiter yields everything it held. More than
    /// `limit` bytes without the delimiter is a `MalformedObject`.
    pub fn decompress_until<R: Read>(
        &self,
        source: R,
        delimiter: u8,
        limit: usize,
    ) -> StoreResult<Vec<u8>> {
        let mut inflated = Vec::new();

        self.inflate(source, PREFIX_READ_SIZE, |chunk| {
            if let Some(end) = chunk.iter().position(|&byte| byte == delimiter) {
                inflated.extend_from_slice(&chunk[..=end]);
                return Ok(ControlFlow::Break(()));
            }

            inflated.extend_from_slice(chunk);
            if inflated.len() > limit {
                return Err(StoreError::MalformedObject(format!(
                    "no {:#04x} byte within the first {} bytes",
                    delimiter, limit
                )));
            }
            Ok(ControlFlow::Continue(()))
        })?;

        Ok(inflated)
    }

    /// Feed inflated chunks to `sink` until the stream ends or the sink breaks
    fn inflate<R: Read>(
        &self,
        mut source: R,
        read_size: usize,
        mut sink: impl FnMut(&[u8]) -> StoreResult<ControlFlow<()>>,
    ) -> StoreResult<()> {
        let mut inflater = Decompress::new(true);
        let mut input = vec![0u8; read_size.max(1)];
        let mut output = vec![0u8; self.chunk_size.max(1)];

        loop {
            let available = read_chunk(&mut source, &mut input)?;
            if available == 0 {
                tracing::debug!(
                    inflated = inflater.total_out(),
                    "zlib stream ended before its end marker"
                );
                return Err(StoreError::CorruptObject(
                    "compressed stream ended before its end marker".into(),
                ));
            }

            let mut offset = 0;
            loop {
                let in_before = inflater.total_in();
                let out_before = inflater.total_out();

                let status = inflater
                    .decompress(&input[offset..available], &mut output, FlushDecompress::None)
                    .map_err(|err| StoreError::CorruptObject(err.to_string()))?;

                let used = (inflater.total_in() - in_before) as usize;
                let produced = (inflater.total_out() - out_before) as usize;
                offset += used;

                if produced > 0 && sink(&output[..produced])?.is_break() {
                    return Ok(());
                }
                if status == Status::StreamEnd {
                    return Ok(());
                }

                let output_full = produced == output.len();
                if offset == available && !output_full {
                    break;
                }
                if used == 0 && produced == 0 {
                    if offset < available {
                        return Err(StoreError::CorruptObject(
                            "inflater made no progress on pending input".into(),
                        ));
                    }
                    break;
                }
            }
        }
    }
}

/// Fill `chunk` as far as the source allows; 0 means end of input
fn read_chunk<R: Read>(source: &mut R, chunk: &mut [u8]) -> StoreResult<usize> {
    let mut filled = 0;

    while filled < chunk.len() {
        match source.read(&mut chunk[filled..]) {
            Ok(0) => break,
            Ok(read) => filled += read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(StoreError::Io(err)),
        }
    }

    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::io;

    fn roundtrip(compressor: &Compressor, data: &[u8]) -> Vec<u8> {
        let mut compressed = Vec::new();
        compressor.compress(data, &mut compressed).unwrap();

        let mut inflated = Vec::new();
        compressor.decompress(&compressed[..], &mut inflated).unwrap();
        inflated
    }

    #[test]
    fn inflates_streams_larger_than_a_chunk() {
        let compressor = Compressor::new(Compression::fast(), 16);
        let data = (0..10_000u32).flat_map(|n| n.to_le_bytes()).collect::<Vec<_>>();

        assert_eq!(roundtrip(&compressor, &data), data);
    }

    #[test]
    fn empty_input_still_produces_a_terminated_stream() {
        let compressor = Compressor::default();
        let mut compressed = Vec::new();

        assert_eq!(compressor.compress(&b""[..], &mut compressed).unwrap(), 0);
        assert!(!compressed.is_empty());
        assert_eq!(roundtrip(&compressor, b""), b"");
    }

    #[test]
    fn truncated_stream_is_corrupt() {
        let compressor = Compressor::default();
        let mut compressed = Vec::new();
        compressor
            .compress(&b"some content that compresses"[..], &mut compressed)
            .unwrap();
        compressed.truncate(compressed.len() - 6);

        let result = compressor.decompress(&compressed[..], io::sink());
        assert!(matches!(result, Err(StoreError::CorruptObject(_))));
    }

    #[test]
    fn garbage_is_corrupt() {
        let compressor = Compressor::default();
        let result = compressor.decompress(&b"definitely not zlib"[..], io::sink());

        assert!(matches!(result, Err(StoreError::CorruptObject(_))));
    }

    #[test]
    fn inflates_only_up_to_the_delimiter() {
        let compressor = Compressor::new(Compression::default(), 8);
        let mut data = b"blob 70000\0".to_vec();
        data.extend(std::iter::repeat_n(b'x', 70_000));
        let mut compressed = Vec::new();
        compressor.compress(&data[..], &mut compressed).unwrap();

        let prefix = compressor
            .decompress_until(&compressed[..], b'\0', 64)
            .unwrap();

        assert_eq!(prefix, b"blob 70000\0");
    }

    #[test]
    fn prefix_without_delimiter_is_bounded() {
        let compressor = Compressor::default();
        let mut compressed = Vec::new();
        compressor.compress(&[b'x'; 1000][..], &mut compressed).unwrap();

        assert!(matches!(
            compressor.decompress_until(&compressed[..], b'\0', 64),
            Err(StoreError::MalformedObject(_))
        ));
        assert_eq!(
            compressor.decompress_until(&compressed[..], b'\0', 4096).unwrap(),
            vec![b'x'; 1000]
        );
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_failures_are_io_errors() {
        let compressor = Compressor::default();
        let mut compressed = Vec::new();
        compressor.compress(&b"payload"[..], &mut compressed).unwrap();

        assert!(matches!(
            compressor.decompress(&compressed[..], FailingWriter),
            Err(StoreError::Io(_))
        ));
        assert!(matches!(
            compressor.compress(&b"payload"[..], FailingWriter),
            Err(StoreError::Io(_))
        ));
    }

    proptest! {
        #[test]
        fn inflate_undoes_deflate(
            data in proptest::collection::vec(any::<u8>(), 0..4096),
            chunk_size in 1usize..512,
        ) {
            let compressor = Compressor::new(Compression::default(), chunk_size);
            prop_assert_eq!(roundtrip(&compressor, &data), data);
        }
    }
}
