//! src/engine/stream.rs
//! Chunked draining of a source stream

use std::io::{ErrorKind, Read};

use crate::consts::STREAM_CHUNK_SIZE;
use crate::error::Result;

/// Read `source` to EOF in [`STREAM_CHUNK_SIZE`] pieces, handing each to `consume`.
///
/// Returns the number of bytes read. `Interrupted` reads are retried.
pub(crate) fn drain<R, F>(source: &mut R, mut consume: F) -> Result<u64>
where
    R: Read + ?Sized,
    F: FnMut(&[u8]) -> Result<()>,
{
    let mut buffer = vec![0u8; STREAM_CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let n = match source.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        consume(&buffer[..n])?;
        total += n as u64;
    }

    Ok(total)
}
