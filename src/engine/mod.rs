//! # Engines
//!
//! One engine per container operation. Each is built by a fallible factory
//! (there is no half-initialised state), owns its source stream, and is
//! consumed by its terminal call:
//!
//! | engine | producer | verifier | terminal |
//! |---|---|---|---|
//! | [`CipherEngine`] | `encrypt` | `decrypt` | `save(sink)` |
//! | [`DigestEngine`] | `hash` | `verify_hash` | `save(sink)` / `verify()` |
//! | [`MacEngine`] | `mac` | `verify_mac` | `save(sink)` / `verify()` |
//!
//! Engines never close the streams they are given.

pub mod cipher;
pub mod digest;
pub mod mac;
pub(crate) mod stream;

pub use cipher::CipherEngine;
pub use digest::DigestEngine;
pub use mac::MacEngine;

use std::io::{Read, Write};

use crate::error::{PbeError, Result};
use crate::header::{Header, Operation};
use crate::registry::{AuthAlgorithm, CipherAlgorithm};

/// Which terminal a hash/MAC engine was built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TagMode {
    Produce,
    Verify { expected: Vec<u8> },
}

impl TagMode {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            TagMode::Produce => "produce",
            TagMode::Verify { .. } => "verify",
        }
    }
}

/// Fail with [`PbeError::UnexpectedOperation`] unless `header` was written by `expected`.
pub(crate) fn expect_operation(header: &Header, expected: Operation) -> Result<()> {
    if header.operation() != expected {
        return Err(PbeError::UnexpectedOperation {
            expected: expected.name(),
            found: header.operation().name(),
        });
    }
    Ok(())
}

/// Drain `source`, feeding every chunk to `update` and keeping a copy for the
/// producer's clear payload.
pub(crate) fn drain_with_copy<R, F>(source: &mut R, mut update: F) -> Result<Vec<u8>>
where
    R: Read + ?Sized,
    F: FnMut(&[u8]),
{
    let mut copy = Vec::new();
    stream::drain(source, |chunk| {
        update(chunk);
        copy.extend_from_slice(chunk);
        Ok(())
    })?;
    Ok(copy)
}

/// Write a hash/MAC container: header carrying `tag`, then the payload in clear.
///
/// Slot 1 always holds `PBEWithMD5andDES` (code 0) for these containers.
pub(crate) fn write_tagged<W>(
    sink: &mut W,
    algorithm: AuthAlgorithm,
    tag: Vec<u8>,
    payload: &[u8],
) -> Result<Header>
where
    W: Write + ?Sized,
{
    let header = Header::new(
        Operation::HashOrMac,
        CipherAlgorithm::PbeWithMd5AndDes,
        algorithm,
        tag,
    )?;
    header.write_to(sink)?;
    sink.write_all(payload)?;
    sink.flush()?;
    Ok(header)
}
