//! # Header Codec
//!
//! Every container starts with a fixed-layout header:
//!
//! ```text
//! ┌──────────┬────┬──────┬──────┬─────┬──────────────┐
//! │ mark[10] │ op │ alg1 │ alg2 │ len │ data[len]    │ payload …
//! └──────────┴────┴──────┴──────┴─────┴──────────────┘
//! ```
//!
//! `alg1` indexes the cipher registry, `alg2` the authentication registry.
//! `data` is the salt (cipher), digest (hash) or tag (mac).

use std::io::{Read, Write};

use crate::consts::{HEADER_FIXED_LEN, HEADER_MARK, HEADER_MARK_LEN, HEADER_MAX_DATA_LEN};
use crate::error::{PbeError, Result};
use crate::registry::{AuthAlgorithm, CipherAlgorithm};

/// Which engine produced a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Operation {
    None = 0,
    SymmetricCipher = 1,
    HashOrMac = 2,
}

impl Operation {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Operation::None => "none",
            Operation::SymmetricCipher => "symmetric cipher",
            Operation::HashOrMac => "hash/mac",
        }
    }

    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Operation::None),
            1 => Ok(Operation::SymmetricCipher),
            2 => Ok(Operation::HashOrMac),
            other => Err(PbeError::InvalidOperation(other)),
        }
    }
}

/// Container metadata. Immutable once built or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    operation: Operation,
    algorithm1: CipherAlgorithm,
    algorithm2: AuthAlgorithm,
    data: Vec<u8>,
}

impl Header {
    /// Build a header, rejecting data that does not fit the length byte.
    pub fn new(
        operation: Operation,
        algorithm1: CipherAlgorithm,
        algorithm2: AuthAlgorithm,
        data: Vec<u8>,
    ) -> Result<Self> {
        if data.len() > HEADER_MAX_DATA_LEN {
            return Err(PbeError::DataTooLarge(data.len()));
        }
        Ok(Self {
            operation,
            algorithm1,
            algorithm2,
            data,
        })
    }

    /// Build a header from registry names; unknown names fail with
    /// [`PbeError::AlgorithmNotFound`].
    pub fn from_names(
        operation: Operation,
        algorithm1: &str,
        algorithm2: &str,
        data: Vec<u8>,
    ) -> Result<Self> {
        Self::new(
            operation,
            CipherAlgorithm::from_name(algorithm1)?,
            AuthAlgorithm::from_name(algorithm2)?,
            data,
        )
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn algorithm1(&self) -> CipherAlgorithm {
        self.algorithm1
    }

    pub fn algorithm2(&self) -> AuthAlgorithm {
        self.algorithm2
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Total encoded length (fixed part + data).
    pub fn encoded_len(&self) -> usize {
        HEADER_FIXED_LEN + self.data.len()
    }

    /// Serialize to a fresh buffer.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Serialize straight into `writer`.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        // Never truncate the length byte.
        if self.data.len() > HEADER_MAX_DATA_LEN {
            return Err(PbeError::DataTooLarge(self.data.len()));
        }

        let mut fixed = [0u8; HEADER_FIXED_LEN];
        fixed[..HEADER_MARK_LEN].copy_from_slice(&HEADER_MARK);
        fixed[HEADER_MARK_LEN] = self.operation.code();
        fixed[HEADER_MARK_LEN + 1] = self.algorithm1.code();
        fixed[HEADER_MARK_LEN + 2] = self.algorithm2.code();
        fixed[HEADER_MARK_LEN + 3] = self.data.len() as u8;

        writer.write_all(&fixed)?;
        writer.write_all(&self.data)?;
        Ok(())
    }

    /// Parse a header, leaving `reader` positioned at the first payload byte.
    ///
    /// # Errors
    ///
    /// - [`PbeError::TruncatedHeader`] - fewer than 14 bytes available
    /// - [`PbeError::InvalidHeaderMark`] - mark mismatch (nothing else is parsed)
    /// - [`PbeError::InvalidOperation`] - unknown operation byte
    /// - [`PbeError::AlgorithmIndexOutOfRange`] - bad algorithm code
    /// - [`PbeError::TruncatedData`] - stream shorter than the declared data
    pub fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut fixed = [0u8; HEADER_FIXED_LEN];
        let got = read_full(reader, &mut fixed)?;
        if got < HEADER_FIXED_LEN {
            return Err(PbeError::TruncatedHeader {
                expected: HEADER_FIXED_LEN,
                actual: got,
            });
        }

        if fixed[..HEADER_MARK_LEN] != HEADER_MARK {
            return Err(PbeError::InvalidHeaderMark);
        }

        let operation = Operation::from_code(fixed[HEADER_MARK_LEN])?;
        let algorithm1 = CipherAlgorithm::from_code(fixed[HEADER_MARK_LEN + 1])?;
        let algorithm2 = AuthAlgorithm::from_code(fixed[HEADER_MARK_LEN + 2])?;
        let data_len = fixed[HEADER_MARK_LEN + 3] as usize;

        let mut data = vec![0u8; data_len];
        let got = read_full(reader, &mut data)?;
        if got < data_len {
            return Err(PbeError::TruncatedData {
                expected: data_len,
                actual: got,
            });
        }

        Ok(Self {
            operation,
            algorithm1,
            algorithm2,
            data,
        })
    }
}

/// Parse just the header of a container, e.g. to decide which verifier to use.
///
/// # Example
///
/// ```
/// use pbe_container::header::{read_header, Header, Operation};
/// use pbe_container::registry::{AuthAlgorithm, CipherAlgorithm, HashAlgorithm};
/// use std::io::Cursor;
///
/// let header = Header::new(
///     Operation::HashOrMac,
///     CipherAlgorithm::PbeWithMd5AndDes,
///     AuthAlgorithm::Hash(HashAlgorithm::Sha256),
///     vec![0xAB; 32],
/// )?;
/// let bytes = header.encode()?;
/// let parsed = read_header(Cursor::new(bytes))?;
/// assert_eq!(parsed.algorithm2(), AuthAlgorithm::Hash(HashAlgorithm::Sha256));
/// # Ok::<(), pbe_container::PbeError>(())
/// ```
pub fn read_header<R: Read>(mut reader: R) -> Result<Header> {
    Header::decode(&mut reader)
}

/// Fill `buf` as far as the stream allows; returns the number of bytes read.
///
/// Unlike `read_exact`, a short stream is reported as a count so the caller can
/// pick the right truncation error.
fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(PbeError::Io(e)),
        }
    }
    Ok(filled)
}
