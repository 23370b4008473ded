//! src/engine/digest.rs
//! Secret-prefixed digest containers
//!
//! Producer: `H(secret || payload)` goes into the header, payload follows in
//! clear. Verifier: recompute over the payload and compare with the header.

use std::io::{Read, Write};

use secure_gate::conversions::SecureConversionsExt;
use tracing::{info, warn};

use crate::aliases::PasswordString;
use crate::crypto::digest::KeyedDigest;
use crate::engine::{drain_with_copy, expect_operation, stream, write_tagged, TagMode};
use crate::error::{PbeError, Result};
use crate::header::{Header, Operation};
use crate::registry::{AuthAlgorithm, Category, HashAlgorithm};

/// Keyed-digest producer or verifier over a source.
pub struct DigestEngine<R> {
    source: R,
    digest: KeyedDigest,
    mode: TagMode,
}

impl<R: Read> DigestEngine<R> {
    /// Prepare to digest `source` keyed with `secret`.
    pub fn hash(source: R, algorithm: HashAlgorithm, secret: &PasswordString) -> Result<Self> {
        Ok(Self {
            source,
            digest: KeyedDigest::new(algorithm, secret),
            mode: TagMode::Produce,
        })
    }

    /// Parse the header from `source` and prepare to check the payload.
    ///
    /// # Errors
    ///
    /// - header codec errors
    /// - [`PbeError::UnexpectedOperation`] - not a hash/MAC container
    /// - [`PbeError::UnexpectedAlgorithm`] - slot 2 is not a hash algorithm
    pub fn verify_hash(mut source: R, secret: &PasswordString) -> Result<Self> {
        let header = Header::decode(&mut source)?;
        expect_operation(&header, Operation::HashOrMac)?;

        let AuthAlgorithm::Hash(algorithm) = header.algorithm2() else {
            return Err(PbeError::UnexpectedAlgorithm {
                expected: Category::Hash,
                found: header.algorithm2().name(),
            });
        };

        Ok(Self {
            source,
            digest: KeyedDigest::new(algorithm, secret),
            mode: TagMode::Verify {
                expected: header.data().to_vec(),
            },
        })
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.digest.algorithm()
    }

    pub fn is_verifier(&self) -> bool {
        matches!(self.mode, TagMode::Verify { .. })
    }

    /// Digest the whole source, then write header + payload into `sink`.
    ///
    /// Only valid on an engine built by [`DigestEngine::hash`].
    pub fn save<W: Write>(self, mut sink: W) -> Result<()> {
        if self.mode != TagMode::Produce {
            return Err(PbeError::WrongMode {
                mode: self.mode.name(),
                call: "save",
            });
        }
        let Self {
            mut source,
            mut digest,
            ..
        } = self;
        let algorithm = digest.algorithm();

        let payload = drain_with_copy(&mut source, |chunk| digest.update(chunk))?;
        write_tagged(&mut sink, algorithm.into(), digest.finalize(), &payload)?;

        info!(%algorithm, bytes = payload.len(), "digest container written");
        Ok(())
    }

    /// Digest the rest of the source chunk by chunk and compare with the header
    /// in constant time.
    ///
    /// A mismatch is `Ok(false)`. Only valid on an engine built by
    /// [`DigestEngine::verify_hash`].
    pub fn verify(self) -> Result<bool> {
        let Self {
            mut source,
            mut digest,
            mode,
        } = self;
        let mode_name = mode.name();
        let TagMode::Verify { expected } = mode else {
            return Err(PbeError::WrongMode {
                mode: mode_name,
                call: "verify",
            });
        };
        let algorithm = digest.algorithm();

        let bytes = stream::drain(&mut source, |chunk| {
            digest.update(chunk);
            Ok(())
        })?;
        let computed = digest.finalize();
        let ok =
            computed.len() == expected.len() && computed.as_slice().ct_eq(expected.as_slice());

        if ok {
            info!(%algorithm, bytes, "digest verified");
        } else {
            warn!(%algorithm, "digest mismatch");
        }
        Ok(ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn secret() -> PasswordString {
        PasswordString::new("Spike".to_string())
    }

    #[test]
    fn wrong_terminal_is_rejected() {
        let producer = DigestEngine::hash(Cursor::new(b"a"), HashAlgorithm::Sha1, &secret()).unwrap();
        assert!(matches!(
            producer.verify(),
            Err(PbeError::WrongMode { call: "verify", .. })
        ));

        let mut container = Vec::new();
        DigestEngine::hash(Cursor::new(b"a"), HashAlgorithm::Sha1, &secret())
            .unwrap()
            .save(&mut container)
            .unwrap();
        let verifier = DigestEngine::verify_hash(Cursor::new(container), &secret()).unwrap();
        assert!(verifier.is_verifier());
        assert!(matches!(
            verifier.save(Vec::new()),
            Err(PbeError::WrongMode { call: "save", .. })
        ));
    }

    #[test]
    fn verify_streams_payloads_larger_than_one_chunk() {
        use crate::consts::STREAM_CHUNK_SIZE;
        use std::io::Read;

        let len = (4 * STREAM_CHUNK_SIZE + 3) as u64;
        let mut container = Vec::new();
        DigestEngine::hash(std::io::repeat(0x5a).take(len), HashAlgorithm::Sha512, &secret())
            .unwrap()
            .save(&mut container)
            .unwrap();
        assert_eq!(container.len() as u64, 14 + 64 + len);

        let verifier = DigestEngine::verify_hash(Cursor::new(&container), &secret()).unwrap();
        assert!(verifier.verify().unwrap());
    }

    #[test]
    fn short_stored_digest_is_a_mismatch() {
        let header = Header::new(
            Operation::HashOrMac,
            crate::registry::CipherAlgorithm::PbeWithMd5AndDes,
            AuthAlgorithm::Hash(HashAlgorithm::Sha256),
            vec![0; 31],
        )
        .unwrap();
        let verifier =
            DigestEngine::verify_hash(Cursor::new(header.encode().unwrap()), &secret()).unwrap();
        assert!(!verifier.verify().unwrap());
    }

    #[test]
    fn mac_container_is_not_a_hash() {
        let header = Header::new(
            Operation::HashOrMac,
            crate::registry::CipherAlgorithm::PbeWithMd5AndDes,
            AuthAlgorithm::Mac(crate::registry::MacAlgorithm::HmacSha1),
            vec![0; 20],
        )
        .unwrap();
        let result = DigestEngine::verify_hash(Cursor::new(header.encode().unwrap()), &secret());
        assert!(matches!(
            result,
            Err(PbeError::UnexpectedAlgorithm {
                expected: Category::Hash,
                found: "HmacSHA1"
            })
        ));
    }
}
