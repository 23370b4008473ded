//! src/engine/mac.rs
//! HMAC containers keyed by PBKDF2 from a shared secret

use std::io::{Read, Write};

use tracing::{info, warn};

use crate::aliases::PasswordString;
use crate::crypto::mac::TagMac;
use crate::engine::{drain_with_copy, expect_operation, stream, write_tagged, TagMode};
use crate::error::{PbeError, Result};
use crate::header::{Header, Operation};
use crate::registry::{AuthAlgorithm, Category, MacAlgorithm};

/// MAC producer or verifier over a source.
///
/// The key is `PBKDF2-HMAC-SHA1(secret, MAC_KDF_SALT, iterations)` sized to the
/// MAC output, so producer and verifier must agree on `iterations`.
pub struct MacEngine<R> {
    source: R,
    mac: TagMac,
    mode: TagMode,
}

impl<R: Read> MacEngine<R> {
    /// Derive the MAC key and prepare to tag `source`.
    pub fn mac(
        source: R,
        algorithm: MacAlgorithm,
        secret: &PasswordString,
        iterations: u32,
    ) -> Result<Self> {
        Ok(Self {
            source,
            mac: TagMac::new(algorithm, secret, iterations)?,
            mode: TagMode::Produce,
        })
    }

    /// Parse the header from `source`, re-derive the key and prepare to check.
    ///
    /// # Errors
    ///
    /// - header codec errors
    /// - [`PbeError::UnexpectedOperation`] - not a hash/MAC container
    /// - [`PbeError::UnexpectedAlgorithm`] - slot 2 is not a MAC algorithm
    /// - [`PbeError::InvalidIterations`]
    pub fn verify_mac(mut source: R, secret: &PasswordString, iterations: u32) -> Result<Self> {
        let header = Header::decode(&mut source)?;
        expect_operation(&header, Operation::HashOrMac)?;

        let AuthAlgorithm::Mac(algorithm) = header.algorithm2() else {
            return Err(PbeError::UnexpectedAlgorithm {
                expected: Category::Mac,
                found: header.algorithm2().name(),
            });
        };

        Ok(Self {
            source,
            mac: TagMac::new(algorithm, secret, iterations)?,
            mode: TagMode::Verify {
                expected: header.data().to_vec(),
            },
        })
    }

    pub fn algorithm(&self) -> MacAlgorithm {
        self.mac.algorithm()
    }

    pub fn is_verifier(&self) -> bool {
        matches!(self.mode, TagMode::Verify { .. })
    }

    /// Tag the whole source, then write header + payload into `sink`.
    pub fn save<W: Write>(self, mut sink: W) -> Result<()> {
        if self.mode != TagMode::Produce {
            return Err(PbeError::WrongMode {
                mode: self.mode.name(),
                call: "save",
            });
        }
        let Self {
            mut source,
            mut mac,
            ..
        } = self;
        let algorithm = mac.algorithm();

        let payload = drain_with_copy(&mut source, |chunk| mac.update(chunk))?;
        write_tagged(&mut sink, algorithm.into(), mac.finalize(), &payload)?;

        info!(%algorithm, bytes = payload.len(), "MAC container written");
        Ok(())
    }

    /// Tag the rest of the source and compare with the header in constant time.
    ///
    /// A mismatch (wrong secret, wrong iteration count, altered payload) is
    /// `Ok(false)`.
    pub fn verify(self) -> Result<bool> {
        let Self {
            mut source,
            mut mac,
            mode,
        } = self;
        let mode_name = mode.name();
        let TagMode::Verify { expected } = mode else {
            return Err(PbeError::WrongMode {
                mode: mode_name,
                call: "verify",
            });
        };
        let algorithm = mac.algorithm();

        let bytes = stream::drain(&mut source, |chunk| {
            mac.update(chunk);
            Ok(())
        })?;
        let ok = mac.verify(&expected);

        if ok {
            info!(%algorithm, bytes, "MAC verified");
        } else {
            warn!(%algorithm, "MAC mismatch");
        }
        Ok(ok)
    }
}
