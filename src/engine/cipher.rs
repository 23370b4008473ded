//! src/engine/cipher.rs
//! Password-based encryption and decryption of a payload stream

use std::io::{Read, Write};

use tracing::info;

use crate::aliases::{PasswordString, Salt8};
use crate::consts::PBE_SALT_LEN;
use crate::crypto::block::{CipherStream, Direction};
use crate::crypto::kdf::derive_cipher_material;
use crate::crypto::rng::SecureRandomExt;
use crate::engine::expect_operation;
use crate::engine::stream::drain;
use crate::error::{PbeError, Result};
use crate::header::{Header, Operation};
use crate::registry::{AuthAlgorithm, CipherAlgorithm};

/// Streaming PBE cipher over a source.
///
/// Built by [`CipherEngine::encrypt`] or [`CipherEngine::decrypt`]; consumed by
/// [`CipherEngine::save`].
pub struct CipherEngine<R> {
    source: R,
    header: Header,
    stream: CipherStream,
}

impl<R: Read> CipherEngine<R> {
    /// Prepare to encrypt `source` under a fresh random 8-byte salt.
    ///
    /// # Errors
    ///
    /// - [`PbeError::InvalidIterations`] - `iterations` outside `1..=5_000_000`
    /// - [`PbeError::KeyDerivation`] - password is not printable ASCII
    /// - [`PbeError::Random`] - the OS RNG failed
    pub fn encrypt(
        source: R,
        algorithm: CipherAlgorithm,
        password: &PasswordString,
        iterations: u32,
    ) -> Result<Self> {
        let salt = Salt8::random()?;
        Self::encrypt_with_salt(source, algorithm, password, iterations, &salt)
    }

    /// Like [`CipherEngine::encrypt`] with a caller-chosen salt.
    ///
    /// Reusing a salt with the same password reuses the key **and** IV. Meant
    /// for reproducible output in tests.
    pub fn encrypt_with_salt(
        source: R,
        algorithm: CipherAlgorithm,
        password: &PasswordString,
        iterations: u32,
        salt: &Salt8,
    ) -> Result<Self> {
        let material = derive_cipher_material(algorithm, password, salt, iterations)?;
        let stream = CipherStream::new(&material, Direction::Encrypt)?;
        let header = Header::new(
            Operation::SymmetricCipher,
            algorithm,
            AuthAlgorithm::None,
            salt.expose_secret().to_vec(),
        )?;

        Ok(Self {
            source,
            header,
            stream,
        })
    }

    /// Parse the container header from `source` and prepare to decrypt the rest.
    ///
    /// # Errors
    ///
    /// Header codec errors propagate unchanged. A container produced by a
    /// different engine gives [`PbeError::UnexpectedOperation`].
    pub fn decrypt(mut source: R, password: &PasswordString, iterations: u32) -> Result<Self> {
        let header = Header::decode(&mut source)?;
        expect_operation(&header, Operation::SymmetricCipher)?;

        let salt = <[u8; PBE_SALT_LEN]>::try_from(header.data()).map_err(|_| {
            PbeError::KeyDerivation(format!(
                "salt must be {PBE_SALT_LEN} bytes, header carries {}",
                header.data().len()
            ))
        })?;
        let salt = Salt8::new(salt);

        let material = derive_cipher_material(header.algorithm1(), password, &salt, iterations)?;
        let stream = CipherStream::new(&material, Direction::Decrypt)?;

        Ok(Self {
            source,
            header,
            stream,
        })
    }

    /// Header written (encrypt) or parsed (decrypt) by this engine.
    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn algorithm(&self) -> CipherAlgorithm {
        self.header.algorithm1()
    }

    pub fn direction(&self) -> Direction {
        self.stream.direction()
    }

    /// Run the transform to completion, writing into `sink`.
    ///
    /// Encrypting writes the header in clear followed by the ciphertext;
    /// decrypting writes plaintext only. `sink` is flushed, not closed.
    ///
    /// # Errors
    ///
    /// - [`PbeError::Io`] - reading the source or writing the sink failed
    /// - [`PbeError::TruncatedCiphertext`] - ciphertext empty or misaligned
    /// - [`PbeError::InvalidPadding`] - bad final block (usually a wrong password)
    pub fn save<W: Write>(self, mut sink: W) -> Result<()> {
        let Self {
            mut source,
            header,
            mut stream,
        } = self;
        let direction = stream.direction();

        if direction == Direction::Encrypt {
            header.write_to(&mut sink)?;
        }
        let consumed = drain(&mut source, |chunk| stream.update(chunk, &mut sink))?;
        stream.finish(&mut sink)?;
        sink.flush()?;

        info!(
            algorithm = %header.algorithm1(),
            ?direction,
            bytes = consumed,
            "cipher container processed"
        );
        Ok(())
    }
}
