//! src/crypto/digest.rs
//! Secret-prefixed digest: `H(secret || data)`
//!
//! A lightweight shared-secret integrity check, **not** an HMAC: it is open to
//! length extension for the Merkle–Damgård digests. `MD2` and `MD5` are broken.

use digest::DynDigest;
use md2::Md2;
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::aliases::PasswordString;
use crate::registry::HashAlgorithm;

/// Fresh, unkeyed digest context for `algorithm`.
pub fn new_digest(algorithm: HashAlgorithm) -> Box<dyn DynDigest + Send> {
    match algorithm {
        HashAlgorithm::Md2 => Box::new(Md2::default()),
        HashAlgorithm::Md5 => Box::new(Md5::default()),
        HashAlgorithm::Sha1 => Box::new(Sha1::default()),
        HashAlgorithm::Sha256 => Box::new(Sha256::default()),
        HashAlgorithm::Sha384 => Box::new(Sha384::default()),
        HashAlgorithm::Sha512 => Box::new(Sha512::default()),
    }
}

/// Digest context already fed the secret's UTF-8 bytes.
pub struct KeyedDigest {
    algorithm: HashAlgorithm,
    inner: Box<dyn DynDigest + Send>,
}

impl KeyedDigest {
    pub fn new(algorithm: HashAlgorithm, secret: &PasswordString) -> Self {
        let mut inner = new_digest(algorithm);
        inner.update(secret.expose_secret().as_bytes());
        Self { algorithm, inner }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    pub fn finalize(self) -> Vec<u8> {
        self.inner.finalize().into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_lengths_match_registry() {
        for &algorithm in HashAlgorithm::ALL {
            let secret = PasswordString::new("k".to_string());
            let tag = KeyedDigest::new(algorithm, &secret).finalize();
            assert_eq!(tag.len(), algorithm.output_len(), "{algorithm}");
        }
    }

    #[test]
    fn secret_is_a_prefix() {
        let secret = PasswordString::new("Spike".to_string());
        let mut keyed = KeyedDigest::new(HashAlgorithm::Md5, &secret);
        keyed.update(b"payload");

        let mut plain = new_digest(HashAlgorithm::Md5);
        plain.update(b"Spikepayload");

        assert_eq!(keyed.finalize(), plain.finalize().into_vec());
    }
}
