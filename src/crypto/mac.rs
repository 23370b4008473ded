//! src/crypto/mac.rs
//! HMAC contexts keyed from a shared secret via PBKDF2-HMAC-SHA1.

use hmac::{Hmac, Mac};
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use tracing::debug;

use crate::aliases::PasswordString;
use crate::crypto::kdf::check_iterations;
use crate::crypto::kdf::pbkdf2::derive_secure_mac_key;
use crate::error::{PbeError, Result};
use crate::registry::MacAlgorithm;

pub type HmacMd5 = Hmac<Md5>;
pub type HmacSha1 = Hmac<Sha1>;
pub type HmacSha256 = Hmac<Sha256>;
pub type HmacSha384 = Hmac<Sha384>;
pub type HmacSha512 = Hmac<Sha512>;

/// Object-safe view over the concrete `Hmac<D>` types.
trait DynMac: Send {
    fn update(&mut self, data: &[u8]);
    fn finalize(self: Box<Self>) -> Vec<u8>;
    fn verify(self: Box<Self>, tag: &[u8]) -> bool;
}

impl<M: Mac + Send> DynMac for M {
    fn update(&mut self, data: &[u8]) {
        Mac::update(self, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Mac::finalize(*self).into_bytes().to_vec()
    }

    fn verify(self: Box<Self>, tag: &[u8]) -> bool {
        Mac::verify_slice(*self, tag).is_ok()
    }
}

fn keyed<M>(algorithm: MacAlgorithm, key: &[u8]) -> Result<Box<dyn DynMac>>
where
    M: Mac + hmac::digest::KeyInit + Send + 'static,
{
    let mac = <M as Mac>::new_from_slice(key)
        .map_err(|e| PbeError::TransformInit(format!("{algorithm} key: {e}")))?;
    Ok(Box::new(mac))
}

/// A MAC context whose key was derived from the shared secret.
pub struct TagMac {
    algorithm: MacAlgorithm,
    inner: Box<dyn DynMac>,
}

impl TagMac {
    /// Derive the key ([`MacAlgorithm::key_len`] bytes) and initialise the MAC.
    pub fn new(algorithm: MacAlgorithm, secret: &PasswordString, iterations: u32) -> Result<Self> {
        check_iterations(iterations)?;
        let key = derive_secure_mac_key(secret, iterations, algorithm.key_len())?;
        let key = key.expose_secret();
        debug!(%algorithm, iterations, key_len = key.len(), "MAC key derived");

        let inner = match algorithm {
            MacAlgorithm::HmacMd5 => keyed::<HmacMd5>(algorithm, key)?,
            MacAlgorithm::HmacSha1 => keyed::<HmacSha1>(algorithm, key)?,
            MacAlgorithm::HmacSha256 => keyed::<HmacSha256>(algorithm, key)?,
            MacAlgorithm::HmacSha384 => keyed::<HmacSha384>(algorithm, key)?,
            MacAlgorithm::HmacSha512 => keyed::<HmacSha512>(algorithm, key)?,
        };
        Ok(Self { algorithm, inner })
    }

    pub fn algorithm(&self) -> MacAlgorithm {
        self.algorithm
    }

    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    pub fn finalize(self) -> Vec<u8> {
        self.inner.finalize()
    }

    /// Constant-time comparison against an expected tag.
    pub fn verify(self, tag: &[u8]) -> bool {
        self.inner.verify(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_lengths_match_registry() {
        let secret = PasswordString::new("Spike".to_string());
        for &algorithm in MacAlgorithm::ALL {
            let tag = TagMac::new(algorithm, &secret, 2).unwrap().finalize();
            assert_eq!(tag.len(), algorithm.output_len(), "{algorithm}");
        }
    }

    #[test]
    fn hmac_sha256_known_answer() {
        let secret = PasswordString::new("Spike".to_string());
        let mut mac = TagMac::new(MacAlgorithm::HmacSha256, &secret, 1024).unwrap();
        mac.update(b"I think it's time we blow this scene. \n");
        mac.update(b"Get everybody and the stuff together \n");
        mac.update(b"Okay: 3, 2, 1, let's jam!");
        assert_eq!(
            hex::encode(mac.finalize()),
            "3e2c96dfb72c1555d2a724b03e42badfe7ce4b75d24c3433293df51714ca18ef"
        );
    }
}
