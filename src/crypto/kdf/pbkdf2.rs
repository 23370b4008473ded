//! src/crypto/kdf/pbkdf2.rs

use crate::aliases::{MacKey, PasswordString};
use crate::consts::MAC_KDF_SALT;
use crate::error::{PbeError, Result};

use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha1::Sha1;

/// Derive a MAC key with PBKDF2-HMAC-SHA1 over the fixed MAC salt.
///
/// The secret is used as raw UTF-8, so unlike the PBE ciphers any Unicode
/// secret is accepted.
#[inline]
pub fn derive_secure_mac_key(
    secret: &PasswordString,
    iterations: u32,
    key_len: usize,
) -> Result<MacKey> {
    if iterations == 0 {
        return Err(PbeError::InvalidIterations(iterations));
    }

    let mut key = vec![0u8; key_len];
    pbkdf2::<Hmac<Sha1>>(
        secret.expose_secret().as_bytes(),
        &MAC_KDF_SALT,
        iterations,
        &mut key,
    )
    .map_err(|e| PbeError::KeyDerivation(format!("PBKDF2 failed: {e}")))?;

    Ok(MacKey::new(key))
}
