//! # Key Derivation Functions (KDF)
//!
//! Converts passwords into cipher keys/IVs and MAC keys.
//!
//! ## Modules
//!
//! - [`pbes1`] - MD5-based PBES1 (`PBEWithMD5andDES`, `PBEWithMD5andTripleDES`)
//! - [`pkcs12`] - PKCS#12 SHA-1 derivation (`PBEWithSHA1andDESede`, `PBEWithSHA1andRC2_40`)
//! - [`pbkdf2`] - PBKDF2-HMAC-SHA1 for the MAC engine
//!
//! Most callers never touch these directly: the engines derive everything from
//! the password, the header salt and the iteration count.

pub mod pbes1;
pub mod pbkdf2;
pub mod pkcs12;

use secure_gate::Dynamic;
use tracing::debug;

use crate::aliases::{
    DesKey8, Iv8, PasswordString, Pbes1Block16, Pbes1Block32, Rc2Key5, Salt8, TdesKey24,
};
use crate::consts::{MAX_ITERATIONS, MIN_ITERATIONS};
use crate::error::{PbeError, Result};
use crate::registry::CipherAlgorithm;
use crate::utils::{ascii_to_bmp_string, pbe_password_bytes};

use self::pbes1::{derive_md5_triple_des, derive_pbkdf1_md5};
use self::pkcs12::{derive_pkcs12_sha1, IV_MATERIAL_ID, KEY_MATERIAL_ID};

/// Key and IV for one PBE cipher, sized for its primitive.
pub enum CipherMaterial {
    Des { key: DesKey8, iv: Iv8 },
    TripleDes { key: TdesKey24, iv: Iv8 },
    Rc2_40 { key: Rc2Key5, iv: Iv8 },
}

/// Reject iteration counts outside `MIN_ITERATIONS..=MAX_ITERATIONS`.
#[inline]
pub fn check_iterations(iterations: u32) -> Result<()> {
    if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&iterations) {
        return Err(PbeError::InvalidIterations(iterations));
    }
    Ok(())
}

/// Derive the key/IV pair for `algorithm` from `(password, salt, iterations)`.
pub fn derive_cipher_material(
    algorithm: CipherAlgorithm,
    password: &PasswordString,
    salt: &Salt8,
    iterations: u32,
) -> Result<CipherMaterial> {
    check_iterations(iterations)?;
    let password = pbe_password_bytes(password.expose_secret())?;

    debug!(%algorithm, iterations, "deriving PBE key material");

    let material = match algorithm {
        CipherAlgorithm::PbeWithMd5AndDes => {
            let mut block = Pbes1Block16::new([0u8; 16]);
            derive_pbkdf1_md5(password, salt, iterations, &mut block);

            let mut key = DesKey8::new([0u8; 8]);
            let mut iv = Iv8::new([0u8; 8]);
            key.expose_secret_mut().copy_from_slice(&block.expose_secret()[..8]);
            iv.expose_secret_mut().copy_from_slice(&block.expose_secret()[8..]);
            CipherMaterial::Des { key, iv }
        }
        CipherAlgorithm::PbeWithMd5AndTripleDes => {
            let mut block = Pbes1Block32::new([0u8; 32]);
            derive_md5_triple_des(password, salt, iterations, &mut block);

            let mut key = TdesKey24::new([0u8; 24]);
            let mut iv = Iv8::new([0u8; 8]);
            key.expose_secret_mut().copy_from_slice(&block.expose_secret()[..24]);
            iv.expose_secret_mut().copy_from_slice(&block.expose_secret()[24..]);
            CipherMaterial::TripleDes { key, iv }
        }
        CipherAlgorithm::PbeWithSha1AndDesede => {
            let bmp = Dynamic::<Vec<u8>>::new(ascii_to_bmp_string(password));
            let mut key = TdesKey24::new([0u8; 24]);
            let mut iv = Iv8::new([0u8; 8]);
            pkcs12_pair(&bmp, salt, iterations, key.expose_secret_mut(), iv.expose_secret_mut());
            CipherMaterial::TripleDes { key, iv }
        }
        CipherAlgorithm::PbeWithSha1AndRc2_40 => {
            let bmp = Dynamic::<Vec<u8>>::new(ascii_to_bmp_string(password));
            let mut key = Rc2Key5::new([0u8; 5]);
            let mut iv = Iv8::new([0u8; 8]);
            pkcs12_pair(&bmp, salt, iterations, key.expose_secret_mut(), iv.expose_secret_mut());
            CipherMaterial::Rc2_40 { key, iv }
        }
    };

    Ok(material)
}

fn pkcs12_pair(
    bmp: &Dynamic<Vec<u8>>,
    salt: &Salt8,
    iterations: u32,
    key: &mut [u8],
    iv: &mut [u8],
) {
    let password = bmp.expose_secret();
    derive_pkcs12_sha1(password, salt.expose_secret(), iterations, KEY_MATERIAL_ID, key);
    derive_pkcs12_sha1(password, salt.expose_secret(), iterations, IV_MATERIAL_ID, iv);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_bounds() {
        assert!(check_iterations(1).is_ok());
        assert!(check_iterations(MAX_ITERATIONS).is_ok());
        assert!(matches!(check_iterations(0), Err(PbeError::InvalidIterations(0))));
        assert!(check_iterations(MAX_ITERATIONS + 1).is_err());
    }

    #[test]
    fn non_ascii_password_fails_derivation() {
        let password = PasswordString::new("pässword".to_string());
        let salt = Salt8::new([0u8; 8]);
        let result =
            derive_cipher_material(CipherAlgorithm::PbeWithMd5AndDes, &password, &salt, 10);
        assert!(matches!(result, Err(PbeError::KeyDerivation(_))));
    }
}
