//! src/crypto/kdf/pbes1.rs
//! MD5-based PBES1 derivations: out-param, secure-gate buffers
//!
//! Both schemes are cryptographically weak (MD5, 64-bit salt). They exist for
//! format compatibility only.

use crate::aliases::{Pbes1Block16, Pbes1Block32, Salt8};
use md5::{Digest, Md5};

/// PBKDF1-MD5 (PKCS#5 v1.5): 16 bytes: DES key (0..8) || IV (8..16).
///
/// `T1 = MD5(password || salt)`, `Ti = MD5(Ti-1)`, `iterations` rounds total.
#[inline]
pub fn derive_pbkdf1_md5(
    password: &[u8],
    salt: &Salt8,
    iterations: u32,
    out: &mut Pbes1Block16,
) {
    let mut hasher = Md5::new();
    hasher.update(password);
    hasher.update(salt.expose_secret());
    let mut block: [u8; 16] = hasher.finalize_reset().into();

    for _ in 1..iterations {
        hasher.update(block);
        block = hasher.finalize_reset().into();
    }

    out.expose_secret_mut().copy_from_slice(&block);
}

/// SunJCE `PBEWithMD5AndTripleDES`: 32 bytes: 3DES key (0..24) || IV (24..32).
///
/// Each salt half is hashed separately, `iterations` times, as
/// `Hi = MD5(Hi-1 || password)` with `H0 = half`. When both halves are equal,
/// the first half is permuted first; the permutation reproduces the provider
/// byte for byte, including its odd swap.
#[inline]
pub fn derive_md5_triple_des(
    password: &[u8],
    salt: &Salt8,
    iterations: u32,
    out: &mut Pbes1Block32,
) {
    let mut salt_bytes = *salt.expose_secret();
    if salt_bytes[..4] == salt_bytes[4..] {
        for i in 0..2 {
            let tmp = salt_bytes[i];
            salt_bytes[i] = salt_bytes[3 - i];
            salt_bytes[2] = tmp;
        }
    }

    let mut hasher = Md5::new();
    for (half, chunk) in salt_bytes.chunks_exact(4).enumerate() {
        hasher.update(chunk);
        hasher.update(password);
        let mut block: [u8; 16] = hasher.finalize_reset().into();

        for _ in 1..iterations {
            hasher.update(block);
            hasher.update(password);
            block = hasher.finalize_reset().into();
        }

        out.expose_secret_mut()[half * 16..(half + 1) * 16].copy_from_slice(&block);
    }
}
