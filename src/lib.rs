// src/lib.rs

//! Password-based containers: PBE encryption, secret-prefixed digests and
//! PBKDF2-keyed HMACs behind one self-describing header.
//!
//! ```no_run
//! use pbe_container::aliases::PasswordString;
//! use std::io::Cursor;
//!
//! let password = PasswordString::new("pw123".to_string());
//! let mut container = Vec::new();
//! pbe_container::encrypt(Cursor::new(b"hello world"), "PBEWithMD5andDES", &password, 1024)?
//!     .save(&mut container)?;
//!
//! let mut plain = Vec::new();
//! pbe_container::decrypt(Cursor::new(container), &password, 1024)?.save(&mut plain)?;
//! assert_eq!(plain, b"hello world");
//! # Ok::<(), pbe_container::PbeError>(())
//! ```
//!
//! Every scheme here is legacy-grade (DES, RC2-40, MD2/MD5, PBES1). Use it for
//! interoperability, not for new designs.

pub mod aliases;
#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod builders;
pub mod consts;
pub mod crypto;
pub mod engine;
pub mod error;
pub mod file_ops;
pub mod header;
pub mod registry;
pub mod utils;

use std::io::Read;

use crate::aliases::PasswordString;

pub use builders::PbeBuilder;
pub use engine::{CipherEngine, DigestEngine, MacEngine};
pub use error::{PbeError, Result};
pub use header::{read_header, Header, Operation};
pub use registry::{AuthAlgorithm, Category, CipherAlgorithm, HashAlgorithm, MacAlgorithm};

pub use file_ops::{decrypt_file, encrypt_file, hash_file, mac_file, verify_file};

#[cfg(feature = "batch-ops")]
pub use batch_ops::{decrypt_batch, encrypt_batch};

/// Encrypt `source` with the named PBE cipher (case-insensitive).
///
/// Unknown names fail with [`PbeError::AlgorithmNotFound`].
pub fn encrypt<R: Read>(
    source: R,
    cipher: &str,
    password: &PasswordString,
    iterations: u32,
) -> Result<CipherEngine<R>> {
    CipherEngine::encrypt(source, cipher.parse()?, password, iterations)
}

/// Decrypt a cipher container; the algorithm and salt come from its header.
pub fn decrypt<R: Read>(
    source: R,
    password: &PasswordString,
    iterations: u32,
) -> Result<CipherEngine<R>> {
    CipherEngine::decrypt(source, password, iterations)
}

/// Build a keyed-digest container with the named hash (case-insensitive).
pub fn hash<R: Read>(source: R, hash: &str, secret: &PasswordString) -> Result<DigestEngine<R>> {
    DigestEngine::hash(source, hash.parse()?, secret)
}

pub fn verify_hash<R: Read>(source: R, secret: &PasswordString) -> Result<DigestEngine<R>> {
    DigestEngine::verify_hash(source, secret)
}

/// Build a MAC container with the named HMAC (case-insensitive).
pub fn mac<R: Read>(
    source: R,
    mac: &str,
    secret: &PasswordString,
    iterations: u32,
) -> Result<MacEngine<R>> {
    MacEngine::mac(source, mac.parse()?, secret, iterations)
}

pub fn verify_mac<R: Read>(
    source: R,
    secret: &PasswordString,
    iterations: u32,
) -> Result<MacEngine<R>> {
    MacEngine::verify_mac(source, secret, iterations)
}
