//! src/builders/pbe_builder.rs
//! Fluent configuration for every container operation

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::aliases::PasswordString;
use crate::consts::DEFAULT_ITERATIONS;
use crate::engine::{CipherEngine, DigestEngine, MacEngine};
use crate::error::Result;
use crate::file_ops;
use crate::registry::{CipherAlgorithm, HashAlgorithm, MacAlgorithm};

/// Algorithm choice + iteration count, with defaults.
///
/// | setting | default |
/// |---|---|
/// | cipher | `PBEWithMD5andDES` |
/// | hash | `SHA-256` |
/// | mac | `HmacSHA256` |
/// | iterations | [`DEFAULT_ITERATIONS`] (1024) |
///
/// Iterations are validated when an engine is built, not here.
///
/// # Thread Safety
///
/// `Copy + Send + Sync`: holds no secrets, only choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PbeBuilder {
    cipher: CipherAlgorithm,
    hash: HashAlgorithm,
    mac: MacAlgorithm,
    iterations: u32,
}

impl PbeBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cipher: CipherAlgorithm::PbeWithMd5AndDes,
            hash: HashAlgorithm::Sha256,
            mac: MacAlgorithm::HmacSha256,
            iterations: DEFAULT_ITERATIONS,
        }
    }

    #[must_use]
    pub const fn with_cipher(mut self, cipher: CipherAlgorithm) -> Self {
        self.cipher = cipher;
        self
    }

    #[must_use]
    pub const fn with_hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }

    #[must_use]
    pub const fn with_mac(mut self, mac: MacAlgorithm) -> Self {
        self.mac = mac;
        self
    }

    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub const fn cipher(&self) -> CipherAlgorithm {
        self.cipher
    }

    pub const fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    pub const fn mac(&self) -> MacAlgorithm {
        self.mac
    }

    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    // ── stream finishers ─────────────────────────────────────────────────

    pub fn encrypt<R: Read>(&self, source: R, password: &PasswordString) -> Result<CipherEngine<R>> {
        CipherEngine::encrypt(source, self.cipher, password, self.iterations)
    }

    pub fn decrypt<R: Read>(&self, source: R, password: &PasswordString) -> Result<CipherEngine<R>> {
        CipherEngine::decrypt(source, password, self.iterations)
    }

    pub fn hash_stream<R: Read>(&self, source: R, secret: &PasswordString) -> Result<DigestEngine<R>> {
        DigestEngine::hash(source, self.hash, secret)
    }

    pub fn verify_hash<R: Read>(&self, source: R, secret: &PasswordString) -> Result<DigestEngine<R>> {
        DigestEngine::verify_hash(source, secret)
    }

    pub fn mac_stream<R: Read>(&self, source: R, secret: &PasswordString) -> Result<MacEngine<R>> {
        MacEngine::mac(source, self.mac, secret, self.iterations)
    }

    pub fn verify_mac<R: Read>(&self, source: R, secret: &PasswordString) -> Result<MacEngine<R>> {
        MacEngine::verify_mac(source, secret, self.iterations)
    }

    // ── file finishers ───────────────────────────────────────────────────

    pub fn encrypt_file<P: AsRef<Path>>(&self, input: P, password: &PasswordString) -> Result<PathBuf> {
        file_ops::encrypt_file(input, self.cipher, password, self.iterations)
    }

    pub fn decrypt_file<P: AsRef<Path>>(&self, input: P, password: &PasswordString) -> Result<PathBuf> {
        file_ops::decrypt_file(input, password, self.iterations)
    }

    pub fn hash_file<P: AsRef<Path>>(&self, input: P, secret: &PasswordString) -> Result<PathBuf> {
        file_ops::hash_file(input, self.hash, secret)
    }

    pub fn mac_file<P: AsRef<Path>>(&self, input: P, secret: &PasswordString) -> Result<PathBuf> {
        file_ops::mac_file(input, self.mac, secret, self.iterations)
    }

    pub fn verify_file<P: AsRef<Path>>(&self, input: P, secret: &PasswordString) -> Result<bool> {
        file_ops::verify_file(input, secret, self.iterations)
    }
}

impl Default for PbeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
