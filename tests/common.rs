//! tests/common.rs
//! Common constants and helpers shared across test files

#![allow(dead_code)] // each test crate uses a different subset

use pbe_container::aliases::PasswordString;
use pbe_container::{CipherAlgorithm, CipherEngine, PbeError};
use std::io::Cursor;

/// Fast iteration count for tests - performance testing is in benches/
pub const TEST_ITERATIONS: u32 = 5;

/// Iteration count used by the known-answer vectors.
pub const KAT_ITERATIONS: u32 = 1024;

/// Salt used by the known-answer vectors.
pub const KAT_SALT: [u8; 8] = [0x7d, 0x60, 0x43, 0x5f, 0x02, 0x09, 0x0f, 0x0a];

pub const TEST_PASSWORD: &str = "pw123";

pub const TEST_SECRET: &str = "Spike";

/// Payload used by the digest and MAC known-answer vectors.
pub const SPIKE_PAYLOAD: &[u8] = b"I think it's time we blow this scene. \n\
Get everybody and the stuff together \n\
Okay: 3, 2, 1, let's jam!";

pub const MARK: [u8; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0];

/// Route library `tracing` events to the test writer (`RUST_LOG=debug` to see them).
pub fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

pub fn password(text: &str) -> PasswordString {
    PasswordString::new(text.to_string())
}

/// Encrypt `data` into a fresh container.
pub fn encrypt_to_vec(
    data: &[u8],
    algorithm: CipherAlgorithm,
    password: &PasswordString,
    iterations: u32,
) -> Vec<u8> {
    let mut out = Vec::new();
    CipherEngine::encrypt(Cursor::new(data), algorithm, password, iterations)
        .unwrap()
        .save(&mut out)
        .unwrap();
    out
}

/// Decrypt a container, surfacing any error.
pub fn decrypt_to_vec(
    container: &[u8],
    password: &PasswordString,
    iterations: u32,
) -> Result<Vec<u8>, PbeError> {
    let mut out = Vec::new();
    CipherEngine::decrypt(Cursor::new(container), password, iterations)?.save(&mut out)?;
    Ok(out)
}
