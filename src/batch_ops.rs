//! src/batch_ops.rs
//! Parallel encryption/decryption of independent `(source, sink)` pairs

use rayon::prelude::*;
use std::io::{Read, Write};

use crate::aliases::PasswordString;
use crate::engine::CipherEngine;
use crate::error::Result;
use crate::registry::CipherAlgorithm;

/// Encrypt every pair in parallel; each gets its own salt. Stops at the first error.
pub fn encrypt_batch<R, W>(
    batch: &mut [(R, W)],
    algorithm: CipherAlgorithm,
    password: &PasswordString,
    iterations: u32,
) -> Result<()>
where
    R: Read + Send,
    W: Write + Send,
{
    batch.par_iter_mut().try_for_each(|(src, dst)| {
        CipherEngine::encrypt(src, algorithm, password, iterations)?.save(dst)
    })
}

/// Decrypt every pair in parallel. Stops at the first error.
pub fn decrypt_batch<R, W>(
    batch: &mut [(R, W)],
    password: &PasswordString,
    iterations: u32,
) -> Result<()>
where
    R: Read + Send,
    W: Write + Send,
{
    batch
        .par_iter_mut()
        .try_for_each(|(src, dst)| CipherEngine::decrypt(src, password, iterations)?.save(dst))
}
