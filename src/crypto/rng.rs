// src/crypto/rng.rs
//! Secure randomness for fixed-size secrets.
//!
//! Adds `T::random()` to every `Fixed<[u8; N]>` alias (`Salt8`, …) using a
//! thread-local `OsRng`.

use rand::{rngs::OsRng, TryRngCore};
use secure_gate::Fixed;
use std::cell::RefCell;

use crate::error::{PbeError, Result};

/// Extension trait – gives `.random()` to all fixed-size secret types
pub trait SecureRandomExt: Sized {
    /// Generate a cryptographically secure random instance of this type
    fn random() -> Result<Self>;
}

thread_local! {
    static RNG: RefCell<OsRng> = const { RefCell::new(OsRng) };
}

impl<const N: usize> SecureRandomExt for Fixed<[u8; N]> {
    #[inline]
    fn random() -> Result<Self> {
        RNG.with(|rng_cell| {
            let mut rng = rng_cell.borrow_mut();
            let mut bytes = [0u8; N];
            rng.try_fill_bytes(&mut bytes)
                .map_err(|e| PbeError::Random(e.to_string()))?;
            Ok(Fixed::new(bytes))
        })
    }
}
