// src/crypto/mod.rs

//! Low-level crypto plumbing: KDFs, the streaming CBC transform, keyed
//! digests, MAC contexts and salt generation.
//!
//! The engines in [`crate::engine`] are the intended entry points; these
//! modules are public for custom flows and known-answer testing.

pub mod block;
pub mod digest;
pub mod kdf;
pub mod mac;
pub mod rng;
