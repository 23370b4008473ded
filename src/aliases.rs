//! # Secure-Gate Type Aliases
//!
//! Secret-bearing buffers used across the crate. Everything here is zeroized on
//! drop and requires an explicit `.expose_secret()` to read.
//!
//! ## Type Categories
//!
//! ### Dynamic secrets
//! - [`PasswordString`] - PBE password or shared MAC/digest secret
//!
//! ### Fixed-size secrets
//! - [`Salt8`] - 8-byte PBE salt carried in the header
//! - [`DesKey8`] - single DES key
//! - [`TdesKey24`] - three-key triple DES key
//! - [`Rc2Key5`] - 40-bit RC2 key
//! - [`Iv8`] - 8-byte CBC initialization vector
//! - [`Pbes1Block16`] / [`Pbes1Block32`] - raw PBES1 derivation output
//!
//! ### Variable-length derived keys
//! - [`MacKey`] - PBKDF2 output sized to the chosen MAC

use secure_gate::dynamic_alias;
use secure_gate::fixed_alias;

// ─────────────────────────────────────────────────────────────────────────────
// SpanBuffer: generic secure stack buffer
// ─────────────────────────────────────────────────────────────────────────────
pub type SpanBuffer<const N: usize> = secure_gate::Fixed<[u8; N]>;

pub type Pbes1Block16 = SpanBuffer<16>; // PBKDF1-MD5: key || iv
pub type Pbes1Block32 = SpanBuffer<32>; // SunJCE triple DES: key || iv

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────
dynamic_alias!(pub PasswordString, String);
dynamic_alias!(pub MacKey, Vec<u8>);

// ─────────────────────────────────────────────────────────────────────────────
// Fixed-size secrets, alphabetical order
// ─────────────────────────────────────────────────────────────────────────────
fixed_alias!(pub DesKey8, 8);
fixed_alias!(pub Iv8, 8); // CBC IV for every PBE scheme
fixed_alias!(pub Rc2Key5, 5); // 40-bit RC2 key
fixed_alias!(pub Salt8, 8); // header salt
fixed_alias!(pub TdesKey24, 24);
