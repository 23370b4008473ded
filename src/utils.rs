//! Utility functions used across the library.

use crate::error::{PbeError, Result};

/// Validates a PBE password and returns its bytes.
///
/// PBE passwords are restricted to printable ASCII (`0x20..=0x7E`), the same
/// rule the JCE provider applies, so that both the one-byte-per-char PBES1
/// encoding and the BMPString PKCS#12 encoding are unambiguous.
#[inline]
pub fn pbe_password_bytes(password: &str) -> Result<&[u8]> {
    if let Some(bad) = password.chars().find(|c| !(' '..='~').contains(c)) {
        return Err(PbeError::KeyDerivation(format!(
            "PBE password must be printable ASCII (found U+{:04X})",
            bad as u32
        )));
    }
    Ok(password.as_bytes())
}

/// Converts an ASCII password to a NUL-terminated UTF-16BE BMPString (PKCS#12).
///
/// An empty password still yields the two-byte terminator.
#[inline]
pub fn ascii_to_bmp_string(ascii: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(ascii.len() * 2 + 2);
    for &byte in ascii {
        output.extend_from_slice(&u16::from(byte).to_be_bytes());
    }
    output.extend_from_slice(&[0x00, 0x00]);
    output
}
