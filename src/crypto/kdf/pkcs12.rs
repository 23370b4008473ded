//! src/crypto/kdf/pkcs12.rs
//! PKCS#12 key derivation (RFC 7292, Appendix B.2) over SHA-1

use sha1::{Digest, Sha1};

/// Diversifier for cipher key material.
pub const KEY_MATERIAL_ID: u8 = 1;
/// Diversifier for IV material.
pub const IV_MATERIAL_ID: u8 = 2;

/// SHA-1 output length (`u`).
const HASH_LEN: usize = 20;
/// SHA-1 block length (`v`).
const BLOCK_LEN: usize = 64;

/// Derive `out.len()` bytes of PKCS#12 material.
///
/// `bmp_password` must already be the NUL-terminated BMPString
/// (see [`ascii_to_bmp_string`](crate::utils::ascii_to_bmp_string)).
pub fn derive_pkcs12_sha1(
    bmp_password: &[u8],
    salt: &[u8],
    iterations: u32,
    id: u8,
    out: &mut [u8],
) {
    let diversifier = [id; BLOCK_LEN];

    let mut input = stretch(salt);
    input.extend_from_slice(&stretch(bmp_password));

    let mut hasher = Sha1::new();
    for chunk in out.chunks_mut(HASH_LEN) {
        hasher.update(diversifier);
        hasher.update(&input);
        let mut block: [u8; HASH_LEN] = hasher.finalize_reset().into();
        for _ in 1..iterations {
            hasher.update(block);
            block = hasher.finalize_reset().into();
        }
        chunk.copy_from_slice(&block[..chunk.len()]);

        // I_j = (I_j + B + 1) mod 2^(8v), B = block repeated to v bytes
        let mut filler = [0u8; BLOCK_LEN];
        for (dst, src) in filler.iter_mut().zip(block.iter().cycle()) {
            *dst = *src;
        }
        for segment in input.chunks_exact_mut(BLOCK_LEN) {
            add_one_plus(segment, &filler);
        }
    }
}

/// Repeat `input` to the next multiple of the block length (empty stays empty).
fn stretch(input: &[u8]) -> Vec<u8> {
    let len = input.len().div_ceil(BLOCK_LEN) * BLOCK_LEN;
    input.iter().cycle().take(len).copied().collect()
}

/// Big-endian `segment = segment + addend + 1`, discarding the final carry.
fn add_one_plus(segment: &mut [u8], addend: &[u8; BLOCK_LEN]) {
    let mut carry: u16 = 1;
    for (byte, add) in segment.iter_mut().zip(addend.iter()).rev() {
        let sum = u16::from(*byte) + u16::from(*add) + carry;
        *byte = sum as u8;
        carry = sum >> 8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ascii_to_bmp_string;

    const SALT: [u8; 8] = [0x7d, 0x60, 0x43, 0x5f, 0x02, 0x09, 0x0f, 0x0a];

    #[test]
    fn sha1_key_and_iv_known_answer() {
        let password = ascii_to_bmp_string(b"pw123");

        let mut key = [0u8; 24];
        derive_pkcs12_sha1(&password, &SALT, 1024, KEY_MATERIAL_ID, &mut key);
        assert_eq!(
            hex::encode(key),
            "697f0dc56513e207597836546cd951cd162483a1c09a488f"
        );

        let mut iv = [0u8; 8];
        derive_pkcs12_sha1(&password, &SALT, 1024, IV_MATERIAL_ID, &mut iv);
        assert_eq!(hex::encode(iv), "b599514d4b8335e5");
    }

    #[test]
    fn short_output_is_prefix_of_long_output() {
        let password = ascii_to_bmp_string(b"pw123");
        let mut short = [0u8; 5];
        let mut long = [0u8; 24];
        derive_pkcs12_sha1(&password, &SALT, 1024, KEY_MATERIAL_ID, &mut short);
        derive_pkcs12_sha1(&password, &SALT, 1024, KEY_MATERIAL_ID, &mut long);
        assert_eq!(short, long[..5]);
    }

    #[test]
    fn addition_carries_across_bytes() {
        let mut segment = [0xFFu8; BLOCK_LEN];
        add_one_plus(&mut segment, &[0u8; BLOCK_LEN]);
        assert!(segment.iter().all(|b| *b == 0));
    }
}
