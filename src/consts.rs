//! # Constants
//!
//! Wire-format constants, iteration bounds and defaults shared by every engine.

/// Format sentinel written at the start of every container.
pub const HEADER_MARK: [u8; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0];

/// Length of [`HEADER_MARK`].
pub const HEADER_MARK_LEN: usize = HEADER_MARK.len();

/// Fixed part of the header: mark + operation + two algorithm codes + data length.
pub const HEADER_FIXED_LEN: usize = HEADER_MARK_LEN + 4;

/// Largest opaque data blob a header can carry (single length byte).
pub const HEADER_MAX_DATA_LEN: usize = u8::MAX as usize;

/// Salt length used by every PBE cipher.
pub const PBE_SALT_LEN: usize = 8;

/// Fixed salt for the MAC engine's PBKDF2 key derivation.
///
/// Public by construction: the MAC key depends only on the shared secret and
/// the iteration count, so both sides can re-derive it without the header.
pub const MAC_KDF_SALT: [u8; 8] = [0x00, 0x10, 0x21, 0x32, 0x43, 0x54, 0x65, 0x77];

/// Minimum allowed iteration count.
pub const MIN_ITERATIONS: u32 = 1;

/// Maximum allowed iteration count.
///
/// Keeps a hostile or mistyped value from pinning the CPU for hours.
pub const MAX_ITERATIONS: u32 = 5_000_000;

/// Default iteration count for both the PBE ciphers and the MAC KDF.
pub const DEFAULT_ITERATIONS: u32 = 1024;

/// Chunk size for streaming reads. Output never depends on it.
pub const STREAM_CHUNK_SIZE: usize = 64 * 1024;

/// Suffix appended to encrypted, hashed and MAC'd outputs.
pub const CIPHER_SUFFIX: &str = "cph";

/// Suffix appended to decrypted outputs.
pub const CLEAR_SUFFIX: &str = "clr";
