//! # Error Types
//!
//! Every fallible operation in the crate returns [`Result<T, PbeError>`](PbeError).
//! A failed verification is **not** an error: `verify()` reports it as `Ok(false)`.

use thiserror::Error;

use crate::registry::Category;

/// The error type for all container, KDF and engine operations.
#[derive(Error, Debug)]
pub enum PbeError {
    /// I/O error while reading the source or writing the sink.
    ///
    /// Closing or interrupting a stream mid-operation surfaces here; that is the
    /// only supported way to abort an engine.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An algorithm name is not present in the registry for its category.
    #[error("algorithm not found in {category} registry: {name}")]
    AlgorithmNotFound { category: Category, name: String },

    /// A wire code does not index a valid registry entry.
    #[error("algorithm code {code} out of range for {category} registry")]
    AlgorithmIndexOutOfRange { category: Category, code: u8 },

    /// The first ten bytes of the stream are not the container mark.
    #[error("invalid header mark")]
    InvalidHeaderMark,

    /// The operation byte does not name a known operation.
    #[error("invalid operation code: {0}")]
    InvalidOperation(u8),

    /// The stream ended before the fixed 14-byte header was complete.
    #[error("truncated header: expected {expected} bytes, got {actual}")]
    TruncatedHeader { expected: usize, actual: usize },

    /// The stream ended before the declared header data was complete.
    #[error("truncated header data: expected {expected} bytes, got {actual}")]
    TruncatedData { expected: usize, actual: usize },

    /// Header data cannot be framed with a single length byte.
    #[error("header data too large: {0} bytes (max 255)")]
    DataTooLarge(usize),

    /// The container was produced by a different engine.
    #[error("unexpected operation: expected {expected}, found {found}")]
    UnexpectedOperation {
        expected: &'static str,
        found: &'static str,
    },

    /// The algorithm slot names an algorithm this engine cannot verify.
    #[error("unexpected {expected} algorithm in header: {found}")]
    UnexpectedAlgorithm {
        expected: Category,
        found: &'static str,
    },

    /// Iteration count outside the accepted range.
    #[error("invalid iteration count: {0}")]
    InvalidIterations(u32),

    /// Password-based key derivation failed (bad password encoding, KDF error).
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// The cipher or MAC context rejected the derived key material.
    #[error("transform initialisation failed: {0}")]
    TransformInit(String),

    /// The final ciphertext block does not carry valid PKCS#5 padding.
    ///
    /// In practice this almost always means the password was wrong.
    #[error("invalid padding in final block (wrong password or corrupt data)")]
    InvalidPadding,

    /// The ciphertext is empty or not a whole number of cipher blocks.
    #[error("truncated ciphertext: {0} bytes is not a positive multiple of the block size")]
    TruncatedCiphertext(u64),

    /// A terminal call that does not apply to the engine's mode.
    #[error("engine in {mode} mode does not support {call}()")]
    WrongMode {
        mode: &'static str,
        call: &'static str,
    },

    /// The operating system RNG failed to produce a salt.
    #[error("random generator failure: {0}")]
    Random(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PbeError>;
