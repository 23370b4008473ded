// src/file_ops.rs
//! File-level container operations
//!
//! Thin wrappers that open the input and run the matching engine into the
//! `.cph` / `.clr` sibling next to it. Output goes to a temporary file in the
//! same directory and is renamed into place only once the engine succeeds, so
//! a failed run leaves no output behind. Files are closed on every exit path.

use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::aliases::PasswordString;
use crate::consts::{CIPHER_SUFFIX, CLEAR_SUFFIX};
use crate::engine::{CipherEngine, DigestEngine, MacEngine};
use crate::error::{PbeError, Result};
use crate::header::Header;
use crate::registry::{AuthAlgorithm, Category, CipherAlgorithm, HashAlgorithm, MacAlgorithm};

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// `input` + `.cph`: where encrypted, hashed and MAC'd containers go.
pub fn cipher_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    with_suffix(input.as_ref(), CIPHER_SUFFIX)
}

/// `input` + `.clr`: where decrypted plaintext goes.
pub fn clear_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    with_suffix(input.as_ref(), CLEAR_SUFFIX)
}

fn open(path: &Path) -> Result<BufReader<File>> {
    Ok(BufReader::new(File::open(path)?))
}

/// Run `write` against a temporary sibling of `output`, then move it into place.
fn write_output<F>(output: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&File>) -> Result<()>,
{
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = tempfile::Builder::new().prefix(".pbe-").tempfile_in(dir)?;
    debug!(path = %output.display(), temp = %temp.path().display(), "writing output");

    let mut sink = BufWriter::new(temp.as_file());
    write(&mut sink)?;
    sink.flush()?;
    drop(sink);

    temp.persist(output).map_err(|e| e.error)?;
    Ok(())
}

/// Encrypt `input` into `input.cph`. Returns the output path.
pub fn encrypt_file<P: AsRef<Path>>(
    input: P,
    algorithm: CipherAlgorithm,
    password: &PasswordString,
    iterations: u32,
) -> Result<PathBuf> {
    let input = input.as_ref();
    let engine = CipherEngine::encrypt(open(input)?, algorithm, password, iterations)?;
    let output = cipher_output_path(input);
    write_output(&output, |sink| engine.save(sink))?;
    Ok(output)
}

/// Decrypt the container `input` into `input.clr`. Returns the output path.
///
/// The header is validated before any output is created, and a wrong password
/// or damaged ciphertext leaves no `.clr` file.
pub fn decrypt_file<P: AsRef<Path>>(
    input: P,
    password: &PasswordString,
    iterations: u32,
) -> Result<PathBuf> {
    let input = input.as_ref();
    let engine = CipherEngine::decrypt(open(input)?, password, iterations)?;
    let output = clear_output_path(input);
    write_output(&output, |sink| engine.save(sink))?;
    Ok(output)
}

/// Write a keyed-digest container for `input` into `input.cph`.
pub fn hash_file<P: AsRef<Path>>(
    input: P,
    algorithm: HashAlgorithm,
    secret: &PasswordString,
) -> Result<PathBuf> {
    let input = input.as_ref();
    let engine = DigestEngine::hash(open(input)?, algorithm, secret)?;
    let output = cipher_output_path(input);
    write_output(&output, |sink| engine.save(sink))?;
    Ok(output)
}

/// Write a MAC container for `input` into `input.cph`.
pub fn mac_file<P: AsRef<Path>>(
    input: P,
    algorithm: MacAlgorithm,
    secret: &PasswordString,
    iterations: u32,
) -> Result<PathBuf> {
    let input = input.as_ref();
    let engine = MacEngine::mac(open(input)?, algorithm, secret, iterations)?;
    let output = cipher_output_path(input);
    write_output(&output, |sink| engine.save(sink))?;
    Ok(output)
}

/// Verify a hash or MAC container, picking the verifier from header slot 2.
///
/// `iterations` is only used for MAC containers.
///
/// # Errors
///
/// [`PbeError::UnexpectedAlgorithm`] if slot 2 is `none` (a cipher container),
/// plus everything the chosen verifier can return. A mismatch is `Ok(false)`.
pub fn verify_file<P: AsRef<Path>>(
    input: P,
    secret: &PasswordString,
    iterations: u32,
) -> Result<bool> {
    let mut reader = open(input.as_ref())?;
    let algorithm = Header::decode(&mut reader)?.algorithm2();
    reader.rewind()?;

    debug!(%algorithm, "dispatching container verification");
    match algorithm {
        AuthAlgorithm::Hash(_) => DigestEngine::verify_hash(reader, secret)?.verify(),
        AuthAlgorithm::Mac(_) => MacEngine::verify_mac(reader, secret, iterations)?.verify(),
        AuthAlgorithm::None => Err(PbeError::UnexpectedAlgorithm {
            expected: Category::Auth,
            found: algorithm.name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes_are_appended_not_replaced() {
        assert_eq!(cipher_output_path("dir/report.txt"), PathBuf::from("dir/report.txt.cph"));
        assert_eq!(clear_output_path("report.txt.cph"), PathBuf::from("report.txt.cph.clr"));
    }
}
