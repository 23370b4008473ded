//! src/crypto/block.rs
//! Streaming CBC transform with PKCS#5 padding for the PBE ciphers
//!
//! Input arrives in arbitrary chunks; output is identical to a one-shot
//! encryption of the concatenated input. In the decrypt direction the last full
//! block is held back until [`CipherStream::finish`] so its padding can be
//! stripped.

use std::io::Write;

use cipher::block_padding::{Pkcs7, RawPadding};
use cipher::{Block, BlockCipher, BlockDecryptMut, BlockEncryptMut, InnerIvInit, KeyIvInit};
use des::{Des, TdesEde3};
use rc2::Rc2;
use tracing::debug;

use crate::crypto::kdf::CipherMaterial;
use crate::error::{PbeError, Result};

/// Effective key length for `PBEWithSHA1andRC2_40`.
const RC2_EFFECTIVE_KEY_BITS: usize = 40;

/// Transform direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Object-safe view of a CBC mode instance.
trait BlockMode: Send {
    fn block_size(&self) -> usize;
    fn process_block(&mut self, block: &mut [u8]);
}

struct Encrypting<M>(M);
struct Decrypting<M>(M);

impl<M: BlockEncryptMut + Send> BlockMode for Encrypting<M> {
    fn block_size(&self) -> usize {
        M::block_size()
    }

    fn process_block(&mut self, block: &mut [u8]) {
        self.0.encrypt_block_mut(Block::<M>::from_mut_slice(block));
    }
}

impl<M: BlockDecryptMut + Send> BlockMode for Decrypting<M> {
    fn block_size(&self) -> usize {
        M::block_size()
    }

    fn process_block(&mut self, block: &mut [u8]) {
        self.0.decrypt_block_mut(Block::<M>::from_mut_slice(block));
    }
}

fn cbc_mode<C>(cipher: C, iv: &[u8], direction: Direction) -> Result<Box<dyn BlockMode>>
where
    C: BlockCipher + BlockEncryptMut + BlockDecryptMut + Send + 'static,
{
    let init_err = |e: cipher::InvalidLength| PbeError::TransformInit(format!("CBC IV: {e}"));
    Ok(match direction {
        Direction::Encrypt => Box::new(Encrypting(
            cbc::Encryptor::<C>::inner_iv_slice_init(cipher, iv).map_err(init_err)?,
        )),
        Direction::Decrypt => Box::new(Decrypting(
            cbc::Decryptor::<C>::inner_iv_slice_init(cipher, iv).map_err(init_err)?,
        )),
    })
}

fn cbc_from_slices<C>(key: &[u8], iv: &[u8], direction: Direction) -> Result<Box<dyn BlockMode>>
where
    C: BlockCipher + BlockEncryptMut + BlockDecryptMut + cipher::KeyInit + Send + 'static,
{
    let init_err = |e: cipher::InvalidLength| PbeError::TransformInit(format!("CBC key/IV: {e}"));
    Ok(match direction {
        Direction::Encrypt => Box::new(Encrypting(
            cbc::Encryptor::<C>::new_from_slices(key, iv).map_err(init_err)?,
        )),
        Direction::Decrypt => Box::new(Decrypting(
            cbc::Decryptor::<C>::new_from_slices(key, iv).map_err(init_err)?,
        )),
    })
}

/// Incremental CBC transform over a [`Write`] sink.
pub struct CipherStream {
    mode: Box<dyn BlockMode>,
    direction: Direction,
    pending: Vec<u8>,
    consumed: u64,
}

impl CipherStream {
    /// Initialise the primitive matching `material` in `direction`.
    pub fn new(material: &CipherMaterial, direction: Direction) -> Result<Self> {
        let mode = match material {
            CipherMaterial::Des { key, iv } => {
                cbc_from_slices::<Des>(key.expose_secret(), iv.expose_secret(), direction)?
            }
            CipherMaterial::TripleDes { key, iv } => {
                cbc_from_slices::<TdesEde3>(key.expose_secret(), iv.expose_secret(), direction)?
            }
            CipherMaterial::Rc2_40 { key, iv } => {
                let rc2 = Rc2::new_with_eff_key_len(key.expose_secret(), RC2_EFFECTIVE_KEY_BITS);
                cbc_mode(rc2, iv.expose_secret(), direction)?
            }
        };
        debug!(?direction, block_size = mode.block_size(), "cipher transform ready");

        Ok(Self {
            pending: Vec::with_capacity(mode.block_size() * 2),
            mode,
            direction,
            consumed: 0,
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Feed `input`, writing every block that is ready.
    pub fn update<W: Write + ?Sized>(&mut self, input: &[u8], sink: &mut W) -> Result<()> {
        self.consumed += input.len() as u64;
        self.pending.extend_from_slice(input);

        let block_size = self.mode.block_size();
        let mut ready = self.pending.len() / block_size * block_size;
        if self.direction == Direction::Decrypt && ready == self.pending.len() && ready > 0 {
            // last block may carry padding
            ready -= block_size;
        }
        if ready == 0 {
            return Ok(());
        }

        for block in self.pending[..ready].chunks_exact_mut(block_size) {
            self.mode.process_block(block);
        }
        sink.write_all(&self.pending[..ready])?;
        self.pending.drain(..ready);
        Ok(())
    }

    /// Flush the final (padded) block.
    ///
    /// # Errors
    ///
    /// - [`PbeError::TruncatedCiphertext`] - decrypt input was empty or misaligned
    /// - [`PbeError::InvalidPadding`] - decrypted padding is malformed
    pub fn finish<W: Write + ?Sized>(mut self, sink: &mut W) -> Result<()> {
        let block_size = self.mode.block_size();

        match self.direction {
            Direction::Encrypt => {
                let used = self.pending.len();
                self.pending.resize(block_size, 0);
                Pkcs7::raw_pad(&mut self.pending, used);
                self.mode.process_block(&mut self.pending);
                sink.write_all(&self.pending)?;
            }
            Direction::Decrypt => {
                if self.pending.len() != block_size {
                    return Err(PbeError::TruncatedCiphertext(self.consumed));
                }
                self.mode.process_block(&mut self.pending);
                let plain = Pkcs7::raw_unpad(&self.pending).map_err(|_| PbeError::InvalidPadding)?;
                sink.write_all(plain)?;
            }
        }
        Ok(())
    }
}
