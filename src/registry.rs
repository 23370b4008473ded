//! # Algorithm Registry
//!
//! Four fixed, ordered name tables. A name's position in its table is its
//! 1-byte wire code, so the tables must never be reordered.
//!
//! | category | table |
//! |----------|-------|
//! | cipher   | [`CIPHER_ALGORITHMS`] |
//! | hash     | [`HASH_ALGORITHMS`] |
//! | mac      | [`MAC_ALGORITHMS`] |
//! | auth     | [`AUTH_ALGORITHMS`]: `none`, every hash, every mac |
//!
//! Name lookups ignore ASCII case and always hand back the canonical spelling.
//!
//! # Security
//!
//! Every cipher here is a legacy PBE scheme (DES, two-key-strength 3DES
//! derivations, 40-bit RC2) and `MD2`/`MD5` are broken digests. They stay
//! selectable for format compatibility only.

use std::fmt;
use std::str::FromStr;

use crate::error::{PbeError, Result};

/// The four registry categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Cipher,
    Hash,
    Mac,
    /// The header's second algorithm slot: `none`, hashes and MACs.
    Auth,
}

impl Category {
    /// The ordered name table for this category.
    pub const fn names(self) -> &'static [&'static str] {
        match self {
            Category::Cipher => CIPHER_ALGORITHMS,
            Category::Hash => HASH_ALGORITHMS,
            Category::Mac => MAC_ALGORITHMS,
            Category::Auth => AUTH_ALGORITHMS,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Cipher => "cipher",
            Category::Hash => "hash",
            Category::Mac => "mac",
            Category::Auth => "authentication",
        })
    }
}

/// Sentinel stored in the auth slot when no hash/MAC applies.
pub const NONE_ALGORITHM: &str = "none";

/// Authentication slot table: `none`, then [`HASH_ALGORITHMS`], then [`MAC_ALGORITHMS`].
pub const AUTH_ALGORITHMS: &[&str] = &[
    NONE_ALGORITHM,
    "MD2",
    "MD5",
    "SHA-1",
    "SHA-256",
    "SHA-384",
    "SHA-512",
    "HmacMD5",
    "HmacSHA1",
    "HmacSHA256",
    "HmacSHA384",
    "HmacSHA512",
];

/// Wire code for `name` in `category`.
pub fn index_of(category: Category, name: &str) -> Result<u8> {
    category
        .names()
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(name))
        .map(|idx| idx as u8)
        .ok_or_else(|| PbeError::AlgorithmNotFound {
            category,
            name: name.to_owned(),
        })
}

/// Canonical name behind `code` in `category`.
pub fn name_at(category: Category, code: u8) -> Result<&'static str> {
    category
        .names()
        .get(code as usize)
        .copied()
        .ok_or(PbeError::AlgorithmIndexOutOfRange { category, code })
}

macro_rules! registry_enum {
    (
        $(#[$meta:meta])*
        $name:ident in $category:expr, table $table:ident {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal,)+
        }
    ) => {
        #[doc = concat!("Ordered wire table for [`", stringify!($name), "`].")]
        pub const $table: &[&str] = &[$($label),+];

        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every variant, in wire-code order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical registry name.
            pub const fn name(self) -> &'static str {
                $table[self as usize]
            }

            /// 1-byte wire code (position in the table).
            pub const fn code(self) -> u8 {
                self as u8
            }

            pub fn from_code(code: u8) -> Result<Self> {
                Self::ALL
                    .get(code as usize)
                    .copied()
                    .ok_or(PbeError::AlgorithmIndexOutOfRange { category: $category, code })
            }

            pub fn from_name(name: &str) -> Result<Self> {
                Self::from_code(index_of($category, name)?)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = PbeError;

            fn from_str(s: &str) -> Result<Self> {
                Self::from_name(s)
            }
        }
    };
}

registry_enum! {
    /// Password-based encryption schemes (header slot 1).
    CipherAlgorithm in Category::Cipher, table CIPHER_ALGORITHMS {
        /// PBKDF1-MD5 + DES-CBC (PKCS#5 v1.5).
        PbeWithMd5AndDes => "PBEWithMD5andDES",
        /// SunJCE split-salt MD5 derivation + 3DES-CBC.
        PbeWithMd5AndTripleDes => "PBEWithMD5andTripleDES",
        /// PKCS#12 SHA-1 derivation + 3DES-CBC.
        PbeWithSha1AndDesede => "PBEWithSHA1andDESede",
        /// PKCS#12 SHA-1 derivation + 40-bit RC2-CBC.
        PbeWithSha1AndRc2_40 => "PBEWithSHA1andRC2_40",
    }
}

registry_enum! {
    /// Digest algorithms for secret-prefixed hashing.
    HashAlgorithm in Category::Hash, table HASH_ALGORITHMS {
        Md2 => "MD2",
        Md5 => "MD5",
        Sha1 => "SHA-1",
        Sha256 => "SHA-256",
        Sha384 => "SHA-384",
        Sha512 => "SHA-512",
    }
}

registry_enum! {
    /// HMAC algorithms.
    MacAlgorithm in Category::Mac, table MAC_ALGORITHMS {
        HmacMd5 => "HmacMD5",
        HmacSha1 => "HmacSHA1",
        HmacSha256 => "HmacSHA256",
        HmacSha384 => "HmacSHA384",
        HmacSha512 => "HmacSHA512",
    }
}

impl HashAlgorithm {
    /// Digest output length in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            HashAlgorithm::Md2 | HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }
}

impl MacAlgorithm {
    /// Tag length in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            MacAlgorithm::HmacMd5 => 16,
            MacAlgorithm::HmacSha1 => 20,
            MacAlgorithm::HmacSha256 => 32,
            MacAlgorithm::HmacSha384 => 48,
            MacAlgorithm::HmacSha512 => 64,
        }
    }

    /// PBKDF2 key length in bytes.
    ///
    /// Existing containers were keyed with the tag length read as a bit count,
    /// so the key is `output_len() / 8` bytes: 2, 2, 4, 6 and 8.
    pub const fn key_len(self) -> usize {
        self.output_len() / 8
    }
}

/// Content of the header's second algorithm slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthAlgorithm {
    None,
    Hash(HashAlgorithm),
    Mac(MacAlgorithm),
}

impl AuthAlgorithm {
    const MAC_OFFSET: u8 = 1 + HASH_ALGORITHMS.len() as u8;

    pub const fn code(self) -> u8 {
        match self {
            AuthAlgorithm::None => 0,
            AuthAlgorithm::Hash(hash) => 1 + hash.code(),
            AuthAlgorithm::Mac(mac) => Self::MAC_OFFSET + mac.code(),
        }
    }

    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(AuthAlgorithm::None),
            c if c < Self::MAC_OFFSET => Ok(AuthAlgorithm::Hash(HashAlgorithm::ALL[(c - 1) as usize])),
            c => MacAlgorithm::ALL
                .get((c - Self::MAC_OFFSET) as usize)
                .map(|mac| AuthAlgorithm::Mac(*mac))
                .ok_or(PbeError::AlgorithmIndexOutOfRange {
                    category: Category::Auth,
                    code,
                }),
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::from_code(index_of(Category::Auth, name)?)
    }

    pub const fn name(self) -> &'static str {
        match self {
            AuthAlgorithm::None => NONE_ALGORITHM,
            AuthAlgorithm::Hash(hash) => hash.name(),
            AuthAlgorithm::Mac(mac) => mac.name(),
        }
    }
}

impl From<HashAlgorithm> for AuthAlgorithm {
    fn from(hash: HashAlgorithm) -> Self {
        AuthAlgorithm::Hash(hash)
    }
}

impl From<MacAlgorithm> for AuthAlgorithm {
    fn from(mac: MacAlgorithm) -> Self {
        AuthAlgorithm::Mac(mac)
    }
}

impl fmt::Display for AuthAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AuthAlgorithm {
    type Err = PbeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}
