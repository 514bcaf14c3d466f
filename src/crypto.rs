use core::fmt;

use hmac::{Hmac, Mac};
use md5::Md5;
use sha1::Sha1;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::error::{Error, Result};

pub(crate) type HmacSha1 = Hmac<Sha1>;
pub(crate) type HmacMd5 = Hmac<Md5>;

/// Largest code any supported hash produces (SHA-1).
pub const MAX_DIGEST_LEN: usize = 20;

/// Hash function underlying the HMAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashChoice {
    /// SHA-1, 160-bit output.
    Sha1,
    /// MD5, 128-bit output.
    Md5,
}

impl HashChoice {
    /// Output length of the hash in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Md5 => 16,
        }
    }

    #[allow(dead_code)]
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Md5 => "md5",
        }
    }
}

/// A keyed digest, stored at the width of the largest supported hash.
///
/// Bytes beyond [`HashChoice::output_len`] are always zero.
#[derive(Clone, PartialEq, Eq)]
pub struct DigestCode {
    bytes: [u8; MAX_DIGEST_LEN],
    len: usize,
}

impl DigestCode {
    /// The code at the hash's native length.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// The code zero-extended to [`MAX_DIGEST_LEN`] bytes.
    pub fn padded(&self) -> &[u8; MAX_DIGEST_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for DigestCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestCode")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

/// Compute HMAC of `message` under `key` with the selected hash.
pub fn digest(hash: HashChoice, key: &[u8], message: &[u8]) -> Result<DigestCode> {
    let mut bytes = [0u8; MAX_DIGEST_LEN];
    match hash {
        HashChoice::Sha1 => {
            let mut mac = <HmacSha1 as Mac>::new_from_slice(key)
                .map_err(|_| Error::Crypto("invalid HMAC key"))?;
            mac.update(message);
            bytes.copy_from_slice(&mac.finalize().into_bytes());
        }
        HashChoice::Md5 => {
            let mut mac = <HmacMd5 as Mac>::new_from_slice(key)
                .map_err(|_| Error::Crypto("invalid HMAC key"))?;
            mac.update(message);
            bytes[..16].copy_from_slice(&mac.finalize().into_bytes());
        }
    }
    Ok(DigestCode {
        bytes,
        len: hash.output_len(),
    })
}

pub(crate) fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// A minimal secret container that zeroizes its contents on drop.
///
/// This is intentionally small and avoids exposing secrets via `Debug`.
#[derive(Clone)]
pub(crate) struct SecretBytes(Vec<u8>);

impl SecretBytes {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub(crate) fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<secret>")
    }
}

impl Drop for SecretBytes {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}
