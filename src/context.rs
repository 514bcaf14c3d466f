use core::fmt;

use zeroize::Zeroize;

use crate::crypto::HashChoice;
use crate::error::{Error, Result};
use crate::protocol::{Authenticated, integrity_add, integrity_check};

/// Key size every integrity variant requires.
pub const KEY_LEN: usize = 20;

/// Integrity state for one RMCP+ session.
///
/// Holds the 20-byte HMAC key for the lifetime of the session. The key is
/// overwritten with zeros when the context is dropped. Contexts are not
/// `Clone`: each session owns exactly one.
pub struct IntegrityContext {
    hash: HashChoice,
    key: [u8; KEY_LEN],
}

impl IntegrityContext {
    /// Build a context from session secret material.
    ///
    /// Only the first [`KEY_LEN`] bytes of `secret` are used. Shorter secrets
    /// are rejected rather than padded.
    pub fn new(hash: HashChoice, secret: &[u8]) -> Result<Self> {
        let src = secret
            .get(..KEY_LEN)
            .ok_or(Error::InsufficientKeyMaterial {
                required: KEY_LEN,
                actual: secret.len(),
            })?;
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(src);
        Ok(Self { hash, key })
    }

    /// Hash function underlying the HMAC.
    pub fn hash(&self) -> HashChoice {
        self.hash
    }

    /// Authenticate an outbound packet in place.
    ///
    /// `buffer[..payload_len]` holds the 4-byte header followed by the
    /// payload; `buffer.len()` is the maximum packet size. On success the pad
    /// marker and 20-byte trailer follow the payload.
    pub fn add(&self, buffer: &mut [u8], payload_len: usize) -> Result<Authenticated> {
        let result = integrity_add(self.hash, &self.key, buffer, payload_len);
        match &result {
            Ok(out) => {
                crate::debug::dump_hex(
                    "integrity trailer out",
                    &buffer[out.payload_len..out.total_len()],
                );
                crate::observe::record_sealed(self.hash, out.payload_len);
            }
            Err(err) => crate::observe::record_seal_failed(self.hash, err),
        }
        result
    }

    /// Verify an inbound packet.
    ///
    /// `payload_len` is the authenticated length as reported by [`Self::add`]
    /// (header, payload and pad marker); `packet.len()` is the received size.
    /// A failure means the packet must be discarded.
    pub fn check(&self, packet: &[u8], payload_len: usize) -> Result<()> {
        let result = integrity_check(self.hash, &self.key, packet, payload_len);
        match &result {
            Ok(()) => crate::observe::record_verified(self.hash, payload_len),
            Err(err) => {
                crate::debug::dump_hex("rejected packet", packet);
                crate::observe::record_rejected(self.hash, payload_len, packet.len(), err);
            }
        }
        result
    }

    fn wipe(&mut self) {
        self.key.zeroize();
        #[cfg(test)]
        {
            tests::WIPES.with(|n| n.set(n.get() + 1));
        }
    }
}

impl fmt::Debug for IntegrityContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegrityContext")
            .field("hash", &self.hash)
            .field("key", &"<secret>")
            .finish()
    }
}

// Dropping is the only release path, so every context is wiped.
impl Drop for IntegrityContext {
    fn drop(&mut self) {
        self.wipe();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    thread_local! {
        pub(super) static WIPES: Cell<usize> = const { Cell::new(0) };
    }

    #[test]
    fn new_copies_first_twenty_bytes() {
        let secret: Vec<u8> = (0u8..32).collect();
        let ctx = IntegrityContext::new(HashChoice::Sha1, &secret).expect("ctx");
        assert_eq!(ctx.key, secret[..20]);
    }

    #[test]
    fn new_rejects_short_secret() {
        let err = IntegrityContext::new(HashChoice::Sha1, &[0u8; 19]).unwrap_err();
        assert_eq!(
            err,
            Error::InsufficientKeyMaterial {
                required: 20,
                actual: 19
            }
        );
    }

    #[test]
    fn wipe_zeroes_key() {
        let mut ctx = IntegrityContext::new(HashChoice::Md5, &[0xA5; 20]).expect("ctx");
        ctx.wipe();
        assert_eq!(ctx.key, [0u8; KEY_LEN]);
        assert_eq!(ctx.hash(), HashChoice::Md5);
    }

    #[test]
    fn drop_wipes_key() {
        let before = WIPES.with(Cell::get);
        let ctx = IntegrityContext::new(HashChoice::Sha1, &[0xA5; 20]).expect("ctx");
        assert_eq!(WIPES.with(Cell::get), before);
        drop(ctx);
        assert_eq!(WIPES.with(Cell::get), before + 1);
    }

    #[test]
    fn debug_does_not_leak_key() {
        let ctx = IntegrityContext::new(HashChoice::Sha1, &[0xA5; 20]).expect("ctx");
        let rendered = format!("{ctx:?}");
        assert!(rendered.contains("<secret>"));
        assert!(!rendered.contains("165"));
    }
}
