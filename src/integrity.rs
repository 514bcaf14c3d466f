use crate::context::IntegrityContext;
use crate::crypto::HashChoice;
use crate::error::Result;
use crate::secrets::SessionSecrets;

/// Which session secret keys the HMAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Session integrity key from the key exchange.
    SessionIntegrityKey,
    /// User password (or its derived value).
    Password,
}

/// A negotiable integrity algorithm.
///
/// Implementations bind the digest engine to a key source and hash and build
/// one [`IntegrityContext`] per session.
pub trait IntegrityAlgorithm: Send + Sync {
    /// Human-readable algorithm name.
    fn name(&self) -> &'static str;

    /// Build the integrity context for a newly negotiated session.
    fn init(&self, secrets: &dyn SessionSecrets) -> Result<IntegrityContext>;
}

/// HMAC integrity keyed from a session secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HmacIntegrity {
    name: &'static str,
    hash: HashChoice,
    key_source: KeySource,
}

impl HmacIntegrity {
    /// HMAC-SHA1 keyed by the session integrity key.
    pub const SESSION_KEY_SHA1: Self = Self::new(
        "hmac-sha1",
        HashChoice::Sha1,
        KeySource::SessionIntegrityKey,
    );

    /// HMAC-SHA1 keyed by the user password.
    pub const PASSWORD_SHA1: Self =
        Self::new("hmac-sha1-password", HashChoice::Sha1, KeySource::Password);

    /// HMAC-MD5 keyed by the user password.
    pub const PASSWORD_MD5: Self =
        Self::new("hmac-md5-password", HashChoice::Md5, KeySource::Password);

    /// Describe a custom HMAC variant.
    pub const fn new(name: &'static str, hash: HashChoice, key_source: KeySource) -> Self {
        Self {
            name,
            hash,
            key_source,
        }
    }

    /// Hash function underlying the HMAC.
    pub fn hash(&self) -> HashChoice {
        self.hash
    }

    /// Secret the key is taken from.
    pub fn key_source(&self) -> KeySource {
        self.key_source
    }
}

impl IntegrityAlgorithm for HmacIntegrity {
    fn name(&self) -> &'static str {
        self.name
    }

    fn init(&self, secrets: &dyn SessionSecrets) -> Result<IntegrityContext> {
        let secret = match self.key_source {
            KeySource::SessionIntegrityKey => secrets.session_integrity_key(),
            KeySource::Password => secrets.password(),
        };
        IntegrityContext::new(self.hash, secret)
    }
}
