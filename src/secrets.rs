use crate::crypto::SecretBytes;

/// Read-only view of the secrets negotiated for one session.
///
/// Supplied by the session negotiation subsystem and consulted only while an
/// [`IntegrityContext`](crate::IntegrityContext) is being constructed. Each
/// accessor returns the secret with its length.
pub trait SessionSecrets {
    /// Session integrity key (SIK) produced by the key exchange.
    fn session_integrity_key(&self) -> &[u8];

    /// Password, or the password-derived value, of the session user.
    fn password(&self) -> &[u8];
}

/// Owned session secrets, zeroized on drop.
#[derive(Debug, Clone)]
pub struct SessionKeys {
    sik: SecretBytes,
    password: SecretBytes,
}

impl SessionKeys {
    /// Bundle a session integrity key and password.
    pub fn new(sik: impl Into<Vec<u8>>, password: impl Into<Vec<u8>>) -> Self {
        Self {
            sik: SecretBytes::new(sik.into()),
            password: SecretBytes::new(password.into()),
        }
    }
}

impl SessionSecrets for SessionKeys {
    fn session_integrity_key(&self) -> &[u8] {
        self.sik.expose()
    }

    fn password(&self) -> &[u8] {
        self.password.expose()
    }
}

impl<S: SessionSecrets + ?Sized> SessionSecrets for &S {
    fn session_integrity_key(&self) -> &[u8] {
        (**self).session_integrity_key()
    }

    fn password(&self) -> &[u8] {
        (**self).password()
    }
}
