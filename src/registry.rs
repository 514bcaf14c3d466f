use core::fmt;

use crate::context::IntegrityContext;
use crate::error::{Error, Result};
use crate::integrity::{HmacIntegrity, IntegrityAlgorithm};
use crate::protocol::algorithm;
use crate::secrets::SessionSecrets;

/// Integrity algorithms available for session negotiation, by algorithm ID.
///
/// Built once at startup and handed to the negotiation code by reference.
pub struct IntegrityRegistry {
    entries: Vec<(u8, Box<dyn IntegrityAlgorithm>)>,
}

impl IntegrityRegistry {
    /// Create a [`RegistryBuilder`].
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry holding the two HMAC-SHA1 variants under their well-known IDs.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::builder().with_defaults()?.build())
    }

    /// Look up the algorithm registered under `id`.
    pub fn get(&self, id: u8) -> Option<&dyn IntegrityAlgorithm> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, algo)| algo.as_ref())
    }

    /// Whether an algorithm is registered under `id`.
    pub fn contains(&self, id: u8) -> bool {
        self.get(id).is_some()
    }

    /// Registered IDs in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Build the integrity context for a session that negotiated `id`.
    pub fn init(&self, id: u8, secrets: &dyn SessionSecrets) -> Result<IntegrityContext> {
        let algo = self.get(id).ok_or(Error::UnsupportedAlgorithm(id))?;
        algo.init(secrets)
    }
}

impl fmt::Debug for IntegrityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|(id, algo)| (format!("{id:#04x}"), algo.name())),
            )
            .finish()
    }
}

/// Builder for [`IntegrityRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<(u8, Box<dyn IntegrityAlgorithm>)>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the session-key HMAC-SHA1 variant under HMAC-SHA1-96 and the
    /// password HMAC-SHA1 variant under HMAC-MD5-128.
    pub fn with_defaults(self) -> Result<Self> {
        self.register(
            algorithm::INTEGRITY_HMAC_SHA1_96,
            HmacIntegrity::SESSION_KEY_SHA1,
        )?
        .register(
            algorithm::INTEGRITY_HMAC_MD5_128,
            HmacIntegrity::PASSWORD_SHA1,
        )
    }

    /// Register `algo` under `id`.
    pub fn register<A>(mut self, id: u8, algo: A) -> Result<Self>
    where
        A: IntegrityAlgorithm + 'static,
    {
        if let Err(err) = self.insert(id, Box::new(algo)) {
            crate::observe::record_registration_failed(id, &err);
            return Err(err);
        }
        Ok(self)
    }

    /// Finish building.
    pub fn build(mut self) -> IntegrityRegistry {
        self.entries.sort_by_key(|(id, _)| *id);
        IntegrityRegistry {
            entries: self.entries,
        }
    }

    fn insert(&mut self, id: u8, algo: Box<dyn IntegrityAlgorithm>) -> Result<()> {
        if id == algorithm::INTEGRITY_NONE {
            return Err(Error::InvalidArgument(
                "algorithm id 0x00 is reserved for no integrity",
            ));
        }
        if id > algorithm::MAX_ID {
            return Err(Error::InvalidArgument("algorithm id must be 6-bit"));
        }
        if self.entries.iter().any(|(entry_id, _)| *entry_id == id) {
            return Err(Error::DuplicateAlgorithm(id));
        }
        self.entries
            .try_reserve(1)
            .map_err(|_| Error::ResourceExhausted)?;
        self.entries.push((id, algo));
        Ok(())
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("len", &self.entries.len())
            .finish()
    }
}
