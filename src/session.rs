use crate::context::IntegrityContext;
use crate::error::Result;
use crate::protocol::{Authenticated, algorithm};
use crate::registry::IntegrityRegistry;
use crate::secrets::SessionSecrets;

/// Integrity state owned by one RMCP+ connection.
///
/// Wraps the negotiated [`IntegrityContext`], or nothing when the session
/// negotiated "no integrity" (algorithm 0x00).
#[derive(Debug)]
pub struct SessionIntegrity {
    algorithm_id: u8,
    context: Option<IntegrityContext>,
}

impl SessionIntegrity {
    /// Set up integrity for a session that negotiated `algorithm_id`.
    pub fn negotiate(
        registry: &IntegrityRegistry,
        algorithm_id: u8,
        secrets: &dyn SessionSecrets,
    ) -> Result<Self> {
        let context = if algorithm_id == algorithm::INTEGRITY_NONE {
            None
        } else {
            Some(registry.init(algorithm_id, secrets)?)
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            algorithm_id,
            integrity = context.is_some(),
            "session integrity negotiated"
        );

        Ok(Self {
            algorithm_id,
            context,
        })
    }

    /// Negotiated algorithm identifier.
    pub fn algorithm_id(&self) -> u8 {
        self.algorithm_id
    }

    /// Whether packets carry an integrity trailer.
    pub fn integrity_enabled(&self) -> bool {
        self.context.is_some()
    }

    /// Authenticate an outbound packet; a no-op without integrity.
    pub fn seal(&self, buffer: &mut [u8], payload_len: usize) -> Result<Authenticated> {
        match &self.context {
            Some(ctx) => ctx.add(buffer, payload_len),
            None => Ok(Authenticated {
                payload_len,
                trailer_len: 0,
            }),
        }
    }

    /// Verify an inbound packet; always succeeds without integrity.
    pub fn open(&self, packet: &[u8], payload_len: usize) -> Result<()> {
        match &self.context {
            Some(ctx) => ctx.check(packet, payload_len),
            None => Ok(()),
        }
    }

    /// End the session, zeroing the integrity key.
    pub fn close(self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(algorithm_id = self.algorithm_id, "session integrity closed");
    }
}
