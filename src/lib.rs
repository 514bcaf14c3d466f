#![deny(unsafe_code)]
#![warn(missing_docs)]

//! RMCP+ (IPMI v2.0) session integrity.
//!
//! The crate implements:
//! - HMAC integrity trailers for outbound packets and their verification
//! - Integrity algorithm variants keyed by the session integrity key or the password
//! - An explicit algorithm registry used during session negotiation
//! - A `(netfn, cmd)` command dispatcher with the QCT OEM platform handler
//!
//! Packets use the layout `[4-byte header][payload][pad marker 0x00][20-byte trailer]`.
//! The header is not authenticated; the payload and pad marker are.

mod context;
mod crypto;
mod debug;
mod dispatch;
mod error;
mod integrity;
mod observe;
mod protocol;
mod registry;
mod secrets;
mod session;
mod types;

pub mod oem;

pub use crate::context::{IntegrityContext, KEY_LEN};
pub use crate::crypto::{DigestCode, HashChoice, MAX_DIGEST_LEN, digest};
pub use crate::dispatch::{CommandHandler, Dispatcher};
pub use crate::error::{Error, Result};
pub use crate::integrity::{HmacIntegrity, IntegrityAlgorithm, KeySource};
pub use crate::protocol::{
    Authenticated, HEADER_LEN, INTEGRITY_OVERHEAD, PAD_MARKER_LEN, PAD_MARKER_NO_PADDING,
    PacketLayout, TRAILER_LEN, algorithm,
};
pub use crate::registry::{IntegrityRegistry, RegistryBuilder};
pub use crate::secrets::{SessionKeys, SessionSecrets};
pub use crate::session::SessionIntegrity;
pub use crate::types::{COMPLETION_INVALID_COMMAND, COMPLETION_OK, RawRequest, RawResponse};
