//! QCT OEM commands.

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::types::{RawRequest, RawResponse};

/// Module version.
pub const VERSION: &str = "0.0.1";

/// QCT OEM network function.
pub const NETFN_QCT: u8 = 0x36;

/// `Get Platform ID` (QCT OEM NetFn, cmd 0x65).
pub const CMD_GET_PLATFORM_ID: u8 = 0x65;

/// Platform identifier reported by `Get Platform ID`.
pub const PLATFORM_ID: u8 = 0x02;

/// Version line printed when the module is listed.
pub fn version_banner() -> String {
    format!("IPMI Simulator Marvell QCT Purley module version {VERSION}")
}

/// Register the QCT OEM command handlers.
pub fn register(dispatcher: &mut Dispatcher) -> Result<()> {
    let result = dispatcher.register(NETFN_QCT, CMD_GET_PLATFORM_ID, get_platform_id);
    #[cfg(feature = "tracing")]
    {
        if let Err(err) = &result {
            tracing::error!(error = %err, "unable to register get platform id handler");
        }
    }
    result
}

fn get_platform_id(_request: &RawRequest) -> RawResponse {
    RawResponse::ok(vec![PLATFORM_ID])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_id_wire_form() {
        let resp = get_platform_id(&RawRequest::new(NETFN_QCT, CMD_GET_PLATFORM_ID, Vec::new()));
        assert_eq!(resp.to_bytes(), vec![0x00, 0x02]);
    }

    #[test]
    fn banner_carries_version() {
        assert_eq!(
            version_banner(),
            "IPMI Simulator Marvell QCT Purley module version 0.0.1"
        );
    }
}
