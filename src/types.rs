use core::fmt;

/// Completion code: command completed normally.
pub const COMPLETION_OK: u8 = 0x00;

/// Completion code: invalid or unsupported command.
pub const COMPLETION_INVALID_COMMAND: u8 = 0xC1;

/// A raw IPMI request as delivered to a command handler.
#[derive(Clone, PartialEq, Eq)]
pub struct RawRequest {
    /// Network function.
    pub netfn: u8,
    /// Command number.
    pub cmd: u8,
    /// Request data following the command byte.
    pub data: Vec<u8>,
}

impl RawRequest {
    /// Build a request.
    pub fn new(netfn: u8, cmd: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            netfn,
            cmd,
            data: data.into(),
        }
    }
}

impl fmt::Debug for RawRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawRequest")
            .field("netfn", &format_args!("{:#04x}", self.netfn))
            .field("cmd", &format_args!("{:#04x}", self.cmd))
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// A raw IPMI response.
#[derive(Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// IPMI completion code.
    pub completion_code: u8,
    /// Payload bytes after the completion code.
    pub data: Vec<u8>,
}

impl RawResponse {
    /// Successful response carrying `data`.
    pub fn ok(data: impl Into<Vec<u8>>) -> Self {
        Self {
            completion_code: COMPLETION_OK,
            data: data.into(),
        }
    }

    /// Response with a completion code and no data.
    pub fn completion(completion_code: u8) -> Self {
        Self {
            completion_code,
            data: Vec::new(),
        }
    }

    /// Wire form: completion code followed by data.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.data.len());
        out.push(self.completion_code);
        out.extend_from_slice(&self.data);
        out
    }
}

impl fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawResponse")
            .field(
                "completion_code",
                &format_args!("{:#04x}", self.completion_code),
            )
            .field("data_len", &self.data.len())
            .finish()
    }
}
