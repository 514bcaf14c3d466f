use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::types::{COMPLETION_INVALID_COMMAND, RawRequest, RawResponse};

/// Handles one `(netfn, cmd)` pair.
pub trait CommandHandler: Send + Sync {
    /// Produce the response for `request`.
    fn handle(&self, request: &RawRequest) -> RawResponse;
}

impl<F> CommandHandler for F
where
    F: Fn(&RawRequest) -> RawResponse + Send + Sync,
{
    fn handle(&self, request: &RawRequest) -> RawResponse {
        self(request)
    }
}

/// Routes incoming requests to registered handlers.
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<(u8, u8), Box<dyn CommandHandler>>,
}

impl Dispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `(netfn, cmd)`.
    pub fn register<H>(&mut self, netfn: u8, cmd: u8, handler: H) -> Result<()>
    where
        H: CommandHandler + 'static,
    {
        if self.handlers.contains_key(&(netfn, cmd)) {
            return Err(Error::DuplicateHandler { netfn, cmd });
        }
        self.handlers
            .try_reserve(1)
            .map_err(|_| Error::ResourceExhausted)?;
        self.handlers.insert((netfn, cmd), Box::new(handler));
        Ok(())
    }

    /// Whether a handler exists for `(netfn, cmd)`.
    pub fn handles(&self, netfn: u8, cmd: u8) -> bool {
        self.handlers.contains_key(&(netfn, cmd))
    }

    /// Route `request`; unknown commands get completion code 0xC1.
    pub fn dispatch(&self, request: &RawRequest) -> RawResponse {
        match self.handlers.get(&(request.netfn, request.cmd)) {
            Some(handler) => handler.handle(request),
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    netfn = request.netfn,
                    cmd = request.cmd,
                    "no handler registered"
                );
                RawResponse::completion(COMPLETION_INVALID_COMMAND)
            }
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_handlers_are_routed() {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register(0x06, 0x01, |req: &RawRequest| RawResponse::ok(req.data.clone()))
            .expect("register");

        let resp = dispatcher.dispatch(&RawRequest::new(0x06, 0x01, vec![0xAB]));
        assert_eq!(resp, RawResponse::ok(vec![0xAB]));
        assert!(dispatcher.handles(0x06, 0x01));
    }

    #[test]
    fn unknown_command_is_invalid() {
        let dispatcher = Dispatcher::new();
        let resp = dispatcher.dispatch(&RawRequest::new(0x2E, 0x01, Vec::new()));
        assert_eq!(resp.completion_code, COMPLETION_INVALID_COMMAND);
        assert!(resp.data.is_empty());
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut dispatcher = Dispatcher::new();
        let handler = |_: &RawRequest| RawResponse::ok(Vec::new());
        dispatcher.register(0x30, 0x01, handler).expect("first");
        assert_eq!(
            dispatcher.register(0x30, 0x01, handler),
            Err(Error::DuplicateHandler {
                netfn: 0x30,
                cmd: 0x01
            })
        );
    }
}
