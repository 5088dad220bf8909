//! Phone messaging channel

use std::sync::Mutex;

use tracing::debug;

use crate::error::HostError;

pub const INBOX_SIZE: usize = 256;
pub const OUTBOX_SIZE: usize = 256;

/// Largest buffer the host hands out in either direction
pub const MAX_BUFFER_SIZE: usize = 8200;

/// Message channel to the companion phone. The timer never sends or receives
/// anything, but the host expects the channel to be opened at startup.
pub trait AppMessage: Send + Sync {
    fn open(&self, inbox: usize, outbox: usize) -> Result<(), HostError>;
}

/// Channel that only remembers its buffer sizes
#[derive(Debug, Default)]
pub struct LoopbackMessaging {
    buffers: Mutex<Option<(usize, usize)>>,
}

impl LoopbackMessaging {
    /// Inbox/outbox sizes of the last successful `open`
    pub fn buffers(&self) -> Option<(usize, usize)> {
        self.buffers.lock().ok().and_then(|b| *b)
    }
}

impl AppMessage for LoopbackMessaging {
    fn open(&self, inbox: usize, outbox: usize) -> Result<(), HostError> {
        if let Some(size) = [inbox, outbox].into_iter().find(|&size| size > MAX_BUFFER_SIZE) {
            return Err(HostError::BufferTooLarge(size));
        }

        debug!("Messaging opened (inbox {} B, outbox {} B)", inbox, outbox);
        *self.buffers.lock()? = Some((inbox, outbox));
        Ok(())
    }
}
