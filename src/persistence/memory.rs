//! A slot that lives only as long as the program.

use crate::{Error, persistence::SlotStorage};

/// Keeps the payload in memory. Useful for tests and throwaway sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySlot {
    payload: Option<String>,
}

impl MemorySlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot that already holds `payload`.
    pub fn with_payload(payload: &str) -> Self {
        Self {
            payload: Some(payload.to_owned()),
        }
    }

    /// The current payload, if anything has been written.
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl SlotStorage for MemorySlot {
    fn read_slot(&self) -> Result<Option<String>, Error> {
        Ok(self.payload.clone())
    }

    fn write_slot(&mut self, payload: &str) -> Result<(), Error> {
        self.payload = Some(payload.to_owned());
        Ok(())
    }
}
