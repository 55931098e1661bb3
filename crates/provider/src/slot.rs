use crate::error::SenderError;

/// Holds a sender's prepared payload and enforces the prepare-once,
/// send-once lifecycle.
#[derive(Debug)]
pub struct PreparedSlot<T>(Option<T>);

impl<T> Default for PreparedSlot<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T> PreparedSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the prepared payload. Fails if one is already present.
    pub fn fill(&mut self, payload: T) -> Result<(), SenderError> {
        if self.0.is_some() {
            return Err(SenderError::AlreadyPrepared);
        }
        self.0 = Some(payload);
        Ok(())
    }

    /// Whether a payload has been stored.
    pub fn is_filled(&self) -> bool {
        self.0.is_some()
    }

    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    /// Consume the slot, yielding the payload.
    pub fn take(self) -> Result<T, SenderError> {
        self.0.ok_or(SenderError::NotPrepared)
    }
}
