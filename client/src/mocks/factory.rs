//! In-memory handle factory for tests.

use std::sync::{Arc, Mutex};

use crate::error::{ClientError, Result};
use crate::factory::HandleFactory;

/// Handle produced by [`MockHandleFactory`].
///
/// Carries enough to tell two constructions apart in assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockHandle {
    /// 1-based construction sequence number
    pub serial: usize,
    /// Credential the handle was built with
    pub credential: Option<String>,
}

#[derive(Debug, Default)]
struct MockFactoryState {
    builds: usize,
    fail_reason: Option<String>,
}

/// Mock handle factory backed by in-memory state.
///
/// Counts successful constructions and can be made to fail on demand.
/// Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MockHandleFactory {
    inner: Arc<Mutex<MockFactoryState>>,
}

impl MockHandleFactory {
    /// Create a factory that always succeeds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make construction fail with the given reason until cleared
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    pub fn fail_with(&self, reason: impl Into<String>) -> Result<()> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| ClientError::Internal("Mutex lock failed".to_string()))?;
        state.fail_reason = Some(reason.into());
        Ok(())
    }

    /// Stop injecting failures
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    pub fn clear_failure(&self) -> Result<()> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| ClientError::Internal("Mutex lock failed".to_string()))?;
        state.fail_reason = None;
        Ok(())
    }

    /// How many handles have been constructed
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    pub fn builds(&self) -> Result<usize> {
        let state = self
            .inner
            .lock()
            .map_err(|_| ClientError::Internal("Mutex lock failed".to_string()))?;
        Ok(state.builds)
    }
}

impl HandleFactory for MockHandleFactory {
    type Handle = MockHandle;

    fn build(&self, credential: Option<&str>) -> Result<MockHandle> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| ClientError::Internal("Mutex lock failed".to_string()))?;
        if let Some(reason) = &state.fail_reason {
            return Err(ClientError::ConstructionFailed {
                reason: reason.clone(),
            });
        }
        state.builds += 1;
        Ok(MockHandle {
            serial: state.builds,
            credential: credential.map(ToString::to_string),
        })
    }
}
