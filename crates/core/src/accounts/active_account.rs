use std::sync::{Arc, RwLock};

use super::ActiveAccountResolver;
use crate::errors::{Error, Result};

/// In-memory active-account holder.
///
/// Hosts that track sign-in state themselves share one handle between the
/// code that signs accounts in and out and the cache synchronizer.
#[derive(Clone, Debug, Default)]
pub struct ActiveAccountHandle {
    inner: Arc<RwLock<Option<String>>>,
}

impl ActiveAccountHandle {
    pub fn new(account_id: Option<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(account_id)),
        }
    }

    pub fn set(&self, account_id: impl Into<String>) -> Result<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|e| Error::Unexpected(format!("Active account lock poisoned: {}", e)))?;
        *guard = Some(account_id.into());
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|e| Error::Unexpected(format!("Active account lock poisoned: {}", e)))?;
        *guard = None;
        Ok(())
    }
}

impl ActiveAccountResolver for ActiveAccountHandle {
    fn active_account_id(&self) -> Result<Option<String>> {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .map_err(|e| Error::Unexpected(format!("Active account lock poisoned: {}", e)))
    }
}
