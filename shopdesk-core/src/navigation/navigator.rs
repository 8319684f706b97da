//! Navigation side effects
//!
//! The guard and the request pipeline never render anything; they only ask
//! a [`Navigator`] to move the user somewhere.

use std::sync::{Mutex, PoisonError};

/// Performs a navigation to an in-app location such as `/login?returnUrl=/orders`
pub trait Navigator: Send + Sync {
    fn navigate(&self, location: &str);
}

/// Navigator that records every location it is sent to
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    entries: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent location, if any navigation happened
    pub fn current(&self) -> Option<String> {
        self.lock().last().cloned()
    }

    /// Every location in order
    pub fn history(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, location: &str) {
        tracing::debug!(location, "Navigating");
        self.lock().push(location.to_string());
    }
}
