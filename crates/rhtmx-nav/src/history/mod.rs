//! Session history adapters.
//!
//! A [`HistoryAdapter`] is the only code path that writes the session history.
//! Paths crossing this trait are app-relative: an adapter serving the app
//! under a base path adds and strips that base itself.

mod memory;

pub use memory::MemoryHistory;

use crate::error::Result;

/// Callback invoked with the new app-relative path after a back/forward move
pub type ChangeCallback = Box<dyn FnMut(String)>;

pub trait HistoryAdapter {
    /// Current location path, without query or fragment
    fn current_path(&self) -> String;

    /// Pushes a new entry and updates the visible URL without reloading.
    ///
    /// Does not invoke the change callback; the caller resolves the new path
    /// itself.
    fn navigate(&self, path: &str) -> Result<()>;

    /// Replaces the current entry instead of pushing a new one
    fn replace(&self, path: &str) -> Result<()>;

    fn back(&self) -> Result<()>;

    fn forward(&self) -> Result<()>;

    /// Registers the callback for system-initiated (back/forward) path changes.
    ///
    /// An adapter holds a single callback; registering again replaces it.
    fn on_change(&self, callback: ChangeCallback) -> Result<()>;
}
