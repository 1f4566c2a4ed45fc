use super::{ChangeCallback, HistoryAdapter};
use crate::error::{NavError, Result};
use crate::path::strip_query_and_fragment;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use tracing::debug;

/// In-process session history
///
/// Keeps an entry stack and a cursor the way a browser tab does. `back` and
/// `forward` notify the change callback synchronously, which makes this the
/// adapter for tests and for hosts without a browser.
///
/// # Examples
///
/// ```
/// use rhtmx_nav::{HistoryAdapter, MemoryHistory};
///
/// let history = MemoryHistory::new("/");
/// history.navigate("/workflow/42").unwrap();
/// assert_eq!(history.current_path(), "/workflow/42");
///
/// history.back().unwrap();
/// assert_eq!(history.current_path(), "/");
/// ```
pub struct MemoryHistory {
    stack: RefCell<Stack>,
    listener: RefCell<Option<ChangeCallback>>,
    /// Changes made while the listener is running, delivered after it returns
    queued: RefCell<VecDeque<String>>,
    delivering: Cell<bool>,
    supported: bool,
}

struct Stack {
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            stack: RefCell::new(Stack {
                entries: vec![initial.into()],
                cursor: 0,
            }),
            listener: RefCell::new(None),
            queued: RefCell::new(VecDeque::new()),
            delivering: Cell::new(false),
            supported: true,
        }
    }

    /// A history that behaves like an embedding without a history API
    ///
    /// `current_path` still reports `initial`; every write and the change
    /// subscription fail with [`NavError::EnvironmentUnsupported`].
    pub fn unsupported(initial: impl Into<String>) -> Self {
        Self {
            supported: false,
            ..Self::new(initial)
        }
    }

    /// All entries, oldest first, as pushed (query and fragment included)
    pub fn entries(&self) -> Vec<String> {
        self.stack.borrow().entries.clone()
    }

    /// Index of the current entry
    pub fn position(&self) -> usize {
        self.stack.borrow().cursor
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.borrow().cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        let stack = self.stack.borrow();
        stack.cursor + 1 < stack.entries.len()
    }

    fn ensure_supported(&self) -> Result<()> {
        if self.supported {
            Ok(())
        } else {
            Err(NavError::EnvironmentUnsupported(
                "session history is not available".to_string(),
            ))
        }
    }

    fn traverse(&self, forward: bool) -> Result<()> {
        self.ensure_supported()?;

        let path = {
            let mut stack = self.stack.borrow_mut();
            let target = if forward {
                stack.cursor + 1
            } else {
                match stack.cursor.checked_sub(1) {
                    Some(target) => target,
                    None => {
                        debug!("history back ignored: already at first entry");
                        return Ok(());
                    }
                }
            };
            if target >= stack.entries.len() {
                debug!("history forward ignored: already at last entry");
                return Ok(());
            }
            stack.cursor = target;
            strip_query_and_fragment(&stack.entries[target]).to_string()
        };

        debug!(path = %path, forward, "history traversal");
        self.notify(path);
        Ok(())
    }

    /// Delivers `path` to the listener, one change at a time
    ///
    /// A traversal made by the listener itself is queued and delivered in
    /// order once the running call returns.
    fn notify(&self, path: String) {
        self.queued.borrow_mut().push_back(path);
        if self.delivering.replace(true) {
            return;
        }

        loop {
            let next = self.queued.borrow_mut().pop_front();
            let Some(path) = next else {
                break;
            };
            // Taken out for the call so the callback may use this adapter again
            let taken = self.listener.borrow_mut().take();
            if let Some(mut callback) = taken {
                callback(path);
                let mut slot = self.listener.borrow_mut();
                if slot.is_none() {
                    *slot = Some(callback);
                }
            }
        }

        self.delivering.set(false);
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl HistoryAdapter for MemoryHistory {
    fn current_path(&self) -> String {
        let stack = self.stack.borrow();
        strip_query_and_fragment(&stack.entries[stack.cursor]).to_string()
    }

    fn navigate(&self, path: &str) -> Result<()> {
        self.ensure_supported()?;
        let mut stack = self.stack.borrow_mut();
        let keep = stack.cursor + 1;
        stack.entries.truncate(keep);
        stack.entries.push(path.to_string());
        stack.cursor = keep;
        Ok(())
    }

    fn replace(&self, path: &str) -> Result<()> {
        self.ensure_supported()?;
        let mut stack = self.stack.borrow_mut();
        let cursor = stack.cursor;
        stack.entries[cursor] = path.to_string();
        Ok(())
    }

    fn back(&self) -> Result<()> {
        self.traverse(false)
    }

    fn forward(&self) -> Result<()> {
        self.traverse(true)
    }

    fn on_change(&self, callback: ChangeCallback) -> Result<()> {
        self.ensure_supported()?;
        *self.listener.borrow_mut() = Some(callback);
        Ok(())
    }
}
