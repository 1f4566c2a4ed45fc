//! [`HistoryAdapter`] over the browser History API.

use rhtmx_nav::history::{ChangeCallback, HistoryAdapter};
use rhtmx_nav::path::{join_base, normalize_path, strip_base};
use rhtmx_nav::NavError;
use std::cell::RefCell;
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, History, Window};

type Result<T> = std::result::Result<T, NavError>;

/// Session history of the current browser tab
///
/// Paths handed to and reported by this adapter are relative to `base`; the
/// address bar shows them prefixed with it.
pub struct BrowserHistory {
    window: Window,
    history: History,
    base: String,
    popstate: RefCell<Option<Closure<dyn FnMut(Event)>>>,
}

impl BrowserHistory {
    /// Adapter for an app served from the site root
    pub fn new() -> Result<Self> {
        Self::with_base("/")
    }

    /// # Errors
    ///
    /// [`NavError::EnvironmentUnsupported`] when there is no `window` or no
    /// `window.history` (workers, non-browser embeddings).
    pub fn with_base(base: &str) -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| NavError::EnvironmentUnsupported("no global `window`".to_string()))?;
        let history = window.history().map_err(|err| {
            NavError::EnvironmentUnsupported(format!("window.history is unavailable: {:?}", err))
        })?;

        Ok(Self {
            window,
            history,
            base: normalize_path(base).into_owned(),
            popstate: RefCell::new(None),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn pathname(window: &Window) -> String {
        window
            .location()
            .pathname()
            .unwrap_or_else(|_| "/".to_string())
    }
}

fn rejected(action: &str, err: JsValue) -> NavError {
    NavError::HistoryRejected(format!("{} failed: {:?}", action, err))
}

impl HistoryAdapter for BrowserHistory {
    fn current_path(&self) -> String {
        let pathname = Self::pathname(&self.window);
        strip_base(&self.base, &pathname).to_string()
    }

    fn navigate(&self, path: &str) -> Result<()> {
        let url = join_base(&self.base, path);
        debug!(url = %url, "pushState");
        self.history
            .push_state_with_url(&JsValue::NULL, "", Some(&url))
            .map_err(|err| rejected("pushState", err))
    }

    fn replace(&self, path: &str) -> Result<()> {
        let url = join_base(&self.base, path);
        debug!(url = %url, "replaceState");
        self.history
            .replace_state_with_url(&JsValue::NULL, "", Some(&url))
            .map_err(|err| rejected("replaceState", err))
    }

    fn back(&self) -> Result<()> {
        self.history.back().map_err(|err| rejected("history.back", err))
    }

    fn forward(&self) -> Result<()> {
        self.history
            .forward()
            .map_err(|err| rejected("history.forward", err))
    }

    fn on_change(&self, mut callback: ChangeCallback) -> Result<()> {
        let window = self.window.clone();
        let base = self.base.clone();
        let listener = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let pathname = Self::pathname(&window);
            callback(strip_base(&base, &pathname).to_string());
        });

        self.window
            .add_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref())
            .map_err(|err| {
                NavError::EnvironmentUnsupported(format!("cannot listen for popstate: {:?}", err))
            })?;

        if let Some(previous) = self.popstate.borrow_mut().replace(listener) {
            let _ = self
                .window
                .remove_event_listener_with_callback("popstate", previous.as_ref().unchecked_ref());
        }
        Ok(())
    }
}

impl Drop for BrowserHistory {
    fn drop(&mut self) {
        if let Some(listener) = self.popstate.get_mut().take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref());
        }
    }
}
