//! The router: owns the route table, observes the history adapter and keeps
//! the single authoritative [`CurrentRoute`].
//!
//! State machine:
//!
//! ```text
//! Uninitialized --start()--> Resolved --navigate/replace/back/forward--> Resolved
//! ```
//!
//! Every transition into `Resolved` overwrites the current route (a `NoMatch`
//! outcome included) and publishes it to the one bound subscriber.

use crate::error::{NavError, Result};
use crate::history::HistoryAdapter;
use crate::matcher::{match_path, MatchResult, Params};
use crate::path::{route_path, strip_query_and_fragment};
use crate::route::RouteTable;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// The latest resolution together with the path it came from
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentRoute<V> {
    /// App-relative path without query, fragment or trailing `/`
    pub path: String,
    pub outcome: MatchResult<V>,
}

impl<V> CurrentRoute<V> {
    pub fn is_matched(&self) -> bool {
        self.outcome.is_matched()
    }

    pub fn view(&self) -> Option<&V> {
        self.outcome.view()
    }

    /// Bound parameters; empty for `NoMatch`
    pub fn params(&self) -> Params {
        self.outcome.params().cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouterState<V> {
    Uninitialized,
    Resolved(CurrentRoute<V>),
}

pub type RouteSubscriber<V> = Box<dyn FnMut(&CurrentRoute<V>)>;

/// Handle to the application's router
///
/// Clones share the same state; the composition root creates one router and
/// hands clones to whatever needs to navigate.
///
/// # Examples
///
/// ```
/// use rhtmx_nav::{MemoryHistory, RouteTable, Router};
///
/// let table = RouteTable::new([("/", "root"), ("/workflow/:workflowId", "root")]).unwrap();
/// let router = Router::new(table, MemoryHistory::new("/"));
/// router.start().unwrap();
///
/// router.navigate("/workflow/42").unwrap();
/// assert_eq!(router.current_params().get("workflowId"), Some("42"));
/// ```
pub struct Router<V, H> {
    inner: Rc<Inner<V, H>>,
}

struct Inner<V, H> {
    table: RouteTable<V>,
    history: H,
    state: RefCell<RouterState<V>>,
    subscriber: RefCell<Option<RouteSubscriber<V>>>,
    subscribed: Cell<bool>,
    publishing: Cell<bool>,
    pending: Cell<bool>,
}

impl<V, H> Clone for Router<V, H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<V, H> Router<V, H>
where
    V: Clone + 'static,
    H: HistoryAdapter + 'static,
{
    pub fn new(table: RouteTable<V>, history: H) -> Self {
        Self {
            inner: Rc::new(Inner {
                table,
                history,
                state: RefCell::new(RouterState::Uninitialized),
                subscriber: RefCell::new(None),
                subscribed: Cell::new(false),
                publishing: Cell::new(false),
                pending: Cell::new(false),
            }),
        }
    }

    /// Performs the one-time `Uninitialized -> Resolved` transition
    ///
    /// Registers for history changes, resolves the current location and
    /// publishes it to the subscriber, if one is bound.
    ///
    /// # Errors
    ///
    /// [`NavError::AlreadyStarted`] on a second call;
    /// [`NavError::EnvironmentUnsupported`] when the adapter cannot deliver
    /// change notifications. The router stays `Uninitialized` on error.
    pub fn start(&self) -> Result<CurrentRoute<V>> {
        if self.is_resolved() {
            return Err(NavError::AlreadyStarted);
        }

        let weak = Rc::downgrade(&self.inner);
        self.inner.history.on_change(Box::new(move |path: String| {
            if let Some(inner) = weak.upgrade() {
                debug!(path = %path, "history change");
                inner.resolve(&path);
                inner.publish();
            }
        }))?;

        let path = self.inner.history.current_path();
        let current = self.inner.resolve(&path);
        info!(
            path = %current.path,
            matched = current.is_matched(),
            routes = self.inner.table.len(),
            "router started"
        );
        self.inner.publish();
        Ok(current)
    }

    /// Programmatic navigation: pushes a history entry, then re-resolves
    ///
    /// Navigating to the path that is already current (and carries no query
    /// or fragment) leaves history and the current route untouched.
    pub fn navigate(&self, path: &str) -> Result<()> {
        self.go(path, false)
    }

    /// Like [`navigate`](Self::navigate) but replaces the current history entry
    pub fn replace(&self, path: &str) -> Result<()> {
        self.go(path, true)
    }

    /// Steps back; the route is re-resolved when the adapter reports the change
    pub fn back(&self) -> Result<()> {
        self.ensure_resolved()?;
        self.inner.history.back()
    }

    pub fn forward(&self) -> Result<()> {
        self.ensure_resolved()?;
        self.inner.history.forward()
    }

    /// Binds the single subscriber that is told about every route change
    pub fn subscribe<F>(&self, callback: F) -> Result<()>
    where
        F: FnMut(&CurrentRoute<V>) + 'static,
    {
        if self.inner.subscribed.replace(true) {
            warn!("rejected second route subscriber");
            return Err(NavError::SubscriberAlreadyBound);
        }
        *self.inner.subscriber.borrow_mut() = Some(Box::new(callback));
        Ok(())
    }

    pub fn state(&self) -> RouterState<V> {
        self.inner.state.borrow().clone()
    }

    pub fn is_resolved(&self) -> bool {
        matches!(*self.inner.state.borrow(), RouterState::Resolved(_))
    }

    pub fn current(&self) -> Option<CurrentRoute<V>> {
        match &*self.inner.state.borrow() {
            RouterState::Resolved(current) => Some(current.clone()),
            RouterState::Uninitialized => None,
        }
    }

    /// Parameters bound by the current route; empty before start and for `NoMatch`
    pub fn current_params(&self) -> Params {
        match &*self.inner.state.borrow() {
            RouterState::Resolved(current) => current.params(),
            RouterState::Uninitialized => Params::new(),
        }
    }

    /// Builds the URL of a named route
    pub fn href(&self, name: &str, params: &Params) -> Option<String> {
        self.inner
            .table
            .find_by_name(name)
            .and_then(|entry| entry.pattern().href(params))
    }

    pub fn table(&self) -> &RouteTable<V> {
        &self.inner.table
    }

    pub fn history(&self) -> &H {
        &self.inner.history
    }

    fn ensure_resolved(&self) -> Result<()> {
        if self.is_resolved() {
            Ok(())
        } else {
            Err(NavError::NotStarted)
        }
    }

    fn go(&self, path: &str, replace: bool) -> Result<()> {
        if path.is_empty() {
            return Err(NavError::EmptyPath);
        }
        let current_path = match &*self.inner.state.borrow() {
            RouterState::Resolved(current) => current.path.clone(),
            RouterState::Uninitialized => return Err(NavError::NotStarted),
        };

        let pathname = strip_query_and_fragment(path);
        let suffix = &path[pathname.len()..];
        // A bare `?query` or `#fragment` stays on the current path
        let target = route_path(pathname)
            .map_or_else(|| current_path.clone(), |p| p.into_owned());

        if suffix.is_empty() && current_path == target {
            debug!(path = %target, "navigation to current route ignored");
            return Ok(());
        }

        let location = format!("{}{}", target, suffix);
        if replace {
            self.inner.history.replace(&location)?;
        } else {
            self.inner.history.navigate(&location)?;
        }
        debug!(from = %current_path, to = %location, replace, "navigate");

        self.inner.resolve(&location);
        self.inner.publish();
        Ok(())
    }
}

impl<V: Clone, H> Inner<V, H> {
    /// Sole writer of the current route
    fn resolve(&self, path: &str) -> CurrentRoute<V> {
        let outcome = match_path(path, &self.table);
        let current = CurrentRoute {
            path: route_path(path).map_or_else(String::new, |p| p.into_owned()),
            outcome,
        };

        match current.outcome.pattern() {
            Some(pattern) => debug!(path = %current.path, pattern, "route resolved"),
            None => warn!(path = %current.path, "no route matches path"),
        }

        *self.state.borrow_mut() = RouterState::Resolved(current.clone());
        current
    }

    /// Delivers the latest route to the subscriber
    ///
    /// A navigation triggered from inside the callback is not delivered
    /// re-entrantly; it sets `pending` and the loop delivers the newest state
    /// once the callback returns.
    fn publish(&self) {
        if self.publishing.replace(true) {
            self.pending.set(true);
            return;
        }

        loop {
            let current = match &*self.state.borrow() {
                RouterState::Resolved(current) => current.clone(),
                RouterState::Uninitialized => break,
            };
            let taken = self.subscriber.borrow_mut().take();
            let Some(mut subscriber) = taken else {
                break;
            };

            subscriber(&current);

            let mut slot = self.subscriber.borrow_mut();
            if slot.is_none() {
                *slot = Some(subscriber);
            }
            drop(slot);

            if !self.pending.replace(false) {
                break;
            }
        }

        self.pending.set(false);
        self.publishing.set(false);
    }
}
