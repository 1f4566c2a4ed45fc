//! One-shot application bootstrap.
//!
//! [`AppMount`] builds the route table, binds a [`Router`] to a history
//! adapter, subscribes the renderer as the router's only subscriber and
//! performs the initial resolution. `mount` consumes the builder, so an
//! application is mounted exactly once.

use crate::error::Result;
use crate::history::HistoryAdapter;
use crate::route::{RouteDef, RouteTable};
use crate::router::{CurrentRoute, Router};
use tracing::info;

/// Draws the current route into the attachment point
///
/// Each call replaces whatever the previous call drew. What to draw for an
/// unmatched path is the renderer's policy.
pub trait Renderer<V> {
    fn render(&mut self, route: &CurrentRoute<V>);
}

/// Adapts a closure into a [`Renderer`]
pub struct RenderFn<F>(pub F);

impl<V, F> Renderer<V> for RenderFn<F>
where
    F: FnMut(&CurrentRoute<V>),
{
    fn render(&mut self, route: &CurrentRoute<V>) {
        (self.0)(route)
    }
}

pub struct AppMount<V, H, R> {
    routes: Vec<RouteDef<V>>,
    history: H,
    renderer: R,
}

impl<V, H, R> AppMount<V, H, R>
where
    V: Clone + 'static,
    H: HistoryAdapter + 'static,
    R: Renderer<V> + 'static,
{
    pub fn new(history: H, renderer: R) -> Self {
        Self {
            routes: Vec::new(),
            history,
            renderer,
        }
    }

    /// Appends a route; order of calls is match order
    pub fn route(mut self, pattern: impl Into<String>, view: V) -> Self {
        self.routes.push(RouteDef::new(pattern, view));
        self
    }

    pub fn named_route(mut self, name: impl Into<String>, pattern: impl Into<String>, view: V) -> Self {
        self.routes.push(RouteDef::new(pattern, view).named(name));
        self
    }

    /// Appends routes from static configuration
    pub fn routes<I>(mut self, defs: I) -> Self
    where
        I: IntoIterator<Item = RouteDef<V>>,
    {
        self.routes.extend(defs);
        self
    }

    /// Builds the table, starts the router and renders the initial route
    ///
    /// # Errors
    ///
    /// A malformed table yields [`NavError::Configuration`](crate::NavError::Configuration)
    /// before anything is rendered; a host without session history yields
    /// [`NavError::EnvironmentUnsupported`](crate::NavError::EnvironmentUnsupported).
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_nav::{AppMount, CurrentRoute, MemoryHistory, RenderFn};
    ///
    /// let renderer = RenderFn(|route: &CurrentRoute<&'static str>| {
    ///     println!("render {}", route.path);
    /// });
    /// let router = AppMount::new(MemoryHistory::new("/workflow/42"), renderer)
    /// .route("/", "root")
    /// .route("/workflow/:workflowId", "root")
    /// .mount()
    /// .unwrap();
    ///
    /// assert_eq!(router.current_params().get("workflowId"), Some("42"));
    /// ```
    pub fn mount(self) -> Result<Router<V, H>> {
        let table = RouteTable::from_defs(self.routes)?;
        info!(routes = table.len(), "mounting application");

        let router = Router::new(table, self.history);
        let mut renderer = self.renderer;
        router.subscribe(move |route: &CurrentRoute<V>| renderer.render(route))?;
        router.start()?;
        Ok(router)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, NavError};
    use crate::history::MemoryHistory;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Frames = Rc<RefCell<Vec<(Option<&'static str>, String)>>>;

    fn recorder() -> (Frames, RenderFn<impl FnMut(&CurrentRoute<&'static str>)>) {
        let frames: Frames = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&frames);
        let renderer = RenderFn(move |route: &CurrentRoute<&'static str>| {
            sink.borrow_mut()
                .push((route.view().copied(), route.path.clone()));
        });
        (frames, renderer)
    }

    #[test]
    fn test_mount_renders_initial_route() {
        let (frames, renderer) = recorder();
        AppMount::new(MemoryHistory::new("/"), renderer)
            .route("/", "root")
            .mount()
            .unwrap();

        assert_eq!(*frames.borrow(), vec![(Some("root"), "/".to_string())]);
    }

    #[test]
    fn test_mount_renders_no_match_through_renderer() {
        let (frames, renderer) = recorder();
        AppMount::new(MemoryHistory::new("/missing"), renderer)
            .route("/", "root")
            .mount()
            .unwrap();

        assert_eq!(*frames.borrow(), vec![(None, "/missing".to_string())]);
    }

    #[test]
    fn test_mount_fails_on_bad_config_without_rendering() {
        let (frames, renderer) = recorder();
        let result = AppMount::new(MemoryHistory::new("/"), renderer)
            .route("/:id/:id", "root")
            .mount();

        assert!(matches!(
            result,
            Err(NavError::Configuration(ConfigError::DuplicateParam { .. }))
        ));
        assert!(frames.borrow().is_empty());
    }

    #[test]
    fn test_mount_fails_without_history_support() {
        let (frames, renderer) = recorder();
        let result = AppMount::new(MemoryHistory::unsupported("/"), renderer)
            .route("/", "root")
            .mount();

        assert!(matches!(result, Err(NavError::EnvironmentUnsupported(_))));
        assert!(frames.borrow().is_empty());
    }
}
