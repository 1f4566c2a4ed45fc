//! RHTMX Nav Web
//!
//! Browser bindings for `rhtmx-nav`: the History API adapter, DOM mounting of
//! maud views, in-app link interception and a [`Navigator`] handle exported
//! to JavaScript.
//!
//! ```rust,ignore
//! use rhtmx_nav::NavConfig;
//! use rhtmx_nav_web::{mount_app, View};
//!
//! let config = NavConfig::from_toml_str(include_str!("../routes.toml"))?;
//! let views: &[(&str, View)] = &[("root", root_view)];
//! let navigator = mount_app(&config, views)?;
//! navigator.navigate("/workflow/42")?;
//! ```

pub mod history;
pub mod links;
pub mod logging;
pub mod render;

pub use history::BrowserHistory;
pub use render::{default_not_found, render_markup, DomRenderer, NotFoundView, View};

use rhtmx_nav::{AppMount, NavConfig, NavError, Router};
use serde::Serialize;
use std::cell::RefCell;
use tracing::info;
use wasm_bindgen::prelude::*;

thread_local! {
    /// The mounted router, kept for the lifetime of the page
    static MOUNTED: RefCell<Option<Router<View, BrowserHistory>>> = const { RefCell::new(None) };
}

/// Whether [`mount_app`] has completed on this page
pub fn is_mounted() -> bool {
    MOUNTED.with(|mounted| mounted.borrow().is_some())
}

/// Mounts the application described by `config` into the page
///
/// `views` maps the view names used in the configuration to view functions.
/// Runs once per page; a second call fails with [`NavError::AlreadyMounted`].
/// A call that fails leaves the page unmounted, so it can be retried.
pub fn mount_app(config: &NavConfig, views: &[(&str, View)]) -> Result<Navigator, NavError> {
    if is_mounted() {
        return Err(NavError::AlreadyMounted);
    }

    let defs = config.route_defs(|name| {
        views
            .iter()
            .find(|(registered, _)| *registered == name)
            .map(|(_, view)| *view)
    })?;

    let history = BrowserHistory::with_base(config.base_path.as_deref().unwrap_or("/"))?;
    let renderer = DomRenderer::attach(&config.mount_target)?;
    let root = renderer.element().clone();

    let router = AppMount::new(history, renderer).routes(defs).mount()?;
    if config.intercept_links {
        links::intercept_links(&root, router.clone())?;
    }
    MOUNTED.with(|mounted| *mounted.borrow_mut() = Some(router.clone()));

    info!(
        mount_target = %config.mount_target,
        routes = router.table().len(),
        "application mounted"
    );
    Ok(Navigator { router })
}

fn to_js(err: NavError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Navigation API handed to the rest of the application
#[wasm_bindgen]
pub struct Navigator {
    router: Router<View, BrowserHistory>,
}

#[wasm_bindgen]
impl Navigator {
    /// Navigates without reloading the page
    pub fn navigate(&self, path: &str) -> Result<(), JsValue> {
        self.router.navigate(path).map_err(to_js)
    }

    pub fn replace(&self, path: &str) -> Result<(), JsValue> {
        self.router.replace(path).map_err(to_js)
    }

    pub fn back(&self) -> Result<(), JsValue> {
        self.router.back().map_err(to_js)
    }

    pub fn forward(&self) -> Result<(), JsValue> {
        self.router.forward().map_err(to_js)
    }

    /// Parameters bound by the current route, as a plain object
    #[wasm_bindgen(js_name = getCurrentParams)]
    pub fn current_params_js(&self) -> Result<JsValue, JsValue> {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        Ok(self.router.current_params().serialize(&serializer)?)
    }

    /// Path the current route was resolved from
    #[wasm_bindgen(js_name = currentPath)]
    pub fn current_path(&self) -> String {
        self.router
            .current()
            .map(|current| current.path)
            .unwrap_or_else(|| "/".to_string())
    }
}

impl Navigator {
    pub fn router(&self) -> &Router<View, BrowserHistory> {
        &self.router
    }
}
