//! Workflow viewer
//!
//! Single-page app with one root view. `/` lists workflows and
//! `/workflow/:workflowId` shows one; both resolve to [`root_view`], which
//! reads the bound `workflowId` to decide what to draw.
//!
//! ```js
//! import init, { boot } from "./pkg/workflow_app.js";
//!
//! await init();
//! const nav = boot();
//! nav.navigate("/workflow/42");
//! console.log(nav.getCurrentParams()); // { workflowId: "42" }
//! ```

use maud::{html, Markup};
use rhtmx_nav::{NavConfig, Params};
use rhtmx_nav_web::{logging, mount_app, Navigator, View};
use tracing::error;
use wasm_bindgen::prelude::*;

/// Route configuration compiled into the bundle
pub const ROUTES_TOML: &str = include_str!("../routes.toml");

/// Views addressable from `routes.toml`
pub const VIEWS: &[(&str, View)] = &[("root", root_view)];

pub fn root_view(params: &Params) -> Markup {
    html! {
        main.workflow-app {
            @match params.get("workflowId") {
                Some(id) => {
                    h1 { "Workflow " (id) }
                    a href="/" { "All workflows" }
                }
                None => {
                    h1 { "Workflows" }
                    p { "Select a workflow to inspect it." }
                }
            }
        }
    }
}

pub fn config() -> anyhow::Result<NavConfig> {
    NavConfig::from_toml_str(ROUTES_TOML)
}

/// Mounts the app at `#app` and returns the navigation handle
#[wasm_bindgen]
pub fn boot() -> Result<Navigator, JsValue> {
    logging::init();

    let config = config().map_err(|err| {
        error!(error = %err, "invalid route configuration");
        JsValue::from_str(&format!("{:#}", err))
    })?;

    mount_app(&config, VIEWS).map_err(|err| {
        error!(error = %err, "failed to mount application");
        JsValue::from_str(&err.to_string())
    })
}
