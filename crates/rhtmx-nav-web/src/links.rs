//! Turns clicks on in-app `<a href>` links into router navigations.

use crate::history::BrowserHistory;
use crate::render::View;
use rhtmx_nav::path::strip_base;
use rhtmx_nav::{NavError, Router};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};

/// App-relative path for an `href`, or `None` if the browser should handle it
///
/// Only same-origin absolute paths inside `base` qualify; protocol-relative
/// (`//host`), external and relative hrefs are left alone.
///
/// ```
/// use rhtmx_nav_web::links::in_app_path;
///
/// assert_eq!(in_app_path("/", "/workflow/42").as_deref(), Some("/workflow/42"));
/// assert_eq!(in_app_path("/console", "/console/workflow/42").as_deref(), Some("/workflow/42"));
/// assert_eq!(in_app_path("/console", "/docs"), None);
/// assert_eq!(in_app_path("/", "https://example.com/"), None);
/// assert_eq!(in_app_path("/", "//cdn.example.com/app.js"), None);
/// ```
pub fn in_app_path(base: &str, href: &str) -> Option<String> {
    if !href.starts_with('/') || href.starts_with("//") {
        return None;
    }
    let relative = strip_base(base, href);
    let outside_base = !base.trim_end_matches('/').is_empty() && relative == href;
    (!outside_base).then(|| relative.to_string())
}

fn link_target(event: &MouseEvent, base: &str) -> Option<String> {
    if event.default_prevented()
        || event.button() != 0
        || event.ctrl_key()
        || event.meta_key()
        || event.shift_key()
        || event.alt_key()
    {
        return None;
    }

    let target = event.target()?.dyn_into::<Element>().ok()?;
    let anchor = target.closest("a[href]").ok()??;
    if anchor.has_attribute("target") || anchor.has_attribute("download") {
        return None;
    }
    in_app_path(base, &anchor.get_attribute("href")?)
}

/// Installs a delegated click listener on `root`
///
/// The listener lives as long as the page, like the router it drives.
pub fn intercept_links(
    root: &Element,
    router: Router<View, BrowserHistory>,
) -> Result<(), NavError> {
    let base = router.history().base().to_string();
    let listener = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let Some(path) = link_target(&event, &base) else {
            return;
        };
        event.prevent_default();
        if let Err(err) = router.navigate(&path) {
            warn!(error = %err, path = %path, "link navigation failed");
        }
    });

    root.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
        .map_err(|err| {
            NavError::EnvironmentUnsupported(format!("cannot listen for clicks: {:?}", err))
        })?;
    listener.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_app_path_root_base() {
        assert_eq!(in_app_path("/", "/").as_deref(), Some("/"));
        assert_eq!(in_app_path("/", "/workflow/1?tab=x").as_deref(), Some("/workflow/1?tab=x"));
        assert_eq!(in_app_path("/", "workflow/1"), None);
        assert_eq!(in_app_path("/", "#section"), None);
    }

    #[test]
    fn test_in_app_path_with_base() {
        assert_eq!(in_app_path("/console", "/console").as_deref(), Some("/"));
        assert_eq!(in_app_path("/console/", "/console/workflow/9").as_deref(), Some("/workflow/9"));
        assert_eq!(in_app_path("/console", "/consoles/9"), None);
    }
}
