//! Browser tests; run with `wasm-pack test --headless --firefox crates/rhtmx-nav-web`.

#![cfg(target_arch = "wasm32")]

use maud::{html, Markup};
use rhtmx_nav::{AppMount, HistoryAdapter, NavConfig, NavError, Params};
use rhtmx_nav_web::{is_mounted, mount_app, BrowserHistory, DomRenderer, View};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn root_view(params: &Params) -> Markup {
    html! {
        @match params.get("workflowId") {
            Some(id) => h1 { "Workflow " (id) },
            None => h1 { "Workflows" },
        }
    }
}

fn attach_target(id: &str) {
    let document = web_sys::window().unwrap().document().unwrap();
    let element = document.create_element("div").unwrap();
    element.set_id(id);
    document.body().unwrap().append_child(&element).unwrap();
}

#[wasm_bindgen_test]
fn missing_mount_target_is_reported() {
    let err = DomRenderer::attach("does-not-exist").err().unwrap();
    assert!(matches!(err, NavError::MountTargetMissing(id) if id == "does-not-exist"));
}

#[wasm_bindgen_test]
fn push_state_updates_location_without_reload() {
    let history = BrowserHistory::new().unwrap();
    history.navigate("/workflow/77").unwrap();
    assert_eq!(history.current_path(), "/workflow/77");
    history.replace("/").unwrap();
    assert_eq!(history.current_path(), "/");
}

#[wasm_bindgen_test]
fn mount_renders_and_rerenders_in_place() {
    attach_target("app-under-test");
    let history = BrowserHistory::new().unwrap();
    history.replace("/").unwrap();

    let renderer = DomRenderer::attach("app-under-test").unwrap();
    let element = renderer.element().clone();
    let router = AppMount::new(history, renderer)
        .route("/", root_view as View)
        .route("/workflow/:workflowId", root_view as View)
        .mount()
        .unwrap();

    assert_eq!(element.inner_html(), "<h1>Workflows</h1>");

    router.navigate("/workflow/42").unwrap();
    assert_eq!(element.inner_html(), "<h1>Workflow 42</h1>");
    assert_eq!(router.current_params().get("workflowId"), Some("42"));

    router.navigate("/nowhere").unwrap();
    assert!(element.inner_html().contains("Not found"));
}

// The only test that calls `mount_app`: the mount guard is per page.
#[wasm_bindgen_test]
fn mount_guard_is_set_only_after_a_successful_mount() {
    let config = NavConfig::from_toml_str(
        r#"
        mount_target = "app-mounted-once"
        intercept_links = false

        [[routes]]
        path = "/"
        view = "root"

        [[routes]]
        path = "/workflow/:workflowId"
        view = "root"
        "#,
    )
    .unwrap();
    let views: &[(&str, View)] = &[("root", root_view)];

    let err = mount_app(&config, views).err().unwrap();
    assert!(matches!(err, NavError::MountTargetMissing(_)));
    assert!(!is_mounted());

    attach_target("app-mounted-once");
    BrowserHistory::new().unwrap().replace("/workflow/5").unwrap();
    let navigator = mount_app(&config, views).unwrap();
    let router = navigator.router().clone();
    drop(navigator);

    assert!(is_mounted());
    assert!(matches!(mount_app(&config, views), Err(NavError::AlreadyMounted)));
    assert_eq!(router.current_params().get("workflowId"), Some("5"));
}
