//! Mounting resolved views into the DOM.

use maud::{html, Markup};
use rhtmx_nav::{CurrentRoute, MatchResult, NavError, Params, Renderer};
use tracing::debug;
use web_sys::Element;

/// A view: renders markup from the parameters of the route it is bound to
pub type View = fn(&Params) -> Markup;

/// Rendered in place of a view when no route matches
pub type NotFoundView = fn(&str) -> Markup;

/// Default not-found policy
pub fn default_not_found(path: &str) -> Markup {
    html! {
        section class="rhtmx-not-found" {
            h1 { "Not found" }
            p { "No page matches " code { (path) } }
        }
    }
}

/// Markup for a route: the bound view, or the not-found view for `NoMatch`
pub fn render_markup(route: &CurrentRoute<View>, not_found: NotFoundView) -> Markup {
    match &route.outcome {
        MatchResult::Matched { view, params, .. } => view(params),
        MatchResult::NoMatch => not_found(&route.path),
    }
}

/// Renders into one element, replacing its content on every route change
pub struct DomRenderer {
    target_id: String,
    element: Element,
    not_found: NotFoundView,
}

impl DomRenderer {
    /// Looks up the attachment point by element id
    pub fn attach(target_id: &str) -> Result<Self, NavError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| NavError::EnvironmentUnsupported("no `document`".to_string()))?;
        let element = document
            .get_element_by_id(target_id)
            .ok_or_else(|| NavError::MountTargetMissing(target_id.to_string()))?;

        Ok(Self {
            target_id: target_id.to_string(),
            element,
            not_found: default_not_found,
        })
    }

    pub fn with_not_found(mut self, not_found: NotFoundView) -> Self {
        self.not_found = not_found;
        self
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl Renderer<View> for DomRenderer {
    fn render(&mut self, route: &CurrentRoute<View>) {
        let markup = render_markup(route, self.not_found);
        self.element.set_inner_html(&markup.into_string());
        debug!(
            mount_target = %self.target_id,
            path = %route.path,
            matched = route.is_matched(),
            "view rendered"
        );
    }
}
