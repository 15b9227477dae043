//! Client-side router.
//!
//! # Responsibility
//! - Map the current location to a registered view.
//! - Push history and re-render on navigation without reloading the host.
//! - Bind `data-link` anchors of freshly rendered content for interception.
//!
//! # Invariants
//! - A render pass is one synchronous step: resolve, render, mount, bind.
//!   Links are bound before the pass returns, never deferred.
//! - At most one route per literal pattern string; re-registering replaces
//!   the view and keeps its first registration position.
//! - Exact literal lookup runs before dynamic patterns, and dynamic patterns
//!   are tried in registration order.
//! - Unmatched paths render the built-in not-found view; navigation is
//!   never rejected.
//! - Route params only survive until the next render pass.

mod history;
mod links;
mod mount;
mod pattern;

pub use history::{History, MemoryHistory};
pub use links::bound_links;
pub use mount::{MemoryMount, Mount};
pub use pattern::{RouteParams, RoutePattern};

use log::debug;

/// Markup rendered when no route matches.
pub const NOT_FOUND_MARKUP: &str = "<h1>404 - Page Not Found</h1>";

/// What a view sees of the current render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    /// Location path with any query string or fragment removed.
    pub path: &'a str,
    pub params: &'a RouteParams,
}

/// Pure rendering function over the render context `C`.
pub type View<C> = Box<dyn Fn(&C, &RenderRequest<'_>) -> String>;

/// How the last render pass resolved its view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Registry key equal to the path.
    Literal(String),
    /// Dynamic pattern that matched the path.
    Dynamic(String),
    NotFound,
}

struct Route<C> {
    pattern: RoutePattern,
    view: View<C>,
}

/// Router over a history `H`, a mount `M` and a view context `C`.
pub struct Router<H, M, C> {
    history: H,
    mount: M,
    routes: Vec<Route<C>>,
    params: RouteParams,
    links: Vec<String>,
    outcome: Option<RouteOutcome>,
}

impl<H: History, M: Mount, C> Router<H, M, C> {
    pub fn new(history: H, mount: M) -> Self {
        Self {
            history,
            mount,
            routes: Vec::new(),
            params: RouteParams::new(),
            links: Vec::new(),
            outcome: None,
        }
    }

    /// Adds or replaces the view for `pattern`.
    ///
    /// Routes registered after `init` are only seen from the next render.
    pub fn register_route(
        &mut self,
        pattern: &str,
        view: impl Fn(&C, &RenderRequest<'_>) -> String + 'static,
    ) {
        let view: View<C> = Box::new(view);
        if let Some(existing) = self
            .routes
            .iter_mut()
            .find(|route| route.pattern.source() == pattern)
        {
            existing.view = view;
            return;
        }

        self.routes.push(Route {
            pattern: RoutePattern::parse(pattern),
            view,
        });
    }

    /// Renders the current location once.
    ///
    /// Back/forward signals from the host go through `handle_pop_state`.
    pub fn init(&mut self, ctx: &C) {
        debug!(
            "event=router_init module=router status=ok routes={}",
            self.routes.len()
        );
        self.render(ctx);
    }

    /// Pushes `path` onto history and renders it.
    pub fn navigate_to(&mut self, path: &str, ctx: &C) {
        self.history.push_state(path);
        self.render(ctx);
    }

    /// Re-renders after the host moved through history.
    pub fn handle_pop_state(&mut self, ctx: &C) {
        self.render(ctx);
    }

    /// Re-renders the current location, e.g. after a mutation that should
    /// be visible immediately.
    pub fn refresh(&mut self, ctx: &C) {
        self.render(ctx);
    }

    /// Click handler for links in the current content.
    ///
    /// Navigates and returns `true` only when `href` belongs to a bound
    /// `data-link` element; other links are left to the host.
    pub fn follow_link(&mut self, href: &str, ctx: &C) -> bool {
        if !self.links.iter().any(|bound| bound == href) {
            return false;
        }
        self.navigate_to(href, ctx);
        true
    }

    /// Steps history back and re-renders. Returns `false` at the first entry.
    pub fn back(&mut self, ctx: &C) -> bool {
        let moved = self.history.back();
        if moved {
            self.handle_pop_state(ctx);
        }
        moved
    }

    /// Steps history forward and re-renders. Returns `false` at the last entry.
    pub fn forward(&mut self, ctx: &C) -> bool {
        let moved = self.history.forward();
        if moved {
            self.handle_pop_state(ctx);
        }
        moved
    }

    /// Params captured by the last dynamic match; empty otherwise.
    pub fn get_route_params(&self) -> &RouteParams {
        &self.params
    }

    /// Hrefs bound for interception by the last render pass.
    pub fn bound_links(&self) -> &[String] {
        &self.links
    }

    /// `None` until the first render pass.
    pub fn last_outcome(&self) -> Option<&RouteOutcome> {
        self.outcome.as_ref()
    }

    pub fn current_path(&self) -> String {
        self.history.current_path()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn mount(&self) -> &M {
        &self.mount
    }

    /// One synchronous pass: resolve, render, mount, bind links.
    fn render(&mut self, ctx: &C) {
        let location = self.history.current_path();
        let path = strip_query(&location);

        let (index, params, outcome) = self.resolve(path);
        self.params = params;

        let markup = match index {
            Some(index) => {
                let request = RenderRequest {
                    path,
                    params: &self.params,
                };
                (self.routes[index].view)(ctx, &request)
            }
            None => NOT_FOUND_MARKUP.to_string(),
        };

        self.mount.replace_content(&markup);
        self.links = bound_links(&markup);
        debug!(
            "event=route_render module=router status=ok path={path} outcome={} links={}",
            outcome_label(&outcome),
            self.links.len()
        );
        self.outcome = Some(outcome);
    }

    fn resolve(&self, path: &str) -> (Option<usize>, RouteParams, RouteOutcome) {
        if let Some(index) = self
            .routes
            .iter()
            .position(|route| route.pattern.source() == path)
        {
            return (
                Some(index),
                RouteParams::new(),
                RouteOutcome::Literal(path.to_string()),
            );
        }

        for (index, route) in self.routes.iter().enumerate() {
            if !route.pattern.is_dynamic() {
                continue;
            }
            if let Some(params) = route.pattern.captures(path) {
                return (
                    Some(index),
                    params,
                    RouteOutcome::Dynamic(route.pattern.source().to_string()),
                );
            }
        }

        (None, RouteParams::new(), RouteOutcome::NotFound)
    }
}

fn strip_query(location: &str) -> &str {
    location
        .split(['?', '#'])
        .next()
        .unwrap_or(location)
}

fn outcome_label(outcome: &RouteOutcome) -> &'static str {
    match outcome {
        RouteOutcome::Literal(_) => "literal",
        RouteOutcome::Dynamic(_) => "dynamic",
        RouteOutcome::NotFound => "not_found",
    }
}
