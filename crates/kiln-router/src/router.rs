//! Request dispatch
//!
//! A [`Router`] is the frozen form of a [`Routes`] table: every pattern is
//! compiled up front, so a malformed constraint fails at startup and the
//! per-request path never recompiles.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::pattern::Parameters;
use crate::route::Route;
use crate::routes::Routes;
use crate::RouteError;

/// Methods that get a canonical-URL redirect instead of a silent match
const REDIRECTABLE_METHODS: [&str; 2] = ["GET", "HEAD"];

/// Result of matching a route against a request
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route, with its parameters set
    pub route: Route,
}

impl RouteMatch {
    pub fn params(&self) -> &Parameters {
        self.route.parameters()
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.route.parameter(name)
    }
}

/// Outcome of dispatching a request
#[derive(Debug, Clone)]
pub enum Dispatch {
    /// A route matched the path and allows the method
    Found(RouteMatch),
    /// The matching route wants a trailing slash; redirect here (301)
    Redirect(String),
    /// Routes matched the path, but none allows the method (405)
    MethodNotAllowed { allowed: Vec<String> },
    /// `OPTIONS` request for a path whose routes do not declare `OPTIONS`
    Options { allowed: Vec<String> },
    /// Nothing matched the path (404)
    NotFound,
}

impl Dispatch {
    pub fn is_found(&self) -> bool {
        matches!(self, Dispatch::Found(_))
    }

    /// HTTP status a server would answer with
    pub fn status(&self) -> u16 {
        match self {
            Dispatch::Found(_) | Dispatch::Options { .. } => 200,
            Dispatch::Redirect(_) => 301,
            Dispatch::MethodNotAllowed { .. } => 405,
            Dispatch::NotFound => 404,
        }
    }
}

/// Compiled, read-only route table
///
/// # Examples
///
/// ```
/// use kiln_router::{Dispatch, Route, Router, Routes};
///
/// let mut routes = Routes::new();
/// routes.add(Route::get("/users/{id}", "UserController::show").patterns([("id", "[0-9]+")]));
///
/// let router = Router::new(routes).unwrap();
///
/// match router.dispatch("GET", "/users/42") {
///     Dispatch::Found(found) => assert_eq!(found.param("id"), Some("42")),
///     other => panic!("unexpected {other:?}"),
/// }
///
/// assert!(matches!(router.dispatch("GET", "/users/abc"), Dispatch::NotFound));
/// assert!(matches!(
///     router.dispatch("DELETE", "/users/42"),
///     Dispatch::MethodNotAllowed { .. }
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
    named: HashMap<String, usize>,
}

impl Router {
    /// Freezes a route table, compiling every route
    pub fn new(routes: Routes) -> Result<Self, RouteError> {
        let (routes, named) = routes.into_parts();

        for route in &routes {
            route.compiled()?;
        }

        tracing::debug!(routes = routes.len(), "route table compiled");
        Ok(Router { routes, named })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Finds the route for a request
    ///
    /// The path is percent-decoded before matching; a path that does not
    /// decode to UTF-8 is matched as given. Routes are tried in table order.
    /// Redirect locations keep the request's original encoding.
    pub fn dispatch(&self, method: &str, path: &str) -> Dispatch {
        let raw = path;
        let path = urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw));
        let mut allowed: Vec<String> = Vec::new();

        for route in &self.routes {
            // Compiled in `Router::new`
            let Ok(compiled) = route.compiled() else {
                continue;
            };
            let Some(parameters) = compiled.matches(&path) else {
                continue;
            };

            tracing::trace!(route = %route.route(), %path, "pattern matched");

            if !route.allows_method(method) {
                for candidate in route.methods() {
                    if !allowed.contains(candidate) {
                        allowed.push(candidate.clone());
                    }
                }
                continue;
            }

            if route.has_trailing_slash()
                && !path.ends_with('/')
                && REDIRECTABLE_METHODS.contains(&method)
            {
                let location = format!("{raw}/");
                tracing::debug!(%path, %location, "redirecting to canonical url");
                return Dispatch::Redirect(location);
            }

            let mut route = route.clone();
            route.set_parameters(parameters);
            tracing::debug!(method, %path, route = %route.route(), "route found");
            return Dispatch::Found(RouteMatch { route });
        }

        if allowed.is_empty() {
            tracing::debug!(method, %path, "no route found");
            Dispatch::NotFound
        } else if method == "OPTIONS" {
            Dispatch::Options { allowed }
        } else {
            tracing::debug!(method, %path, ?allowed, "method not allowed");
            Dispatch::MethodNotAllowed { allowed }
        }
    }

    /// Builds the path of a named route
    pub fn url_for(&self, name: &str, parameters: &Parameters) -> Result<String, RouteError> {
        let index = self
            .named
            .get(name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;

        self.routes[*index].url(parameters)
    }

    /// Like [`Router::url_for`], taking parameters as pairs
    pub fn url_for_params(&self, name: &str, parameters: &[(&str, &str)]) -> Result<String, RouteError> {
        let parameters: Parameters = parameters
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        self.url_for(name, &parameters)
    }
}
