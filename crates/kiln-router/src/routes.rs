//! Route table
//!
//! [`Routes`] collects route definitions in declaration order. Groups apply
//! shared options (prefix, namespace, middleware, constraints) to every
//! route registered inside them.

use std::collections::HashMap;

use crate::route::{Action, MiddlewareList, Route};
use crate::RouteError;

/// Options shared by the routes of a group
///
/// # Examples
///
/// ```
/// use kiln_router::{Group, Route, Routes};
///
/// let mut routes = Routes::new();
/// routes.group(Group::new().with_prefix("admin").with_middleware("auth"), |routes| {
///     routes.add(Route::get("/users", "UserController::index"));
/// });
///
/// let route = &routes.routes()[0];
/// assert_eq!(route.route(), "/admin/users");
/// assert_eq!(route.middleware_list(), ["auth".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Group {
    prefix: Option<String>,
    namespace: Option<String>,
    middleware: Vec<String>,
    patterns: HashMap<String, String>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_middleware(mut self, middleware: impl Into<MiddlewareList>) -> Self {
        self.middleware.extend(middleware.into().0);
        self
    }

    pub fn with_patterns<I, K, V>(mut self, constraints: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.patterns.extend(
            constraints
                .into_iter()
                .map(|(name, constraint)| (name.into(), constraint.into())),
        );
        self
    }

    fn apply(&self, route: &mut Route) {
        if let Some(prefix) = &self.prefix {
            route.wrap_prefix(prefix);
        }
        if let Some(namespace) = &self.namespace {
            route.wrap_namespace(namespace);
        }
        route.wrap_middleware(&self.middleware);
        route.default_patterns(&self.patterns);
    }
}

/// Ordered collection of routes
#[derive(Debug, Clone, Default)]
pub struct Routes {
    routes: Vec<Route>,
    groups: Vec<Group>,
    named: HashMap<String, usize>,
}

impl Routes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route, applying the options of every open group
    ///
    /// Groups wrap from the inside out, so the outermost group's prefix ends
    /// up first in the path.
    pub fn add(&mut self, mut route: Route) -> &mut Self {
        for group in self.groups.iter().rev() {
            group.apply(&mut route);
        }

        if let Some(name) = route.name() {
            if self.named.contains_key(name) {
                tracing::warn!(name, route = %route.route(), "route name registered twice, keeping the latest");
            }
            self.named.insert(name.to_string(), self.routes.len());
        }

        tracing::trace!(route = %route.route(), methods = ?route.methods(), "registered route");
        self.routes.push(route);
        self
    }

    pub fn get(&mut self, pattern: impl Into<String>, action: impl Into<Action>) -> &mut Self {
        self.add(Route::get(pattern, action))
    }

    pub fn post(&mut self, pattern: impl Into<String>, action: impl Into<Action>) -> &mut Self {
        self.add(Route::post(pattern, action))
    }

    pub fn put(&mut self, pattern: impl Into<String>, action: impl Into<Action>) -> &mut Self {
        self.add(Route::put(pattern, action))
    }

    pub fn patch(&mut self, pattern: impl Into<String>, action: impl Into<Action>) -> &mut Self {
        self.add(Route::patch(pattern, action))
    }

    pub fn delete(&mut self, pattern: impl Into<String>, action: impl Into<Action>) -> &mut Self {
        self.add(Route::delete(pattern, action))
    }

    pub fn all(&mut self, pattern: impl Into<String>, action: impl Into<Action>) -> &mut Self {
        self.add(Route::all(pattern, action))
    }

    pub fn methods(
        &mut self,
        methods: &[&str],
        pattern: impl Into<String>,
        action: impl Into<Action>,
    ) -> &mut Self {
        self.add(Route::new(methods.iter().copied(), pattern, action))
    }

    /// Registers the routes added by `register` with the group's options
    pub fn group<F>(&mut self, group: Group, register: F) -> &mut Self
    where
        F: FnOnce(&mut Routes),
    {
        self.groups.push(group);
        register(self);
        self.groups.pop();
        self
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn has_named_route(&self, name: &str) -> bool {
        self.named.contains_key(name)
    }

    pub fn named_route(&self, name: &str) -> Result<&Route, RouteError> {
        self.named
            .get(name)
            .map(|&index| &self.routes[index])
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))
    }

    pub(crate) fn into_parts(self) -> (Vec<Route>, HashMap<String, usize>) {
        (self.routes, self.named)
    }
}

impl<'a> IntoIterator for &'a Routes {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
