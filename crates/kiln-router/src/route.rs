//! Route definitions
//!
//! A [`Route`] bundles a path pattern with the HTTP methods it answers, the
//! action it dispatches to and the attributes a dispatcher consults
//! (middleware, constraints, name). The compiled matcher is memoized and
//! reset by every mutator that changes what the route matches.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::pattern::{self, CompiledPattern, Parameters, PatternToken};
use crate::RouteError;

/// Delimiter between namespace segments and the handler reference
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Methods registered by [`Route::all`]
pub const ALL_METHODS: [&str; 6] = ["GET", "HEAD", "POST", "PUT", "PATCH", "DELETE"];

/// Callable action
pub type Closure = Arc<dyn Fn(&Parameters) -> String + Send + Sync>;

/// What a matched route dispatches to
///
/// # Examples
///
/// ```
/// use kiln_router::Action;
///
/// let action = Action::from("FooController::fooAction");
/// assert_eq!(action.as_handler(), Some("FooController::fooAction"));
///
/// let action = Action::closure(|_params| "hello".to_string());
/// assert!(action.is_closure());
/// ```
#[derive(Clone)]
pub enum Action {
    /// `Controller::method` reference, resolved by the application
    Handler(String),
    /// Opaque callable
    Closure(Closure),
}

impl Action {
    /// Wraps a function as an action
    pub fn closure<F>(f: F) -> Self
    where
        F: Fn(&Parameters) -> String + Send + Sync + 'static,
    {
        Action::Closure(Arc::new(f))
    }

    /// The handler reference, if this is not a closure
    pub fn as_handler(&self) -> Option<&str> {
        match self {
            Action::Handler(handler) => Some(handler),
            Action::Closure(_) => None,
        }
    }

    pub fn is_closure(&self) -> bool {
        matches!(self, Action::Closure(_))
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Handler(handler) => f.debug_tuple("Handler").field(handler).finish(),
            Action::Closure(_) => f.write_str("Closure(..)"),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Handler(handler) => f.write_str(handler),
            Action::Closure(_) => f.write_str("Closure"),
        }
    }
}

impl From<&str> for Action {
    fn from(handler: &str) -> Self {
        Action::Handler(handler.to_string())
    }
}

impl From<String> for Action {
    fn from(handler: String) -> Self {
        Action::Handler(handler)
    }
}

/// One or more middleware identifiers
///
/// Lets [`Route::middleware`] take a single name or a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MiddlewareList(pub Vec<String>);

impl From<&str> for MiddlewareList {
    fn from(name: &str) -> Self {
        MiddlewareList(vec![name.to_string()])
    }
}

impl From<String> for MiddlewareList {
    fn from(name: String) -> Self {
        MiddlewareList(vec![name])
    }
}

impl From<Vec<String>> for MiddlewareList {
    fn from(names: Vec<String>) -> Self {
        MiddlewareList(names)
    }
}

impl From<Vec<&str>> for MiddlewareList {
    fn from(names: Vec<&str>) -> Self {
        MiddlewareList(names.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for MiddlewareList {
    fn from(names: [&str; N]) -> Self {
        MiddlewareList(names.iter().map(|name| name.to_string()).collect())
    }
}

impl From<&[String]> for MiddlewareList {
    fn from(names: &[String]) -> Self {
        MiddlewareList(names.to_vec())
    }
}

/// A single route definition
///
/// # Examples
///
/// ```
/// use kiln_router::Route;
///
/// let route = Route::new(["GET"], "/foo/{id}", "FooController::fooAction")
///     .patterns([("id", "[0-9]+")])
///     .prefix("api")
///     .middleware("auth");
///
/// assert_eq!(route.route(), "/api/foo/{id}");
/// assert_eq!(route.regex(), "^/api/foo/(?P<id>[0-9]+)$");
///
/// let params = route.matches("/api/foo/42").unwrap().unwrap();
/// assert_eq!(params.get("id"), Some(&"42".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    methods: Vec<String>,
    pattern: String,
    prefix: String,
    action: Action,
    namespace: String,
    name: Option<String>,
    middleware: Vec<String>,
    constraints: HashMap<String, String>,
    parameters: Parameters,
    compiled: OnceCell<CompiledPattern>,
}

impl Route {
    /// Creates a route answering `methods` on `pattern`
    ///
    /// Methods are stored as given; [`Route::allows_method`] compares them
    /// case-sensitively.
    pub fn new<I, S>(methods: I, pattern: impl Into<String>, action: impl Into<Action>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let methods: Vec<String> = methods.into_iter().map(Into::into).collect();
        debug_assert!(!methods.is_empty(), "a route needs at least one method");

        Route {
            methods,
            pattern: pattern.into(),
            prefix: String::new(),
            action: action.into(),
            namespace: String::new(),
            name: None,
            middleware: Vec::new(),
            constraints: HashMap::new(),
            parameters: Parameters::new(),
            compiled: OnceCell::new(),
        }
    }

    /// `GET` route; also answers `HEAD`
    pub fn get(pattern: impl Into<String>, action: impl Into<Action>) -> Self {
        Route::new(["GET", "HEAD"], pattern, action)
    }

    pub fn post(pattern: impl Into<String>, action: impl Into<Action>) -> Self {
        Route::new(["POST"], pattern, action)
    }

    pub fn put(pattern: impl Into<String>, action: impl Into<Action>) -> Self {
        Route::new(["PUT"], pattern, action)
    }

    pub fn patch(pattern: impl Into<String>, action: impl Into<Action>) -> Self {
        Route::new(["PATCH"], pattern, action)
    }

    pub fn delete(pattern: impl Into<String>, action: impl Into<Action>) -> Self {
        Route::new(["DELETE"], pattern, action)
    }

    /// Route answering every method in [`ALL_METHODS`]
    pub fn all(pattern: impl Into<String>, action: impl Into<Action>) -> Self {
        Route::new(ALL_METHODS, pattern, action)
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Names this route for reverse lookup
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Merges parameter constraints into the route
    ///
    /// Later calls override constraints with the same name.
    pub fn patterns<I, K, V>(mut self, constraints: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.constraints.extend(
            constraints
                .into_iter()
                .map(|(name, constraint)| (name.into(), constraint.into())),
        );
        self.compiled = OnceCell::new();
        self
    }

    /// Adds a path prefix
    ///
    /// Prefixes compose in call order: each new prefix goes after the ones
    /// already applied, so `prefix("bar").prefix("baz")` on `/foo` gives
    /// `/bar/baz/foo`. Surrounding slashes are ignored and an empty prefix
    /// changes nothing.
    pub fn prefix(mut self, prefix: &str) -> Self {
        let segment = prefix.trim_matches('/');
        if !segment.is_empty() {
            self.prefix.push('/');
            self.prefix.push_str(segment);
            self.compiled = OnceCell::new();
        }
        self
    }

    /// Adds a namespace to a handler action
    ///
    /// Namespaces compose in call order (`namespace("app")` then
    /// `namespace("controllers")` gives `app\controllers\Handler::method`).
    /// Closures have no namespace; the call is ignored for them.
    pub fn namespace(mut self, namespace: &str) -> Self {
        if self.action.is_closure() {
            tracing::debug!(route = %self.route(), namespace, "ignoring namespace on closure action");
            return self;
        }

        let namespace = namespace.trim_matches(NAMESPACE_SEPARATOR);
        if !namespace.is_empty() {
            self.namespace.push_str(namespace);
            self.namespace.push(NAMESPACE_SEPARATOR);
        }
        self
    }

    /// Appends middleware, keeping earlier entries and call order
    pub fn middleware(mut self, middleware: impl Into<MiddlewareList>) -> Self {
        self.middleware.extend(middleware.into().0);
        self
    }

    // ========================================================================
    // Group Application
    // ========================================================================
    //
    // Groups wrap routes from the outside: their prefix and namespace go in
    // front of whatever the route already has, their middleware runs first
    // and their constraints only fill in parameters the route left open.

    pub(crate) fn wrap_prefix(&mut self, prefix: &str) {
        let segment = prefix.trim_matches('/');
        if !segment.is_empty() {
            self.prefix.insert_str(0, segment);
            self.prefix.insert(0, '/');
            self.compiled = OnceCell::new();
        }
    }

    pub(crate) fn wrap_namespace(&mut self, namespace: &str) {
        let namespace = namespace.trim_matches(NAMESPACE_SEPARATOR);
        if !namespace.is_empty() && !self.action.is_closure() {
            self.namespace.insert(0, NAMESPACE_SEPARATOR);
            self.namespace.insert_str(0, namespace);
        }
    }

    pub(crate) fn wrap_middleware(&mut self, middleware: &[String]) {
        self.middleware.splice(0..0, middleware.iter().cloned());
    }

    pub(crate) fn default_patterns(&mut self, constraints: &HashMap<String, String>) {
        let mut changed = false;
        for (name, constraint) in constraints {
            if !self.constraints.contains_key(name) {
                self.constraints.insert(name.clone(), constraint.clone());
                changed = true;
            }
        }
        if changed {
            self.compiled = OnceCell::new();
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// Whether this route answers `method` (case-sensitive)
    pub fn allows_method(&self, method: &str) -> bool {
        self.methods.iter().any(|allowed| allowed == method)
    }

    /// The full pattern, prefixes included
    pub fn route(&self) -> String {
        format!("{}{}", self.prefix, self.pattern)
    }

    /// The pattern as declared, without prefixes
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The action with namespaces applied
    pub fn action(&self) -> Action {
        match &self.action {
            Action::Handler(handler) if !self.namespace.is_empty() => {
                Action::Handler(format!("{}{}", self.namespace, handler))
            }
            action => action.clone(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn middleware_list(&self) -> &[String] {
        &self.middleware
    }

    pub fn constraints(&self) -> &HashMap<String, String> {
        &self.constraints
    }

    /// Whether the full pattern ends in `/`
    pub fn has_trailing_slash(&self) -> bool {
        self.route().ends_with('/')
    }

    // ========================================================================
    // Parameters
    // ========================================================================

    /// Stores the parameters of the current match
    pub fn set_parameters(&mut self, parameters: Parameters) {
        self.parameters = parameters;
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    pub fn parameter_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.parameter(name).unwrap_or(default)
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// The public regex source for the current pattern and constraints
    pub fn regex(&self) -> String {
        pattern::regex_source(&self.route(), &self.constraints)
    }

    /// The compiled matcher, built on first use
    pub fn compiled(&self) -> Result<&CompiledPattern, RouteError> {
        self.compiled
            .get_or_try_init(|| pattern::compile(&self.route(), &self.constraints))
    }

    /// Matches a decoded request path against this route
    ///
    /// `Ok(None)` means the path does not match; errors only come from a
    /// constraint that does not compile.
    pub fn matches(&self, path: &str) -> Result<Option<Parameters>, RouteError> {
        Ok(self.compiled()?.matches(path))
    }

    /// Builds a path for this route from parameter values
    ///
    /// Values are percent-encoded. A missing optional parameter is dropped
    /// together with its separator; a missing required one is an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use kiln_router::Route;
    ///
    /// let route = Route::new(["GET"], "/posts/{id}/{slug}?", "Posts::show");
    ///
    /// let mut params = HashMap::new();
    /// params.insert("id".to_string(), "7".to_string());
    /// assert_eq!(route.url(&params).unwrap(), "/posts/7");
    ///
    /// params.insert("slug".to_string(), "hello world".to_string());
    /// assert_eq!(route.url(&params).unwrap(), "/posts/7/hello%20world");
    /// ```
    pub fn url(&self, parameters: &Parameters) -> Result<String, RouteError> {
        let full = self.route();
        let (body, trailing_slash) = pattern::split_trailing_slash(&full);

        let mut url = String::new();
        for token in pattern::tokenize(body) {
            match token {
                PatternToken::Static(literal) => url.push_str(&literal),
                PatternToken::Required(name) => {
                    let value = parameters.get(&name).ok_or_else(|| {
                        RouteError::MissingParameter {
                            route: full.clone(),
                            parameter: name.clone(),
                        }
                    })?;
                    url.push_str(&urlencoding::encode(value));
                }
                PatternToken::Optional { name, separator } => {
                    if let Some(value) = parameters.get(&name) {
                        if separator {
                            url.push('/');
                        }
                        url.push_str(&urlencoding::encode(value));
                    }
                }
            }
        }
        if trailing_slash || url.is_empty() {
            url.push('/');
        }

        Ok(url)
    }
}
