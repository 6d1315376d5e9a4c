//! # Kiln Router
//!
//! Pattern-based HTTP routing with support for:
//! - Static routes (`/about`)
//! - Named parameters (`/users/{id}`)
//! - Optional final parameters (`/posts/{id}/{slug}?`)
//! - Per-parameter regex constraints (`.patterns([("id", "[0-9]+")])`)
//! - Trailing-slash significance (`/docs/` matches `/docs` and `/docs/`)
//! - Prefixes, namespaces, middleware and route groups
//!
//! ## Pattern Compilation
//!
//! Every route compiles to an anchored regex whose textual form is stable:
//!
//! | pattern              | regex                                            |
//! |----------------------|--------------------------------------------------|
//! | `/`                  | `^/?$`                                           |
//! | `/foo`               | `^/foo$`                                         |
//! | `/foo/`              | `^/foo/?$`                                       |
//! | `/foo/{id}`          | `^/foo/(?P<id>[^/]++)$`                          |
//! | `/foo/{id}/{slug}?`  | `^/foo/(?P<id>[^/]++)(?:/(?P<slug>[^/]++))?$`   |
//!
//! The compiled matcher is memoized per route and reset whenever the
//! route's prefix or constraints change.
//!
//! ## Example
//!
//! ```
//! use kiln_router::{Dispatch, Group, Route, Router, Routes};
//!
//! let mut routes = Routes::new();
//! routes.add(Route::get("/", "HomeController::index"));
//! routes.group(Group::new().with_prefix("blog").with_namespace("app\\controllers"), |routes| {
//!     routes.add(Route::get("/{slug}", "BlogController::show").with_name("blog.show"));
//! });
//!
//! let router = Router::new(routes).unwrap();
//!
//! let Dispatch::Found(found) = router.dispatch("GET", "/blog/hello") else {
//!     panic!("expected a match");
//! };
//! assert_eq!(found.param("slug"), Some("hello"));
//! assert_eq!(
//!     found.route.action().as_handler(),
//!     Some("app\\controllers\\BlogController::show")
//! );
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod error;
pub mod pattern;
pub mod route;
pub mod router;
pub mod routes;

// Re-export public types
pub use error::RouteError;
pub use pattern::{compile, regex_source, CompiledPattern, Parameters, PatternToken};
pub use route::{Action, MiddlewareList, Route, ALL_METHODS};
pub use router::{Dispatch, RouteMatch, Router};
pub use routes::{Group, Routes};
