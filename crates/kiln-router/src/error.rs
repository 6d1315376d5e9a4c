/// Errors raised while building or reverse-resolving routes
///
/// A path that simply does not match a route is not an error; matching
/// returns `None` for that.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// A constraint fragment produced a regex the engine rejects
    #[error("invalid route pattern `{pattern}` (compiled as `{source_regex}`): {source}")]
    InvalidPattern {
        pattern: String,
        source_regex: String,
        #[source]
        source: regex::Error,
    },

    /// Reverse routing was asked to build a URL without a required parameter
    #[error("missing parameter `{parameter}` for route `{route}`")]
    MissingParameter { route: String, parameter: String },

    /// No route is registered under the given name
    #[error("no route named `{0}`")]
    UnknownRoute(String),
}
