//! Pattern compilation for route definitions
//!
//! Turns a declarative path pattern such as `/users/{id}/{slug}?/` into an
//! anchored regex. All functions here are **pure**: the same pattern and
//! constraints always compile to the same source string.

use std::borrow::Cow;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::RouteError;

/// Parameters captured from a request path (parameter name → matched text)
pub type Parameters = HashMap<String, String>;

/// Constraint used for parameters without an explicit one
pub const DEFAULT_CONSTRAINT: &str = "[^/]++";

// `{name}` optionally preceded by its separator and followed by `?`
static PARAMETER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(/)?\{(\w+)\}(\?)?").expect("parameter regex is valid"));

/// A piece of a route pattern
///
/// Sum type for the three shapes a pattern is built from.
///
/// # Examples
///
/// ```
/// use kiln_router::pattern::{tokenize, PatternToken};
///
/// let tokens = tokenize("/foo/{id}/{slug}?");
/// assert_eq!(
///     tokens,
///     vec![
///         PatternToken::Static("/foo/".to_string()),
///         PatternToken::Required("id".to_string()),
///         PatternToken::Optional { name: "slug".to_string(), separator: true },
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternToken {
    /// Literal text, matched as-is
    Static(String),
    /// Required parameter: `{name}`
    Required(String),
    /// Optional parameter: `{name}?`, swallowing its preceding `/` when present
    Optional { name: String, separator: bool },
}

/// Splits a pattern body into tokens (pure function)
///
/// The body is the pattern without its trailing slash; see
/// [`split_trailing_slash`].
pub fn tokenize(body: &str) -> Vec<PatternToken> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for captures in PARAMETER.captures_iter(body) {
        let whole = captures.get(0).map_or(0..0, |m| m.range());
        let separator = captures.get(1).is_some();
        let name = captures[2].to_string();
        let optional = captures.get(3).is_some();

        let mut literal = body[last..whole.start].to_string();
        if separator && !optional {
            literal.push('/');
        }
        if !literal.is_empty() {
            push_static(&mut tokens, literal);
        }

        if optional {
            tokens.push(PatternToken::Optional { name, separator });
        } else {
            tokens.push(PatternToken::Required(name));
        }

        last = whole.end;
    }

    if last < body.len() {
        push_static(&mut tokens, body[last..].to_string());
    }

    tokens
}

// Adjacent literals are merged so `/foo/` stays one token
fn push_static(tokens: &mut Vec<PatternToken>, literal: String) {
    match tokens.last_mut() {
        Some(PatternToken::Static(previous)) => previous.push_str(&literal),
        _ => tokens.push(PatternToken::Static(literal)),
    }
}

/// Separates a pattern into its body and whether it ends in `/`
///
/// Every trailing slash is removed from the body, so `/` has an empty body.
///
/// # Examples
///
/// ```
/// use kiln_router::pattern::split_trailing_slash;
///
/// assert_eq!(split_trailing_slash("/"), ("", true));
/// assert_eq!(split_trailing_slash("/foo/"), ("/foo", true));
/// assert_eq!(split_trailing_slash("/foo"), ("/foo", false));
/// ```
pub fn split_trailing_slash(pattern: &str) -> (&str, bool) {
    match pattern.strip_suffix('/') {
        Some(_) => (pattern.trim_end_matches('/'), true),
        None => (pattern, false),
    }
}

/// Builds the public regex source for a pattern (pure function)
///
/// This is the stable textual form of a route: anchored at both ends, named
/// groups per parameter, `[^/]++` unless a constraint overrides it.
///
/// # Shapes
///
/// | pattern              | source                                           |
/// |----------------------|--------------------------------------------------|
/// | `/`                  | `^/?$`                                           |
/// | `/foo`               | `^/foo$`                                         |
/// | `/foo/`              | `^/foo/?$`                                       |
/// | `/foo/{id}`          | `^/foo/(?P<id>[^/]++)$`                          |
/// | `/foo/{id}/{slug}?/` | `^/foo/(?P<id>[^/]++)(?:/(?P<slug>[^/]++))?/?$` |
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use kiln_router::pattern::regex_source;
///
/// let mut constraints = HashMap::new();
/// constraints.insert("id".to_string(), "[0-9]+".to_string());
///
/// assert_eq!(regex_source("/foo/{id}", &constraints), "^/foo/(?P<id>[0-9]+)$");
/// ```
pub fn regex_source(pattern: &str, constraints: &HashMap<String, String>) -> String {
    let (body, trailing_slash) = split_trailing_slash(pattern);
    let group = |name: &str| {
        let constraint = constraints
            .get(name)
            .map_or(DEFAULT_CONSTRAINT, String::as_str);
        format!("(?P<{name}>{constraint})")
    };

    let mut source = String::from("^");
    for token in tokenize(body) {
        match token {
            PatternToken::Static(literal) => source.push_str(&regex::escape(&literal)),
            PatternToken::Required(name) => source.push_str(&group(&name)),
            PatternToken::Optional { name, separator: true } => {
                source.push_str("(?:/");
                source.push_str(&group(&name));
                source.push_str(")?");
            }
            PatternToken::Optional { name, separator: false } => {
                source.push_str("(?:");
                source.push_str(&group(&name));
                source.push_str(")?");
            }
        }
    }
    if trailing_slash {
        source.push_str("/?");
    }
    source.push('$');

    source
}

/// Parameter names in the order they appear in the pattern
pub fn parameter_names(pattern: &str) -> Vec<String> {
    tokenize(split_trailing_slash(pattern).0)
        .into_iter()
        .filter_map(|token| match token {
            PatternToken::Static(_) => None,
            PatternToken::Required(name) | PatternToken::Optional { name, .. } => Some(name),
        })
        .collect()
}

/// A pattern compiled against a fixed set of constraints
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    regex: Regex,
    parameter_names: Vec<String>,
}

impl CompiledPattern {
    /// The public regex source (see [`regex_source`])
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parameter names captured by this pattern, in pattern order
    pub fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }

    /// Whether the path matches, without extracting parameters
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Matches a decoded request path
    ///
    /// Returns the captured parameters, or `None` when the path does not
    /// match. Optional parameters that were not present are left out of the
    /// map rather than mapped to an empty string.
    pub fn matches(&self, path: &str) -> Option<Parameters> {
        let captures = self.regex.captures(path)?;

        Some(
            self.parameter_names
                .iter()
                .filter_map(|name| {
                    captures
                        .name(name)
                        .map(|value| (name.clone(), value.as_str().to_string()))
                })
                .collect(),
        )
    }
}

/// Compiles a pattern into a matcher
///
/// Fails with [`RouteError::InvalidPattern`] when a constraint fragment is
/// not a valid regex. Constraints are not otherwise validated.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use kiln_router::pattern::compile;
///
/// let compiled = compile("/foo/{id}/{slug}?", &HashMap::new()).unwrap();
///
/// let params = compiled.matches("/foo/123").unwrap();
/// assert_eq!(params.get("id"), Some(&"123".to_string()));
/// assert!(params.get("slug").is_none());
///
/// assert!(compiled.matches("/foo/123/").is_none());
/// ```
pub fn compile(
    pattern: &str,
    constraints: &HashMap<String, String>,
) -> Result<CompiledPattern, RouteError> {
    let source = regex_source(pattern, constraints);
    let engine_source = format!("(?s){}", strip_possessive(&source));

    tracing::trace!(pattern, regex = %source, "compiling route pattern");

    let regex = Regex::new(&engine_source).map_err(|source_error| RouteError::InvalidPattern {
        pattern: pattern.to_string(),
        source_regex: source.clone(),
        source: source_error,
    })?;

    Ok(CompiledPattern {
        parameter_names: parameter_names(pattern),
        source,
        regex,
    })
}

/// Rewrites possessive quantifiers (`++`, `*+`, `?+`, `{n}+`) as greedy ones
///
/// The `regex` engine never backtracks, so the greedy form accepts the same
/// paths for separator-delimited segments. Character classes and escapes,
/// including braced ones such as `\p{L}` and `\x{41}`, are copied untouched.
///
/// # Examples
///
/// ```
/// use kiln_router::pattern::strip_possessive;
///
/// assert_eq!(strip_possessive("(?P<id>[^/]++)"), "(?P<id>[^/]+)");
/// assert_eq!(strip_possessive(r"[+]+\++"), r"[+]+\++");
/// assert_eq!(strip_possessive("a{2}+b*+"), "a{2}b*");
/// assert_eq!(strip_possessive(r"\p{L}+"), r"\p{L}+");
/// ```
pub fn strip_possessive(source: &str) -> Cow<'_, str> {
    if !["++", "*+", "?+", "}+"].iter().any(|marker| source.contains(marker)) {
        return Cow::Borrowed(source);
    }

    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut class_depth = 0usize;
    let mut class_fresh = false;
    let mut in_repetition = false;
    let mut after_quantifier = false;

    while let Some(c) = chars.next() {
        if c == '\\' {
            out.push(c);
            if let Some(escaped) = chars.next() {
                out.push(escaped);
                // `\p{..}`, `\P{..}` and `\x{..}` carry their own braces
                if matches!(escaped, 'p' | 'P' | 'x') && chars.peek() == Some(&'{') {
                    for braced in chars.by_ref() {
                        out.push(braced);
                        if braced == '}' {
                            break;
                        }
                    }
                }
            }
            class_fresh = false;
            after_quantifier = false;
            continue;
        }

        if class_depth > 0 {
            match c {
                '^' if class_fresh => {
                    out.push(c);
                    continue;
                }
                '[' => class_depth += 1,
                ']' if !class_fresh => class_depth -= 1,
                _ => {}
            }
            class_fresh = false;
            out.push(c);
            continue;
        }

        match c {
            '[' => {
                class_depth = 1;
                class_fresh = true;
                after_quantifier = false;
            }
            '+' if after_quantifier => {
                after_quantifier = false;
                continue;
            }
            '{' => {
                in_repetition = true;
                after_quantifier = false;
            }
            // only the brace closing `{n}` / `{n,m}` ends a quantifier
            '}' => {
                after_quantifier = in_repetition;
                in_repetition = false;
            }
            '+' | '*' => after_quantifier = true,
            // `?` after a quantifier makes it lazy and ends the quantifier
            '?' => after_quantifier = !after_quantifier,
            _ => after_quantifier = false,
        }
        out.push(c);
    }

    Cow::Owned(out)
}
