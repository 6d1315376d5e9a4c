// File: src/http/cookies.rs
// Purpose: Request cookie jar with optional signed values

use std::collections::HashMap;
use std::sync::Arc;

/// Signs and verifies cookie values
///
/// Kiln ships no signing algorithm; applications plug in their own.
pub trait Signer: Send + Sync {
    /// Returns the value with its signature attached
    fn sign(&self, value: &str) -> String;

    /// Returns the original value if the signature is valid
    fn validate(&self, signed: &str) -> Option<String>;
}

/// Cookie errors
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    #[error("a signer is required to {0} signed cookies")]
    MissingSigner(&'static str),
}

/// Cookies sent with a request
///
/// # Examples
///
/// ```
/// use kiln::http::Cookies;
///
/// let cookies = Cookies::from_header("theme=dark; lang=en", None);
/// assert_eq!(cookies.get("theme"), Some("dark"));
/// assert_eq!(cookies.get_or("missing", "light"), "light");
/// assert_eq!(cookies.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct Cookies {
    cookies: HashMap<String, String>,
    signer: Option<Arc<dyn Signer>>,
}

impl std::fmt::Debug for Cookies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cookies")
            .field("cookies", &self.cookies)
            .field("signer", &self.signer.is_some())
            .finish()
    }
}

impl Cookies {
    pub fn new(cookies: HashMap<String, String>, signer: Option<Arc<dyn Signer>>) -> Self {
        Self { cookies, signer }
    }

    /// Parse cookies from a Cookie header
    pub fn from_header(header: &str, signer: Option<Arc<dyn Signer>>) -> Self {
        let mut cookies = HashMap::new();

        for cookie in header.split(';') {
            let cookie = cookie.trim();
            if let Some((key, value)) = cookie.split_once('=') {
                cookies.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        Self::new(cookies, signer)
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    /// Adds a cookie whose value is signed
    pub fn add_signed(&mut self, name: impl Into<String>, value: &str) -> Result<(), CookieError> {
        let signer = self.signer.as_ref().ok_or(CookieError::MissingSigner("write"))?;
        let signed = signer.sign(value);
        self.cookies.insert(name.into(), signed);
        Ok(())
    }

    pub fn has(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    /// Reads a signed cookie
    ///
    /// A cookie whose signature does not validate reads as absent.
    pub fn get_signed(&self, name: &str) -> Result<Option<String>, CookieError> {
        let signer = self.signer.as_ref().ok_or(CookieError::MissingSigner("read"))?;

        let value = self.cookies.get(name).and_then(|cookie| {
            let validated = signer.validate(cookie);
            if validated.is_none() {
                tracing::warn!(name, "discarding cookie with invalid signature");
            }
            validated
        });

        Ok(value)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.cookies.remove(name)
    }

    pub fn all(&self) -> &HashMap<String, String> {
        &self.cookies
    }
}
