// File: src/http/mod.rs
// Purpose: HTTP request helpers

pub mod cookies;

pub use cookies::{CookieError, Cookies, Signer};
