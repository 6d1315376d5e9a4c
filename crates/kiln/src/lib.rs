// Kiln - web application framework
// Pattern routing, request cookies, cache wiring, validation and CLI helpers

pub mod config;

// Framework modules
pub mod cli;
pub mod http;
pub mod services;
pub mod validation;

// Re-export framework types
pub use config::Config;
pub use http::{Cookies, Signer};
pub use services::CacheManager;
pub use validation::{ValidationResult, Validator};

// Re-export the router
pub use kiln_router;
pub use kiln_router::{Dispatch, Group, Route, RouteMatch, Router, Routes};
