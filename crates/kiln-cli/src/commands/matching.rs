use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use kiln_router::{Dispatch, Router};

pub fn execute(config: &Path, method: &str, path: &str) -> Result<()> {
    let router = Router::new(super::load_routes(config)?).context("Failed to compile routes")?;
    let method = method.to_ascii_uppercase();

    let dispatch = router.dispatch(&method, path);
    let status = dispatch.status();

    match dispatch {
        Dispatch::Found(found) => {
            println!("{} {}", status.to_string().green().bold(), found.route.route().bold());
            println!("  action: {}", found.route.action().to_string().cyan());

            if !found.route.middleware_list().is_empty() {
                println!("  middleware: {}", found.route.middleware_list().join(", "));
            }

            let mut params: Vec<_> = found.params().iter().collect();
            params.sort();
            for (name, value) in params {
                println!("  {name} = {value}");
            }
        }
        Dispatch::Redirect(location) => {
            println!("{} redirect to {}", status.to_string().yellow().bold(), location.bold());
        }
        Dispatch::MethodNotAllowed { allowed } => {
            println!(
                "{} {method} not allowed, try: {}",
                status.to_string().red().bold(),
                allowed.join(", ")
            );
        }
        Dispatch::Options { allowed } => {
            println!("{} allow: {}", status.to_string().green().bold(), allowed.join(", "));
        }
        Dispatch::NotFound => {
            println!("{} no route matches {path}", status.to_string().red().bold());
        }
    }

    Ok(())
}
