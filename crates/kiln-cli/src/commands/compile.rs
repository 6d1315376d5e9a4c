use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use kiln::cli::{ProgressBar, StdoutOutput};

pub fn execute(config: &Path, verbose: bool) -> Result<()> {
    let routes = super::load_routes(config)?;

    println!("{}", "Compiling routes...".green().bold());
    println!();

    let mut bar = ProgressBar::new(StdoutOutput::new(), routes.len(), None).with_prefix("  Routes:");
    bar.draw()?;

    let mut failures = Vec::new();
    for route in &routes {
        if let Err(error) = route.compiled() {
            failures.push((route.route(), error));
        }
        bar.advance()?;
    }
    bar.remove()?;

    if verbose {
        for route in &routes {
            println!("  {} {}", route.route().bold(), route.regex().dimmed());
        }
        println!();
    }

    if failures.is_empty() {
        println!("  {} {} route(s) compiled", "✓".green(), routes.len());
        return Ok(());
    }

    for (route, error) in &failures {
        println!("  {} {}: {}", "✗".red(), route.bold(), error);
    }

    anyhow::bail!("{} of {} route(s) failed to compile", failures.len(), routes.len())
}
