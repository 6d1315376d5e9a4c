use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use kiln_router::Route;
use serde_json::json;

pub fn execute(config: &Path, json: bool) -> Result<()> {
    let routes = super::load_routes(config)?;

    if json {
        let table: Vec<serde_json::Value> = routes.iter().map(route_json).collect();
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    if routes.is_empty() {
        println!("{}", "No routes declared".yellow());
        return Ok(());
    }

    println!("{}", format!("{} route(s)", routes.len()).green().bold());
    println!();

    for route in &routes {
        let name = route
            .name()
            .map(|name| format!(" ({name})"))
            .unwrap_or_default();

        println!(
            "  {:<24} {}{}",
            route.methods().join("|").cyan(),
            route.route().bold(),
            name.dimmed()
        );
        println!("  {:<24} {}", "", route.action());

        if !route.middleware_list().is_empty() {
            println!("  {:<24} middleware: {}", "", route.middleware_list().join(", "));
        }
    }

    Ok(())
}

fn route_json(route: &Route) -> serde_json::Value {
    json!({
        "methods": route.methods(),
        "route": route.route(),
        "name": route.name(),
        "action": route.action().to_string(),
        "middleware": route.middleware_list(),
        "patterns": route.constraints(),
        "regex": route.regex(),
    })
}
