use std::path::Path;

use anyhow::{Context, Result};
use kiln_router::{Parameters, Router};

pub fn execute(config: &Path, name: &str, params: &[String]) -> Result<()> {
    let router = Router::new(super::load_routes(config)?).context("Failed to compile routes")?;

    let parameters = parse_params(params)?;
    let url = router
        .url_for(name, &parameters)
        .with_context(|| format!("Failed to build url for route '{}'", name))?;

    println!("{url}");
    Ok(())
}

fn parse_params(params: &[String]) -> Result<Parameters> {
    params
        .iter()
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .with_context(|| format!("Invalid parameter '{}', expected key=value", pair))?;
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}
