pub mod compile;
pub mod matching;
pub mod routes;
pub mod url;

use std::path::Path;

use anyhow::Result;
use kiln::Config;
use kiln_router::Routes;

/// Loads the configuration and builds its route table
pub(crate) fn load_routes(config: &Path) -> Result<Routes> {
    tracing::debug!(path = %config.display(), "loading configuration");
    let config = Config::load(config)?;
    Ok(config.routing.build_routes())
}
