//! CLI command implementations.

pub(crate) mod open;
pub(crate) mod search;
pub(crate) mod serve;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use docview_config::{CliSettings, Config, RoutingMode, RoutingSetting};
use docview_site::{Site, SiteOptions};
use docview_storage::{FsStorage, Storage};

pub(crate) use open::OpenArgs;
pub(crate) use search::SearchArgs;
pub(crate) use serve::ServeArgs;

use crate::error::CliError;

/// Load configuration with the bundle and routing overrides shared by commands.
pub(crate) fn load_config(
    config: Option<&Path>,
    bundle_dir: Option<PathBuf>,
    mode: Option<RoutingSetting>,
) -> Result<Config, CliError> {
    let cli_settings = CliSettings {
        bundle_dir,
        routing: mode,
        ..CliSettings::default()
    };
    Ok(Config::load(config, Some(&cli_settings))?)
}

/// Open the configured bundle as a [`Site`] served in `mode`.
pub(crate) fn load_site(config: &Config, mode: RoutingMode) -> Result<Arc<Site>, CliError> {
    let options = SiteOptions::from_config(config, mode)
        .map_err(|e| CliError::Validation(format!("Invalid slug pattern: {e}")))?;
    tracing::info!(
        bundle_dir = %config.paths_resolved.bundle_dir.display(),
        mode = %mode,
        "Opening bundle"
    );
    let storage: Arc<dyn Storage> =
        Arc::new(FsStorage::new(config.paths_resolved.bundle_dir.clone()));
    Ok(Arc::new(Site::load(storage, options)))
}
