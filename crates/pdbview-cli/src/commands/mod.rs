pub mod inspect;
pub mod sequence;

use crate::cli::LoadArgs;
use crate::config::PartialLoadConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pdbview::engine::progress::ProgressReporter;
use pdbview::workflows::load::{self, LoadResult};
use std::path::Path;
use tracing::info;

/// Resolves the load configuration and runs the load workflow on `input`.
fn load_structure(input: &Path, args: &LoadArgs, show_progress: bool) -> Result<LoadResult> {
    let config = PartialLoadConfig::from_args(args)?.merge_with_cli(args)?;

    let progress_handler = if show_progress {
        CliProgressHandler::new()
    } else {
        CliProgressHandler::hidden()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Loading structure from {:?}", input);
    let result = load::run_path(input, &config, &reporter)?;
    Ok(result)
}
