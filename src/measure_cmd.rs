//! Measure command: eigenvalue grid search on a two-column record.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use splitwave_eigen::{SplittingEstimate, SplittingSummary};

use crate::cli::MeasureArgs;
use crate::config::SplitwaveConfig;
use crate::convert;
use crate::traces;

/// Run a splitting measurement and write its JSON summary.
pub fn run(args: MeasureArgs) -> Result<()> {
    let _cmd = info_span!("measure").entered();
    let config = load_config(args.config.as_deref())?;

    let delta = args.delta.unwrap_or(config.search.delta);
    info!(path = %args.input.display(), delta, "reading waveform pair");
    let pair = traces::read_pair(&args.input, delta)?;
    info!(n_samples = pair.len(), "waveform pair loaded");

    let grid_cfg = convert::build_grid_config(&config.search, &args, pair.len())?;
    let est = SplittingEstimate::new(pair, &grid_cfg).context("grid search failed")?;
    info!(
        fast = est.fast(),
        fdfast = est.fdfast(),
        lag = est.lag(),
        fdlag = est.fdlag(),
        "splitting measured"
    );

    let json = SplittingSummary::from_estimate(&est, args.surface)
        .to_json()
        .context("failed to serialize summary")?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write summary: {}", path.display()))?;
            info!(path = %path.display(), "summary written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Loads the TOML configuration, or defaults when no file is given.
pub fn load_config(path: Option<&std::path::Path>) -> Result<SplitwaveConfig> {
    let Some(path) = path else {
        return Ok(SplitwaveConfig::default());
    };
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}
