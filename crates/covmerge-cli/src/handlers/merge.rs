//! Merge command handler

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use covmerge::MergeStats;
use std::path::{Path, PathBuf};

/// Printed when inputs or the output are missing
pub const USAGE: &str =
    "Usage: opencover-merge --from=my.file.xml --from=another.file.xml --output=merged.xml";

/// A fully specified merge: at least one input and an output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequest {
    /// Input reports, resolved, in merge order
    pub inputs: Vec<PathBuf>,
    /// Destination, resolved
    pub output: PathBuf,
}

impl MergeRequest {
    /// Build a request from raw arguments, or `None` if either side is missing
    ///
    /// Fails if the output would overwrite one of the inputs.
    pub fn from_args(
        config: &CliConfig,
        from: &[PathBuf],
        output: Option<&Path>,
    ) -> CliResult<Option<Self>> {
        let Some(output) = output else {
            return Ok(None);
        };
        if from.is_empty() {
            return Ok(None);
        }

        let inputs: Vec<PathBuf> = from.iter().map(|p| config.resolve_path(p)).collect();
        let output = config.resolve_path(output);
        if inputs.contains(&output) {
            return Err(CliError::invalid_argument(format!(
                "output {} is also listed as an input",
                output.display()
            )));
        }
        Ok(Some(Self { inputs, output }))
    }

    /// Progress line printed before merging
    #[must_use]
    pub fn describe(&self) -> String {
        let inputs: Vec<String> = self
            .inputs
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        format!(
            "Merging [{}] into {}",
            inputs.join(", "),
            self.output.display()
        )
    }
}

/// Render merge stats for stdout
pub fn render_stats(stats: &MergeStats, json: bool) -> CliResult<String> {
    if json {
        Ok(serde_json::to_string_pretty(stats)?)
    } else {
        Ok(stats.to_string())
    }
}

/// Execute the merge command
pub fn execute_merge(config: &CliConfig, request: &MergeRequest) -> CliResult<MergeStats> {
    let quiet = config.verbosity.is_quiet();
    if !quiet {
        println!("{}", request.describe());
    }

    let rt = tokio::runtime::Runtime::new()?;
    let stats = rt.block_on(covmerge::merge_files(&request.inputs, &request.output))?;

    if config.json {
        println!("{}", render_stats(&stats, true)?);
    } else if !quiet {
        println!("{}", render_stats(&stats, false)?);
    }
    Ok(stats)
}
