//! opencover-merge: merge OpenCover coverage reports
//!
//! ## Usage
//!
//! ```bash
//! opencover-merge --from=unit.xml --from=integration.xml --output=merged.xml
//! opencover-merge -v --json --base-dir ci/coverage --from=a.xml --from=b.xml --output=all.xml
//! ```

use clap::Parser;
use covmerge_cli::{
    handlers::{execute_merge, MergeRequest, USAGE},
    Cli, CliConfig, CliResult, Verbosity,
};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity);

    let Some(request) = MergeRequest::from_args(&config, &cli.from, cli.output.as_deref())? else {
        println!("{USAGE}");
        return Ok(());
    };
    config.validate()?;

    execute_merge(&config, &request)?;
    Ok(())
}

fn build_config(cli: &Cli) -> CliConfig {
    let mut config = CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.verbose, cli.quiet))
        .with_json(cli.json);
    if let Some(dir) = &cli.base_dir {
        config = config.with_base_dir(dir);
    }
    config
}

/// `RUST_LOG` takes precedence over the level picked by `-v`/`-q`
fn init_tracing(verbosity: Verbosity) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
