//! ue4beat -- UE4 dedicated server log to JSON lines.
//!
//! Reads raw server log lines from stdin, parses each into a structured
//! record and writes one JSON object per line to stdout.
//!
//! ```text
//! ./LobbyServer 2>&1 | ue4beat -f server lobby-01 -f port 7777 | filebeat ...
//! ```

mod cli;
mod error;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use tokio::io::{BufReader, BufWriter};
use tracing::info;

use ue4beat_core::config::Ue4beatConfig;
use ue4beat_log_pipeline::{LogPipeline, PipelineConfig, PipelineConfigBuilder};

use cli::Cli;
use error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_broken_pipe() => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ue4beat: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // defaults -> file -> env -> CLI
    let mut config = Ue4beatConfig::load_or_default(cli.config.as_deref()).await?;
    if let Some(level) = &cli.log_level {
        config.general.log_level = level.clone();
        config.validate()?;
    }

    logging::init_tracing(&config.general).map_err(|e| CliError::Logging(e.to_string()))?;
    ue4beat_core::metrics::describe_all();

    let mut builder =
        PipelineConfigBuilder::from_config(PipelineConfig::from_core(&config.output)?)
            .fields(cli.static_fields());
    if let Some(layout) = cli.layout {
        builder = builder.layout(layout.into());
    }
    let pipeline_config = builder.build()?;

    info!(
        layout = %pipeline_config.layout,
        static_fields = pipeline_config.fields.len(),
        "ue4beat started"
    );

    let pipeline = LogPipeline::from_config(pipeline_config)?;
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = BufWriter::new(tokio::io::stdout());
    let summary = pipeline.run(stdin, stdout).await?;

    info!(
        lines = summary.lines,
        encode_failures = summary.encode_failures,
        "ue4beat finished"
    );
    Ok(())
}
