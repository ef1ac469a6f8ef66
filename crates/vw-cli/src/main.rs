//! VedaWeb reader core inspector.

use clap::Parser;
use vw_cli::cli::{Cli, Command, LogFormatArg};
use vw_cli::commands::{load_config, run_query, run_render, run_settings};
use vw_cli::{init_logging, LogConfig, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_config = LogConfig::from_verbosity(cli.verbose).with_format(match cli.log_format {
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    });
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
    }

    let config = load_config(cli.config.as_deref())?;
    tracing::debug!("Configuration: {:?}", config);

    let output = match &cli.command {
        Command::Render(args) => run_render(config, args).await?,
        Command::Settings(args) => run_settings(config, args).await?,
        Command::Query(args) => run_query(config, args).await?,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
