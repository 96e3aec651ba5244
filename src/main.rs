use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::{debug, error, trace};
use underbar::cli::{execute_command, Cli};
use underbar::config::Config;

fn main() {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref());

    let log_level = match cli.verbose {
        0 => config
            .as_ref()
            .map(|config| config.log_level().to_string())
            .unwrap_or_else(|_| "info".to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    // stdout carries the JSON result, so diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2)
        .with_line_number(cli.verbose >= 3)
        .init();

    debug!("underbar started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    let result = config.and_then(|config| run(&cli, &config));

    if let Err(e) = result {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            let mut config = Config::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.merge_env_vars();
            Ok(config)
        }
        None => Config::load_default().context("Failed to load default config"),
    }
}

fn run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let raw = match &cli.input {
        Some(input) => input.clone(),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read input from stdin")?;
            buffer
        }
    };

    let input: Value = serde_json::from_str(&raw).context("Input is not valid JSON")?;
    let output = execute_command(&cli.command, &input, config)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
