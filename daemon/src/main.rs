//! Tessera CLI: replays operation scripts against an in-memory engine.

mod replay;
mod script;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tessera_reserve::EngineConfig;
use tessera_types::Address;
use tessera_utils::LogFormat;

use crate::replay::Replay;
use crate::script::Script;

#[derive(Parser)]
#[command(name = "tessera", about = "Reserved-token mint engine")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "TESSERA_CONFIG")]
    config: Option<PathBuf>,

    /// Treasury address credited by admin mints and paid by public mints.
    #[arg(long, env = "TESSERA_PAYEE")]
    payee: Option<String>,

    /// Prefix of every token URI.
    #[arg(long, env = "TESSERA_BASE_URI")]
    base_uri: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "TESSERA_LOG_FORMAT")]
    log_format: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "TESSERA_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run a script of operations and print the resulting supply report as JSON.
    Replay {
        /// TOML file with `[[op]]` entries.
        script: PathBuf,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn load_config(cli: &Cli) -> anyhow::Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(payee) = &cli.payee {
        config.payee = Address::parse(payee).context("invalid --payee")?;
    }
    if let Some(base_uri) = &cli.base_uri {
        config.base_uri = base_uri.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let format: LogFormat = config
        .log_format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    tessera_utils::init_logging(format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!(path = %path.display(), "loaded config");
    }

    match cli.command {
        Command::Replay { script } => {
            let contents = std::fs::read_to_string(&script)
                .with_context(|| format!("reading script {}", script.display()))?;
            let script = Script::from_toml_str(&contents).context("parsing script")?;
            tracing::info!(ops = script.ops.len(), payee = %config.payee, "replaying script");

            let replay = Replay::new(&config);
            let outcomes = replay.run(script.ops);
            let rejected = outcomes.iter().filter(|o| o.error.is_some()).count();
            let report = replay.report(outcomes);
            tracing::info!(tokens = report.tokens.len(), rejected, "replay finished");
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }
    Ok(())
}
