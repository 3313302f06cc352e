//! wyvern-match-scan CLI - scan recent blocks for Wyvern atomicMatch_ calls

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wyvern_match_scan::{
    BlockPipeline, Config, ConfigFile, FetchProgress, NodeClient, OutputFormat, TxFilter,
};

#[derive(Parser)]
#[command(name = "wyvern-match-scan")]
#[command(
    version,
    about = "Scan recent Ethereum blocks for OpenSea (Wyvern) atomicMatch_ calls"
)]
#[command(after_help = r#"EXAMPLES:
    # Scan the last 100 blocks through Infura
    wyvern-match-scan -i YOUR_PROJECT_KEY -d 100

    # Use your own node and write CSV
    wyvern-match-scan --rpc http://localhost:8545 -d 1000 --format csv -o matches.csv

ENVIRONMENT VARIABLES:
    INFURA_API_KEY    Infura project key (instead of -i)

CONFIG FILE:
    Default: ~/.config/wyvern-match-scan/config.toml
"#)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Infura project key
    #[arg(short = 'i', long, env = "INFURA_API_KEY")]
    infura_key: Option<String>,

    /// Number of most recent blocks to scan (head included)
    #[arg(short, long)]
    depth: Option<u64>,

    /// Use this RPC endpoint instead of Infura
    #[arg(long)]
    rpc: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Output format (text, json, csv)
    #[arg(long, default_value = "text")]
    format: String,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show config file path
    Path,

    /// Set Infura API key
    SetInfuraKey {
        /// API key
        key: String,
    },

    /// Show current config
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::new(filter))
        .init();

    if let Some(Commands::Config { action }) = &cli.command {
        return handle_config(action);
    }

    run_scan(&cli).await
}

async fn run_scan(cli: &Cli) -> anyhow::Result<()> {
    let config = build_config(cli)?;

    let client = NodeClient::new(&config.endpoint)?;
    tracing::info!(
        "Matching selector {} on {}",
        config.target.selector,
        config.target.address
    );
    if !config.quiet {
        eprintln!("Connecting to {}...", client.url());
    }

    let pb = if !config.quiet {
        let pb = ProgressBar::new(config.depth);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} blocks ({msg})",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let pb_clone = pb.clone();
    let pipeline = BlockPipeline::new(client, TxFilter::new(config.target)).with_progress(
        move |progress: FetchProgress| {
            if let Some(ref pb) = pb_clone {
                pb.set_length(progress.total_blocks);
                pb.set_position(progress.blocks_done);
                pb.set_message(format!("block {}", progress.current_block));
            }
        },
    );

    let start = Instant::now();
    let range = pipeline.latest_range(config.depth).await?;
    if range.is_empty() {
        tracing::warn!(
            "Depth {} reaches past genesis; nothing to scan",
            config.depth
        );
    }

    let matches = pipeline.run(range).await?;
    let elapsed = start.elapsed();

    if let Some(ref pb) = pb {
        pb.finish_and_clear();
    }

    let mut writer =
        wyvern_match_scan::create_writer(config.output.format, config.output.path.as_deref())?;
    let summary = wyvern_match_scan::write_matches(writer.as_mut(), &matches)?;

    if summary.malformed > 0 {
        tracing::warn!(
            "{} matching transactions had malformed call data and were skipped",
            summary.malformed
        );
    }

    if !config.quiet {
        eprintln!(
            "Found {} matching transactions in {} blocks in {:.2}s",
            summary.written,
            range.len(),
            elapsed.as_secs_f64()
        );
    }

    Ok(())
}

/// Merge CLI flags, environment and config file into a validated config
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let config_file = match ConfigFile::load_default() {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!("Ignoring config file: {}", e);
            None
        }
    };

    let format: OutputFormat = cli.format.parse()?;

    let mut builder = Config::builder()
        .output_format(format)
        .quiet(cli.quiet);

    if let Some(depth) = cli.depth {
        builder = builder.depth(depth);
    }

    // an endpoint given on the command line wins over both file entries
    if cli.rpc.is_some() || cli.infura_key.is_some() {
        if let Some(url) = &cli.rpc {
            builder = builder.rpc_url(url);
        }
        if let Some(key) = &cli.infura_key {
            builder = builder.infura_key(key);
        }
    } else if let Some(cf) = &config_file {
        if let Some(url) = &cf.rpc_url {
            builder = builder.rpc_url(url);
        }
        if let Some(key) = &cf.infura_api_key {
            builder = builder.infura_key(key);
        }
    }

    let timeout = cli
        .timeout
        .or_else(|| config_file.as_ref().map(|c| c.settings.timeout_seconds));
    if let Some(secs) = timeout {
        builder = builder.timeout_secs(secs);
    }

    if let Some(output) = &cli.output {
        builder = builder.output_path(output);
    }

    Ok(builder.build()?)
}

fn handle_config(action: &ConfigCommands) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Path => {
            println!("{}", ConfigFile::default_path().display());
        }

        ConfigCommands::SetInfuraKey { key } => {
            let path = ConfigFile::default_path();
            let mut config = ConfigFile::load_if_exists(&path)?.unwrap_or_default();
            config.set_infura_key(key.clone(), &path)?;
            println!("Infura API key saved to {}", path.display());
        }

        ConfigCommands::Show => {
            let path = ConfigFile::default_path();
            if path.exists() {
                let content = std::fs::read_to_string(&path)?;
                println!("# {}\n", path.display());
                println!("{}", content);
            } else {
                println!("No config file found at: {}", path.display());
                println!("\nCreate one with:");
                println!("  wyvern-match-scan config set-infura-key YOUR_KEY");
            }
        }
    }

    Ok(())
}
