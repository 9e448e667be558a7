//! btsg-rebalance: plan, verify and export BTSG stake rebalances.

use btsg_cli::commands;
use btsg_cli::RebalanceConfig;
use btsg_types::Timestamp;
use btsg_utils::LogFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "btsg-rebalance", about = "BTSG stake rebalancing tool", version)]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding allocations.json and generated files.
    #[arg(long, global = true, env = "BTSG_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level or filter directive, e.g. "info" or "warn,btsg_ledger=debug".
    #[arg(long, global = true, env = "BTSG_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output: "human" or "json".
    #[arg(long, global = true, env = "BTSG_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Denomination on wire messages.
    #[arg(long, global = true, env = "BTSG_DENOM")]
    denom: Option<String>,

    /// Minimum reward, in BTSG, worth withdrawing.
    #[arg(long, global = true, env = "BTSG_REWARD_THRESHOLD")]
    reward_threshold: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Plan withdrawals and staking moves; write messages.json.
    Plan,

    /// Replay messages.json and check every validator reaches its target.
    Verify,

    /// Print allocation totals; write allocations_summary.json.
    Analyze,

    /// Wrap messages in authz MsgExec transactions.
    Authz {
        /// Also write one file per delegator.
        #[arg(long)]
        separate: bool,

        /// Executing account; defaults to each delegator.
        #[arg(long, env = "BTSG_GRANTEE")]
        grantee: Option<String>,
    },

    /// Convert messages to DAO DAO action lists.
    Daodao {
        #[arg(long, env = "BTSG_CHAIN_ID")]
        chain_id: Option<String>,

        #[arg(long)]
        decimals: Option<u32>,
    },

    /// Write authz grants from each delegator to a grantee.
    Grant {
        #[arg(long, env = "BTSG_GRANTEE")]
        grantee: Option<String>,
    },

    /// Flatten operations into spreadsheet rows.
    Rows,
}

fn load_config(cli: &Cli) -> anyhow::Result<RebalanceConfig> {
    let mut config = match &cli.config {
        Some(path) => RebalanceConfig::from_toml_file(path)?,
        None => RebalanceConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(denom) = &cli.denom {
        config.denom = denom.clone();
    }
    if let Some(threshold) = cli.reward_threshold {
        config.reward_threshold_btsg = threshold;
    }
    match &cli.command {
        Command::Authz {
            grantee: Some(g), ..
        }
        | Command::Grant { grantee: Some(g) } => config.grantee = Some(g.clone()),
        Command::Daodao { chain_id, decimals } => {
            if let Some(id) = chain_id {
                config.chain_id = id.clone();
            }
            if let Some(d) = decimals {
                config.decimals = *d;
            }
        }
        _ => {}
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    btsg_utils::init_logging(config.log_format, &config.log_level)?;

    if let Some(path) = &cli.config {
        tracing::info!("loaded config from {}", path.display());
    }

    match cli.command {
        Command::Plan => {
            commands::plan::run(&config)?;
        }
        Command::Verify => {
            let report = commands::verify::run(&config)?;
            print!("{}", commands::verify::render(&report, config.scale()?));
            commands::verify::ensure_matched(&report)?;
        }
        Command::Analyze => {
            let summary = commands::analyze::run(&config)?;
            let scale = config.scale()?;
            println!("sum current: {:.6} BTSG", scale.to_display(summary.current));
            println!("sum rewards: {:.6} BTSG", scale.to_display(summary.rewards));
            println!("sum target:  {:.6} BTSG", scale.to_display(summary.target));
        }
        Command::Authz { separate, .. } => {
            commands::authz::run(&config, separate)?;
        }
        Command::Daodao { .. } => {
            commands::daodao::run(&config)?;
        }
        Command::Grant { .. } => {
            let grantee = config
                .grantee
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("--grantee is required"))?;
            commands::grant::run(&config, grantee, Timestamp::now())?;
        }
        Command::Rows => {
            commands::rows::run(&config)?;
        }
    }
    Ok(())
}
