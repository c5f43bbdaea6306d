//! valocracy-cli — Evaluate exponential curves and simulate voting-power decay.
//!
//! Every subcommand is a thin wrapper over valocracy-curves and
//! valocracy-ledger; values are printed both as raw fixed-point integers and
//! as decimals.

mod settings;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use valocracy_core::constants::{SCALE, SECONDS_PER_DAY};
use valocracy_core::fixed::format_scaled;
use valocracy_core::types::AccountId;
use valocracy_curves::{curve_normalization, curve_scaling, sample_curve};
use valocracy_ledger::DecayLedger;

/// Valocracy command-line interface.
#[derive(Parser)]
#[command(name = "valocracy-cli")]
#[command(version, about = "Fixed-point exponential curves and decaying voting power")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the curve at a single point in time.
    Curve(CurveArgs),
    /// Print the curve at evenly spaced points across a window.
    Sample(SampleArgs),
    /// Mint an amount and print its decayed balance over the vacation period.
    Simulate(SimulateArgs),
}

#[derive(Args)]
struct CurveArgs {
    /// Evaluation time (Unix seconds).
    #[arg(long)]
    current: u64,

    /// Window start (Unix seconds).
    #[arg(long)]
    start: u64,

    /// Window end (Unix seconds).
    #[arg(long)]
    end: u64,

    /// Curve shape in [-10000, 10000], excluding 0.
    #[arg(long, allow_negative_numbers = true)]
    curvature: i32,

    /// Fall from 1 to 0 instead of rising from 0 to 1.
    #[arg(long)]
    descending: bool,

    /// Print as a percentage (100% = 100 * 10^18).
    #[arg(long)]
    percent: bool,
}

#[derive(Args)]
struct SampleArgs {
    /// Window start (Unix seconds).
    #[arg(long)]
    start: u64,

    /// Window end (Unix seconds).
    #[arg(long)]
    end: u64,

    /// Curve shape in [-10000, 10000], excluding 0.
    #[arg(long, allow_negative_numbers = true)]
    curvature: i32,

    /// Number of intervals; prints steps + 1 rows.
    #[arg(long, default_value_t = 10)]
    steps: u32,

    /// Fall from 1 to 0 instead of rising from 0 to 1.
    #[arg(long)]
    descending: bool,
}

#[derive(Args)]
struct SimulateArgs {
    /// Amount to mint, in whole units.
    #[arg(long)]
    amount: u128,

    /// Account credited by the mint.
    #[arg(long, default_value_t = AccountId::ZERO)]
    account: AccountId,

    /// Mint time (Unix seconds). Defaults to now.
    #[arg(long)]
    start: Option<u64>,

    /// Days between printed rows.
    #[arg(long, default_value_t = 1)]
    step_days: u64,

    /// TOML settings file with `curvature` and `vacation_period`.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured curvature.
    #[arg(long, allow_negative_numbers = true)]
    curvature: Option<i32>,

    /// Override the configured vacation period, in days.
    #[arg(long)]
    vacation_days: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    match cli.command {
        Commands::Curve(args) => curve(args),
        Commands::Sample(args) => sample(args),
        Commands::Simulate(args) => simulate(args),
    }
}

/// Evaluate and print one curve value.
fn curve(args: CurveArgs) -> Result<()> {
    let ascending = !args.descending;
    let value = if args.percent {
        curve_scaling(args.current, args.start, args.end, args.curvature, ascending)
    } else {
        curve_normalization(args.current, args.start, args.end, args.curvature, ascending)
    }
    .context("curve evaluation failed")?;

    println!("{value}");
    println!("{}", format_scaled(value));
    Ok(())
}

/// Print a table of `(time, value)` rows across the window.
fn sample(args: SampleArgs) -> Result<()> {
    let points = sample_curve(
        args.start,
        args.end,
        args.curvature,
        !args.descending,
        args.steps,
    )
    .context("curve sampling failed")?;

    println!("{:>20}  {:>22}", "time", "value");
    for (time, value) in points {
        println!("{time:>20}  {:>22}", format_scaled(value));
    }
    Ok(())
}

/// Mint once and print the balance every `step_days` until it reaches zero.
fn simulate(args: SimulateArgs) -> Result<()> {
    let mut decay = settings::load(args.config.as_deref())?;
    if let Some(curvature) = args.curvature {
        decay.curvature = curvature;
    }
    if let Some(days) = args.vacation_days {
        decay.vacation_period = days.saturating_mul(SECONDS_PER_DAY);
    }
    info!(
        curvature = decay.curvature,
        vacation_period = decay.vacation_period,
        "decay configuration"
    );

    let start = match args.start {
        Some(t) => t,
        None => unix_now()?,
    };
    let amount = args
        .amount
        .checked_mul(SCALE)
        .context("amount too large")?;

    let mut ledger = DecayLedger::new(decay);
    ledger
        .mint(args.account, amount, start)
        .context("mint failed")?;

    let end = ledger.fully_decayed_at(&args.account);
    let step = args.step_days.max(1).saturating_mul(SECONDS_PER_DAY);
    debug!(account = %args.account, start, end, step, "simulating decay");

    println!("{:>6}  {:>20}  {:>32}", "day", "time", "balance");
    let mut now = start;
    loop {
        let balance = ledger
            .balance_of(&args.account, now)
            .context("balance query failed")?;
        let day = (now - start) / SECONDS_PER_DAY;
        println!("{day:>6}  {now:>20}  {:>32}", format_scaled(balance));
        if now >= end {
            break;
        }
        now = now.saturating_add(step).min(end);
    }
    Ok(())
}

fn unix_now() -> Result<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before Unix epoch")?
        .as_secs())
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Logs go to stderr so tables on stdout stay machine readable.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .init();
    }
}
