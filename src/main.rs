//! Accrual Vault CLI
//!
//! Command-line interface for simulating vault accrual and writing
//! exchange-rate schedules

use accrual_vault::projection::{ProjectionConfig, RateProjection};
use accrual_vault::{
    Address, Clock, ManualClock, MockToken, ReferenceToken, SystemClock, Vault, VaultConfig, SCALE,
    SECONDS_PER_YEAR,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "accrual_vault", version, about = "Interest-bearing vault simulator")]
struct Cli {
    /// Vault config JSON (VAULT_* environment variables override it)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Deploy a vault, deposit, let time pass and report the exchange rates
    Simulate {
        /// Annual interest rate in basis points
        #[arg(long, default_value_t = 700)]
        rate_bps: u32,

        /// Deposit in whole reference tokens
        #[arg(long, default_value_t = 100)]
        deposit: u64,

        /// Years to advance after the deposit
        #[arg(long, default_value_t = 3)]
        years: u64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write an exchange-rate schedule to CSV
    Project {
        /// Annual interest rate in basis points
        #[arg(long, default_value_t = 700)]
        rate_bps: u32,

        /// Horizon in years
        #[arg(long, default_value_t = 3)]
        years: u64,

        /// Days between rows
        #[arg(long, default_value_t = 30)]
        step_days: u64,

        /// Principal in whole derived units
        #[arg(long, default_value_t = 100)]
        principal: u64,

        /// Output CSV path
        #[arg(long, default_value = "exchange_rate_projection.csv")]
        output: PathBuf,
    },
}

#[derive(Serialize)]
struct SimulationReport {
    interest_rate_bps: u32,
    deposited: u128,
    credited: u128,
    elapsed_secs: u64,
    get_move: u128,
    exchange_rate: u128,
    current_exchange_rate: u128,
}

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Multiply a CLI count by a unit length in seconds
fn to_secs(count: u64, unit_secs: u64, what: &str) -> Result<u64> {
    count
        .checked_mul(unit_secs)
        .with_context(|| format!("{} {} is too large to express in seconds", count, what))
}

fn load_config(path: Option<&PathBuf>) -> Result<VaultConfig> {
    let config = match path {
        Some(path) => VaultConfig::from_json_path(path)
            .with_context(|| format!("loading vault config from {}", path.display()))?,
        None => VaultConfig::default(),
    };
    Ok(config.with_env_overrides()?)
}

fn simulate(config: VaultConfig, rate_bps: u32, deposit: u64, years: u64, json: bool) -> Result<()> {
    let owner = Address::from_low_u64(1);
    let vault_address = Address::from_low_u64(0x6d6f7665);
    let supply = 1_000_000_000 * SCALE;

    let clock = ManualClock::new(SystemClock.now());
    let mut token = MockToken::new("Mock MOVE", "MOVE", owner, supply);
    token.approve(owner, vault_address, supply);

    let mut vault = Vault::initialize(vault_address, owner, token, clock.clone(), config)?;
    vault.set_interest_rate(&owner, rate_bps)?;

    let amount = deposit as u128 * SCALE;
    let credited = vault.deposit(&owner, amount)?;

    let elapsed_secs = to_secs(years, SECONDS_PER_YEAR, "years")?;
    clock.advance(elapsed_secs);

    let report = SimulationReport {
        interest_rate_bps: vault.interest_rate(),
        deposited: amount,
        credited,
        elapsed_secs,
        get_move: vault.get_move(amount)?,
        exchange_rate: vault.exchange_rate(),
        current_exchange_rate: vault.current_exchange_rate()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Accrual Vault v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");
    println!("  Interest rate:          {} bps", report.interest_rate_bps);
    println!("  Deposited:              {}", report.deposited);
    println!("  Credited:               {}", report.credited);
    println!("  Elapsed:                {} s ({} years)", report.elapsed_secs, years);
    println!("  getMOVE({}): {}", amount, report.get_move);
    println!("  exchangeRate:           {}", report.exchange_rate);
    println!("  currentExchangeRate:    {}", report.current_exchange_rate);
    Ok(())
}

fn project(rate_bps: u32, years: u64, step_days: u64, principal: u64, output: PathBuf) -> Result<()> {
    let config = ProjectionConfig {
        rate_bps,
        horizon_secs: to_secs(years, SECONDS_PER_YEAR, "years")?,
        step_secs: to_secs(step_days, SECONDS_PER_DAY, "days")?,
        principal: principal as u128 * SCALE,
        start_rate: SCALE,
        start_timestamp: SystemClock.now() as i64,
    };

    let result = RateProjection::run(&config)?;
    result
        .write_csv(&output)
        .with_context(|| format!("writing {}", output.display()))?;

    let summary = result.summary();
    println!("Projection ({} rows) written to: {}", result.rows.len(), output.display());
    println!("\nSummary:");
    println!("  Final exchange rate:    {}", summary.final_exchange_rate);
    println!("  Final reference value:  {}", summary.final_reference_value);
    println!("  Total growth:           {:.6}%", summary.total_growth * 100.0);
    println!("  Effective annual yield: {:.6}%", summary.effective_annual_yield * 100.0);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Simulate { rate_bps, deposit, years, json } => {
            simulate(config, rate_bps, deposit, years, json)
        }
        Command::Project { rate_bps, years, step_days, principal, output } => {
            project(rate_bps, years, step_days, principal, output)
        }
    }
}
