//! Implementation of the rental-sim command.
//!
//! Runs one customer through a rent/return cycle against a configured shop.
//! Time is simulated: the shop runs on a manual clock that jumps forward by
//! the requested elapsed duration between the rental and the return.

use anyhow::{Context, Result};
use carrental_core::{
    Basis, Bill, Clock, Customer, ManualClock, RentalError, RentalRecord, RentalShop, ShopOptions,
};
use chrono::{DateTime, TimeDelta, Utc};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Output format for the report.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

/// Simulate renting cars and returning them after some time.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Billing basis: hourly, daily or weekly
    #[arg(value_name = "BASIS")]
    pub basis: String,

    /// Number of cars to rent
    #[arg(value_name = "COUNT", allow_hyphen_values = true)]
    pub count: String,

    /// Cars in stock when the shop opens (overrides the config file)
    #[arg(short, long, value_name = "N")]
    pub stock: Option<u32>,

    /// Shop configuration file with `key = value` lines
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Set a shop option (can be specified multiple times)
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// How long the cars are kept before being returned (e.g. 45s, 90m, 25h, 3d, 2w, 1d6h)
    #[arg(short, long, value_name = "DURATION", value_parser = parse_elapsed)]
    pub elapsed: Option<TimeDelta>,

    /// Keep the cars; skip the return
    #[arg(long)]
    pub no_return: bool,

    /// Output format (text or json)
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Show debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output (just use exit code)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Parse a duration such as `90m`, `25h` or `1d6h`.
///
/// Units are `s`, `m`, `h`, `d` and `w`; a bare number means seconds.
pub fn parse_elapsed(s: &str) -> Result<TimeDelta, String> {
    let text = s.trim();
    if text.is_empty() {
        return Err("empty duration".to_string());
    }

    let mut total: i64 = 0;
    let mut rest = text;
    while !rest.is_empty() {
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits_end == 0 {
            return Err(format!(
                "invalid duration \"{text}\": expected a number before \"{rest}\""
            ));
        }
        let (digits, tail) = rest.split_at(digits_end);
        let unit_end = tail
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_end);

        let value: i64 = digits
            .parse()
            .map_err(|_| format!("duration \"{text}\" is too large"))?;
        let per_unit = match unit {
            "" | "s" => 1,
            "m" => 60,
            "h" => 3_600,
            "d" => 86_400,
            "w" => 604_800,
            other => {
                return Err(format!(
                    "invalid duration unit \"{other}\" in \"{text}\": use s, m, h, d or w"
                ))
            }
        };
        total = value
            .checked_mul(per_unit)
            .and_then(|secs| total.checked_add(secs))
            .ok_or_else(|| format!("duration \"{text}\" is too large"))?;
        rest = next;
    }

    TimeDelta::try_seconds(total).ok_or_else(|| format!("duration \"{text}\" is too large"))
}

/// A rental as shown in JSON output.
#[derive(Debug, Serialize)]
pub struct JsonRental {
    /// Shop-assigned rental id
    pub id: u64,
    /// Billing basis
    pub basis: Basis,
    /// Cars rented
    pub num_cars: u32,
    /// When the rental started
    pub rental_time: DateTime<Utc>,
}

impl From<&RentalRecord> for JsonRental {
    fn from(record: &RentalRecord) -> Self {
        Self {
            id: record.id().seq(),
            basis: record.basis(),
            num_cars: record.num_cars(),
            rental_time: record.rental_time(),
        }
    }
}

/// A failure as shown in JSON output.
#[derive(Debug, Serialize)]
pub struct JsonError {
    /// Error code (e.g., "R003")
    pub code: String,
    /// Error message
    pub message: String,
}

impl From<&RentalError> for JsonError {
    fn from(err: &RentalError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Outcome of one simulated rental.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    /// Stock before the rental
    pub opening_stock: u32,
    /// The granted rental, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rental: Option<JsonRental>,
    /// The bill, if the cars were returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill: Option<Bill>,
    /// Stock after the simulation
    pub final_stock: u32,
    /// The failure that stopped the simulation, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

/// Build the shop configuration from the config file, `--option` and `--stock`.
pub fn load_options(args: &Args) -> Result<ShopOptions> {
    let mut options = ShopOptions::new();

    if let Some(path) = &args.config {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        options.apply(&text);
    }

    for option in &args.options {
        let (key, value) = option
            .split_once('=')
            .with_context(|| format!("invalid option \"{option}\": expected KEY=VALUE"))?;
        options.set(key.trim(), value.trim());
    }

    if let Some(stock) = args.stock {
        options.stock = stock;
    }

    Ok(options)
}

/// Run the simulation, writing the report to `out`.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<ExitCode> {
    let options = load_options(args)?;
    if !args.quiet {
        for warning in &options.warnings {
            eprintln!("warning: [{}] {}", warning.code, warning.message);
        }
    }

    let clock = Arc::new(ManualClock::starting_now());
    let returned_at = match args.elapsed {
        Some(elapsed) => Some(
            clock
                .now()
                .checked_add_signed(elapsed)
                .with_context(|| {
                    format!(
                        "elapsed duration of {}s runs past the end of the calendar",
                        elapsed.num_seconds()
                    )
                })?,
        ),
        None => None,
    };

    let mut shop = RentalShop::from_options(&options).with_clock(clock.clone());
    let mut customer = Customer::new();
    let mut report = Report {
        opening_stock: shop.display_stock(),
        ..Report::default()
    };

    let outcome = simulate(
        args,
        returned_at,
        &clock,
        &mut shop,
        &mut customer,
        &mut report,
    );
    report.final_stock = shop.display_stock();
    if let Err(err) = &outcome {
        report.error = Some(JsonError::from(err));
    }

    if !args.quiet {
        write_report(&report, args.format, out)?;
    }

    Ok(match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::from(1),
    })
}

fn simulate(
    args: &Args,
    returned_at: Option<DateTime<Utc>>,
    clock: &ManualClock,
    shop: &mut RentalShop,
    customer: &mut Customer,
    report: &mut Report,
) -> Result<(), RentalError> {
    let record = customer.request_car(&args.basis, args.count.as_str(), shop)?;
    report.rental = Some(JsonRental::from(record));

    if args.no_return {
        return Ok(());
    }

    if let Some(returned_at) = returned_at {
        clock.set(returned_at);
    }
    report.bill = Some(customer.return_car(shop)?);
    Ok(())
}

fn write_report<W: Write>(report: &Report, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            writeln!(out, "{}", stock_line(report.opening_stock))?;
            if let Some(rental) = &report.rental {
                writeln!(
                    out,
                    "You rented {} car(s) on a {} basis (rental #{}).",
                    rental.num_cars, rental.basis, rental.id
                )?;
            }
            if let Some(bill) = &report.bill {
                writeln!(out, "{bill}")?;
            }
            if let Some(error) = &report.error {
                writeln!(out, "error[{}]: {}", error.code, error.message)?;
            }
            writeln!(out, "{}", stock_line(report.final_stock))?;
        }
    }
    Ok(())
}

fn stock_line(stock: u32) -> String {
    if stock > 0 {
        format!("Available cars: {stock}")
    } else {
        "Sorry, no cars available at the moment.".to_string()
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // A subscriber may already be installed when embedded; that is fine.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Main entry point for rental-sim.
pub fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut stdout = io::stdout().lock();
    match run(&args, &mut stdout) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
