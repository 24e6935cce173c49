//! OptiPrice CLI
//!
//! Prices a European option and prints its Greeks.
//!
//! Volatility comes from `--vol` (percent) or is estimated from a file of
//! closing prices (`--closes`, one price per line).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use optiprice::prelude::*;

/// Black-Scholes option pricing calculator
#[derive(Parser)]
#[command(name = "optiprice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Ticker label for the underlying
    #[arg(long, default_value = "SPOT")]
    ticker: String,

    /// Current underlying price (defaults to the last close with --closes)
    #[arg(long)]
    spot: Option<f64>,

    /// Strike price (defaults to at-the-money)
    #[arg(long)]
    strike: Option<f64>,

    /// Days to expiration
    #[arg(long, default_value_t = 30)]
    days: u32,

    /// Risk-free rate in percent
    #[arg(long, default_value_t = 3.0)]
    rate: f64,

    /// Volatility in percent
    #[arg(long)]
    vol: Option<f64>,

    /// File of closing prices for historical volatility
    #[arg(long)]
    closes: Option<PathBuf>,

    /// Option type: call or put
    #[arg(short = 't', long = "type", default_value = "call")]
    option_type: String,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the full analysis as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => PricingConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PricingConfig::default(),
    };

    let snapshot = load_snapshot(&cli, &config)?;
    let request = build_request(&cli)?;

    let analysis = analyze(&snapshot, &request, &config)?;

    if cli.json {
        println!("{}", analysis.to_json()?);
    } else {
        print_summary(&analysis);
    }
    Ok(())
}

/// Market side of the inputs. Without `--closes` there is no history, so
/// the snapshot volatility is zero and `--vol` supplies σ via the request.
fn load_snapshot(cli: &Cli, config: &PricingConfig) -> Result<MarketSnapshot> {
    match (&cli.closes, cli.spot, cli.vol) {
        (Some(path), spot, _) => {
            let closes = read_closes(path)?;
            let mut snapshot =
                MarketSnapshot::from_closes(&cli.ticker, &closes, &config.volatility)?;
            if let Some(price) = spot {
                snapshot.price = price;
            }
            Ok(snapshot)
        }
        (None, Some(spot), Some(_)) => Ok(MarketSnapshot::new(&cli.ticker, spot, 0.0)?),
        (None, None, _) => bail!("either --spot or --closes is required"),
        (None, Some(_), None) => bail!("--vol is required unless --closes is given"),
    }
}

/// Contract side of the inputs; `--vol` always goes through the request
/// so it is checked against the configured limits.
fn build_request(cli: &Cli) -> Result<AnalysisRequest> {
    let option_type: OptionType = cli.option_type.parse()?;
    let mut request = AnalysisRequest::new(option_type)
        .with_days(cli.days)
        .with_rate_pct(cli.rate);
    if let Some(strike) = cli.strike {
        request = request.with_strike(strike);
    }
    if let Some(vol) = cli.vol {
        request = request.with_volatility_pct(vol);
    }
    Ok(request)
}

fn read_closes(path: &Path) -> Result<Vec<f64>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading closes from {}", path.display()))?;
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            line.parse::<f64>()
                .with_context(|| format!("invalid close '{}'", line))
        })
        .collect()
}

fn print_summary(analysis: &OptionAnalysis) {
    let snap = &analysis.snapshot;
    let v = &analysis.valuation;
    let c = &v.contract;

    println!("OptiPrice - Black-Scholes Option Pricing");
    println!("========================================\n");

    println!("{} ({})", snap.name, snap.currency);
    if let Some(sector) = &snap.sector {
        println!("  Sector:          {}", sector);
    }
    if let Some(market_cap) = snap.market_cap {
        println!("  Market Cap:      ${:.0}", market_cap);
    }
    println!("  Current Price:   ${:.2}", snap.price);
    println!("  Price Change:    ${:.2}", snap.price_change());
    match analysis.volatility_source {
        VolatilitySource::Historical => {
            println!("  Historical Vol:  {:.2}%\n", snap.volatility * 100.0)
        }
        VolatilitySource::Custom => println!("  Custom Vol:      {:.2}%\n", c.volatility() * 100.0),
    }

    println!("Input Parameters:");
    println!("  Stock Price:     ${:.2}", c.underlying_price());
    println!("  Strike Price:    ${:.2}", c.strike_price());
    println!("  Time to Expiry:  {} days", analysis.days_to_expiry);
    println!("  Volatility:      {:.2}%", c.volatility() * 100.0);
    println!("  Risk-free Rate:  {:.2}%", c.risk_free_rate() * 100.0);
    println!("  Option Type:     {}\n", c.option_type());

    println!("Calculated Results:");
    for (name, value) in v.greeks.rows() {
        let dollar = if matches!(name, "Delta" | "Gamma") { "" } else { "$" };
        println!("  {:<16} {}{:.4}", format!("{}:", name), dollar, value);
    }
    println!("  {:<16} {}", "Moneyness:", v.moneyness.label());
    println!("  {:<16} ${:.2}", "Time Value:", v.time_value);
}
