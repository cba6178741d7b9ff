//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::memory_cache::{CachedPricePort, MemoryPriceCache};
use crate::adapters::metadata_csv_adapter::MetadataCsvAdapter;
use crate::domain::backtest::{
    regime_signal, run_rotation_backtest, BacktestLedger, RotationConfig, RotationPanel,
};
use crate::domain::config_validation::{
    data_settings, rotation_config, rrg_config, universe_settings, validate_config, DataSettings,
    UniverseSettings,
};
use crate::domain::error::RotatorError;
use crate::domain::metrics::LedgerSummary;
use crate::domain::snapshot::{analyze_universe, rank_snapshots, InstrumentSnapshot, RrgConfig};
use crate::domain::store::TimeSeriesStore;
use crate::domain::universe::{check_availability, parse_codes, Universe};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PricePort;
use crate::ports::metadata_port::MetadataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "rotator", about = "Relative-strength sector rotation analytics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score the universe on the relative rotation graph
    Rrg {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Comma-separated instrument ids (restricts the metadata universe)
        #[arg(long)]
        codes: Option<String>,
    },
    /// Run the regime rotation backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Comma-separated instrument ids (restricts the metadata universe)
        #[arg(long)]
        codes: Option<String>,
    },
    /// Score the universe and run the backtest on one shared price fetch
    Report {
        #[arg(short, long)]
        config: PathBuf,
        /// Snapshot CSV path
        #[arg(long)]
        rrg_output: Option<PathBuf>,
        /// Ledger CSV path
        #[arg(long)]
        ledger_output: Option<PathBuf>,
        /// Comma-separated instrument ids (restricts the metadata universe)
        #[arg(long)]
        codes: Option<String>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Rrg {
            config,
            output,
            codes,
        } => run_rrg(&config, output.as_deref(), codes.as_deref()),
        Command::Backtest {
            config,
            output,
            codes,
        } => run_backtest(&config, output.as_deref(), codes.as_deref()),
        Command::Report {
            config,
            rrg_output,
            ledger_output,
            codes,
        } => run_report(
            &config,
            rrg_output.as_deref(),
            ledger_output.as_deref(),
            codes.as_deref(),
        ),
        Command::Validate { config } => run_validate(&config),
    }
}

fn fail(err: RotatorError) -> ExitCode {
    eprintln!("error: {err}");
    (&err).into()
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(fail)
}

/// Everything a run needs besides the analysis parameters.
pub struct RunContext {
    pub data: DataSettings,
    pub universe: Universe,
}

pub fn build_universe(
    metadata: &dyn MetadataPort,
    settings: &UniverseSettings,
) -> Result<Universe, RotatorError> {
    let reserved = [&settings.benchmark, &settings.driver_a, &settings.driver_b];
    let instruments: Vec<_> = metadata
        .instruments()?
        .into_iter()
        .filter(|m| !reserved.contains(&&m.id))
        .collect();
    if instruments.is_empty() {
        return Err(RotatorError::Data {
            reason: "universe metadata lists no instruments".into(),
        });
    }

    Ok(Universe {
        instruments,
        benchmark: settings.benchmark.clone(),
        driver_a: settings.driver_a.clone(),
        driver_b: settings.driver_b.clone(),
    })
}

/// Narrows the universe to `codes` (the `--codes` override), keeping
/// metadata order. Codes missing from the metadata are ignored.
pub fn restrict_universe(
    universe: Universe,
    codes: Option<&str>,
) -> Result<Universe, RotatorError> {
    let Some(input) = codes else {
        return Ok(universe);
    };
    let ids = parse_codes(input)
        .map_err(|e| RotatorError::invalid("universe", "codes", e.to_string()))?;
    for id in ids.iter().filter(|id| universe.get(id).is_none()) {
        warn!(code = %id, "code not in universe metadata, ignored");
    }

    let restricted = universe.restricted_to(&ids);
    if restricted.instruments.is_empty() {
        return Err(RotatorError::Data {
            reason: format!("none of the requested codes ({input}) is in the universe"),
        });
    }
    Ok(restricted)
}

fn build_context(config: &dyn ConfigPort, codes: Option<&str>) -> Result<RunContext, RotatorError> {
    validate_config(config)?;
    let data = data_settings(config)?;
    let settings = universe_settings(config)?;
    let universe = build_universe(&MetadataCsvAdapter::new(settings.metadata.clone()), &settings)?;
    let universe = restrict_universe(universe, codes)?;
    info!(
        instruments = universe.count(),
        benchmark = %universe.benchmark,
        "universe loaded"
    );
    Ok(RunContext { data, universe })
}

/// Fetches the universe, benchmark and drivers from the warm-up start to the
/// end date and builds the daily store.
pub fn load_prices(
    prices: &dyn PricePort,
    ctx: &RunContext,
) -> Result<TimeSeriesStore, RotatorError> {
    let ids = ctx.universe.fetch_ids();
    let fetched = prices.fetch(&ids, ctx.data.fetch_start(), ctx.data.end_date)?;

    let report = check_availability(&fetched, &ids, 2);
    info!(
        available = report.available.len(),
        skipped = report.skipped.len(),
        "prices loaded"
    );
    TimeSeriesStore::from_map(&ctx.universe.benchmark, fetched)
}

pub fn run_rrg_pipeline(
    prices: &dyn PricePort,
    ctx: &RunContext,
    config: &RrgConfig,
) -> Result<Vec<InstrumentSnapshot>, RotatorError> {
    let store = load_prices(prices, ctx)?;
    let mut snapshots = analyze_universe(&store, &ctx.universe.instruments, config);
    rank_snapshots(&mut snapshots);
    Ok(snapshots)
}

pub fn run_backtest_pipeline(
    prices: &dyn PricePort,
    ctx: &RunContext,
    config: &RotationConfig,
) -> Result<BacktestLedger, RotatorError> {
    let daily = load_prices(prices, ctx)?;
    let panel_store = daily.resample(config.frequency);
    let signal = regime_signal(
        &daily,
        &panel_store,
        &ctx.universe.driver_a,
        &ctx.universe.driver_b,
        config,
    )?;

    let pools = ctx.universe.pools();
    if pools.is_empty() {
        warn!("no instrument is assigned to a pool");
    }
    let panel = RotationPanel::new(&panel_store, &pools);
    let ledger = run_rotation_backtest(&panel, &signal, config).since(ctx.data.start_date);
    info!(periods = ledger.len(), "backtest complete");
    Ok(ledger)
}

/// RRG snapshot and rotation ledger computed from the same prices.
#[derive(Debug, Clone)]
pub struct Report {
    pub snapshots: Vec<InstrumentSnapshot>,
    pub ledger: BacktestLedger,
}

/// Runs both pipelines against `prices`. Both request the same ids and
/// window, so a caching port serves the second request from memory.
pub fn run_report_pipeline(
    prices: &dyn PricePort,
    ctx: &RunContext,
    rrg: &RrgConfig,
    rotation: &RotationConfig,
) -> Result<Report, RotatorError> {
    let snapshots = run_rrg_pipeline(prices, ctx, rrg)?;
    let ledger = run_backtest_pipeline(prices, ctx, rotation)?;
    Ok(Report { snapshots, ledger })
}

fn fmt_pct(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:+.2}%", v * 100.0))
        .unwrap_or_else(|| "-".to_string())
}

pub fn print_snapshots(snapshots: &[InstrumentSnapshot]) {
    println!(
        "{:<10} {:<24} {:>6} {:<10} {:>8} {:>8} {:>9} {:>9}",
        "id", "name", "score", "quadrant", "trend", "momentum", "1d", "3m"
    );
    for s in snapshots {
        match (s.score, s.quadrant) {
            (Some(score), Some(quadrant)) => println!(
                "{:<10} {:<24} {:>6.2} {:<10} {:>8.2} {:>8.2} {:>9} {:>9}",
                s.id,
                s.name,
                score,
                quadrant.to_string(),
                s.trend_strength.unwrap_or(f64::NAN),
                s.momentum.unwrap_or(f64::NAN),
                fmt_pct(s.daily_return),
                fmt_pct(s.three_month_return),
            ),
            _ => println!(
                "{:<10} {:<24} insufficient data {:>27} {:>9}",
                s.id,
                s.name,
                fmt_pct(s.daily_return),
                fmt_pct(s.three_month_return),
            ),
        }
    }
}

pub fn print_ledger(ledger: &BacktestLedger) {
    if ledger.is_empty() {
        println!("insufficient data: no complete rebalance period");
        return;
    }
    println!(
        "{:<10} {:<10} {:<9} {:<32} {:>9} {:>9} {:>9}",
        "start", "end", "regime", "selected", "strategy", "bench", "alpha"
    );
    for r in ledger.iter() {
        println!(
            "{:<10} {:<10} {:<9} {:<32} {:>9} {:>9} {:>9}",
            r.period_start.to_string(),
            r.period_end.to_string(),
            r.regime.to_string(),
            r.selected.join(","),
            fmt_pct(Some(r.strategy_return)),
            fmt_pct(Some(r.benchmark_return)),
            fmt_pct(Some(r.alpha)),
        );
    }
}

pub fn print_summary(summary: &LedgerSummary) {
    println!();
    println!("periods:              {}", summary.periods);
    println!("cumulative strategy:  {}", fmt_pct(Some(summary.cumulative_strategy)));
    println!("cumulative benchmark: {}", fmt_pct(Some(summary.cumulative_benchmark)));
    println!("alpha:                {}", fmt_pct(Some(summary.alpha)));
    println!(
        "periods beaten:       {} ({:.0}%)",
        summary.periods_beaten,
        summary.hit_rate * 100.0
    );
    println!("max drawdown:         {:.2}%", summary.max_drawdown * 100.0);
    println!(
        "regimes:              {} cyclical / {} defensive",
        summary.cyclical_periods, summary.defensive_periods
    );
}

/// Runs `f` with `source` behind a TTL cache that lives for the whole call,
/// so every fetch `f` repeats within `ttl` is served from memory.
pub fn with_price_cache<T>(
    source: &dyn PricePort,
    ttl: Duration,
    f: impl FnOnce(&dyn PricePort) -> Result<T, RotatorError>,
) -> Result<T, RotatorError> {
    let cache = MemoryPriceCache::new();
    let prices = CachedPricePort::new(source, &cache, ttl);
    let result = f(&prices);
    debug!(entries = cache.len(), "price cache released");
    result
}

fn with_csv_prices<T>(
    data: &DataSettings,
    f: impl FnOnce(&dyn PricePort) -> Result<T, RotatorError>,
) -> Result<T, RotatorError> {
    let source = CsvAdapter::new(data.directory.clone());
    with_price_cache(&source, data.cache_ttl, f)
}

fn run_rrg(config_path: &Path, output_path: Option<&Path>, codes: Option<&str>) -> ExitCode {
    // Stage 1: Load and validate config
    info!(path = %config_path.display(), "loading config");
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let (ctx, rrg) =
        match build_context(&adapter, codes).and_then(|ctx| Ok((ctx, rrg_config(&adapter)?))) {
            Ok(v) => v,
            Err(e) => return fail(e),
        };

    // Stage 2: Fetch and analyze
    let snapshots =
        match with_csv_prices(&ctx.data, |prices| run_rrg_pipeline(prices, &ctx, &rrg)) {
            Ok(s) => s,
            Err(e) => return fail(e),
        };

    // Stage 3: Report
    print_snapshots(&snapshots);
    if let Some(path) = output_path {
        if let Err(e) = CsvReportAdapter.write_snapshots(&snapshots, path) {
            return fail(e);
        }
        eprintln!("Snapshot written to {}", path.display());
    }
    ExitCode::SUCCESS
}

fn run_backtest(config_path: &Path, output_path: Option<&Path>, codes: Option<&str>) -> ExitCode {
    // Stage 1: Load and validate config
    info!(path = %config_path.display(), "loading config");
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let (ctx, rotation) =
        match build_context(&adapter, codes).and_then(|ctx| Ok((ctx, rotation_config(&adapter)?))) {
            Ok(v) => v,
            Err(e) => return fail(e),
        };

    // Stage 2: Simulate
    let ledger = match with_csv_prices(&ctx.data, |prices| {
        run_backtest_pipeline(prices, &ctx, &rotation)
    }) {
        Ok(l) => l,
        Err(e) => return fail(e),
    };

    // Stage 3: Report
    print_ledger(&ledger);
    if let Some(summary) = LedgerSummary::compute(&ledger) {
        print_summary(&summary);
    }
    if let Some(path) = output_path {
        if let Err(e) = CsvReportAdapter.write_ledger(&ledger, path) {
            return fail(e);
        }
        eprintln!("Ledger written to {}", path.display());
    }
    ExitCode::SUCCESS
}

fn run_report(
    config_path: &Path,
    rrg_output: Option<&Path>,
    ledger_output: Option<&Path>,
    codes: Option<&str>,
) -> ExitCode {
    // Stage 1: Load and validate config
    info!(path = %config_path.display(), "loading config");
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let settings = build_context(&adapter, codes).and_then(|ctx| {
        Ok((ctx, rrg_config(&adapter)?, rotation_config(&adapter)?))
    });
    let (ctx, rrg, rotation) = match settings {
        Ok(v) => v,
        Err(e) => return fail(e),
    };

    // Stage 2: Fetch once, analyze and simulate
    let report = match with_csv_prices(&ctx.data, |prices| {
        run_report_pipeline(prices, &ctx, &rrg, &rotation)
    }) {
        Ok(r) => r,
        Err(e) => return fail(e),
    };

    // Stage 3: Report
    print_snapshots(&report.snapshots);
    println!();
    print_ledger(&report.ledger);
    if let Some(summary) = LedgerSummary::compute(&report.ledger) {
        print_summary(&summary);
    }
    if let Some(path) = rrg_output {
        if let Err(e) = CsvReportAdapter.write_snapshots(&report.snapshots, path) {
            return fail(e);
        }
        eprintln!("Snapshot written to {}", path.display());
    }
    if let Some(path) = ledger_output {
        if let Err(e) = CsvReportAdapter.write_ledger(&report.ledger, path) {
            return fail(e);
        }
        eprintln!("Ledger written to {}", path.display());
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &Path) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    match validate_config(&adapter) {
        Ok(()) => {
            println!("{}: configuration is valid", config_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}
