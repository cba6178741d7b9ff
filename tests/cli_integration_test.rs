//! Integration tests for the rrg and backtest command pipelines.
//!
//! Tests cover:
//! - Config loading into typed settings
//! - Universe construction from metadata
//! - RRG scoring through run_rrg_pipeline with MockPricePort
//! - Rotation backtest through run_backtest_pipeline with MockPricePort
//! - One cached fetch shared by both pipelines (report)
//! - End-to-end runs on CSV files and INI files in a temp directory

mod common;

use approx::assert_relative_eq;
use clap::Parser;
use common::*;
use rotator::adapters::file_config_adapter::FileConfigAdapter;
use rotator::cli::{self, Cli, RunContext};
use rotator::domain::backtest::RotationConfig;
use rotator::domain::config_validation::{data_settings, universe_settings, DataSettings};
use rotator::domain::error::RotatorError;
use rotator::domain::metrics::LedgerSummary;
use rotator::domain::price_series::PriceSeries;
use rotator::domain::quadrant::Quadrant;
use rotator::domain::regime::{Regime, SignalBasis};
use rotator::domain::snapshot::RrgConfig;
use rotator::domain::store::Frequency;
use rotator::domain::universe::Universe;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

const DATA_START: &str = "2023-01-01";
const DATA_DAYS: usize = 700;

fn context(instruments: Vec<rotator::domain::universe::InstrumentMeta>) -> RunContext {
    RunContext {
        data: DataSettings {
            directory: PathBuf::from("/unused"),
            start_date: date("2023-07-01"),
            end_date: date("2024-10-31"),
            cache_ttl: Duration::from_secs(60),
        },
        universe: Universe {
            instruments,
            benchmark: "BENCH".to_string(),
            driver_a: "HG=F".to_string(),
            driver_b: "GC=F".to_string(),
        },
    }
}

fn monthly_growth(id: &str, monthly: f64) -> PriceSeries {
    daily_series(id, DATA_START, DATA_DAYS, |i| 100.0 * monthly.powf(i as f64 / 30.0))
}

/// Copper rising against flat gold keeps the ratio above its mean.
fn rising_drivers(port: MockPricePort) -> MockPricePort {
    port.with_series(daily_series("HG=F", DATA_START, DATA_DAYS, |i| 3.0 + 0.001 * i as f64))
        .with_series(flat_series("GC=F", DATA_START, DATA_DAYS, 2000.0))
}

fn falling_drivers(port: MockPricePort) -> MockPricePort {
    port.with_series(daily_series("HG=F", DATA_START, DATA_DAYS, |i| 5.0 - 0.001 * i as f64))
        .with_series(flat_series("GC=F", DATA_START, DATA_DAYS, 2000.0))
}

fn rotation_universe() -> Vec<rotator::domain::universe::InstrumentMeta> {
    vec![
        meta("SLOW", Some(Regime::Cyclical)),
        meta("MID", Some(Regime::Cyclical)),
        meta("FAST", Some(Regime::Cyclical)),
        meta("SAFE", Some(Regime::Defensive)),
    ]
}

fn rotation_prices() -> MockPricePort {
    rising_drivers(
        MockPricePort::new()
            .with_series(monthly_growth("BENCH", 1.01))
            .with_series(flat_series("SLOW", DATA_START, DATA_DAYS, 100.0))
            .with_series(monthly_growth("MID", 1.02))
            .with_series(monthly_growth("FAST", 1.05))
            .with_series(flat_series("SAFE", DATA_START, DATA_DAYS, 50.0)),
    )
}

fn monthly_daily_basis(top_k: usize) -> RotationConfig {
    RotationConfig {
        frequency: Frequency::Monthly,
        ma_window: 20,
        basis: SignalBasis::Daily,
        top_k,
    }
}

mod config_loading {
    use super::*;

    #[test]
    fn data_and_universe_settings_from_ini() {
        let adapter = FileConfigAdapter::from_string(
            "[data]\ndirectory = /var/prices\nstart_date = 2024-01-01\nend_date = 2024-06-30\n\
             [universe]\nmetadata = universe.csv\nbenchmark = EUNL.DE\n",
        )
        .unwrap();

        let data = data_settings(&adapter).unwrap();
        assert_eq!(data.directory, PathBuf::from("/var/prices"));
        assert_eq!(data.fetch_start(), date("2023-08-04"));
        assert_eq!(data.cache_ttl, Duration::from_secs(86_400));

        let universe = universe_settings(&adapter).unwrap();
        assert_eq!(universe.benchmark, "EUNL.DE");
        assert_eq!(universe.driver_a, "HG=F");
        assert_eq!(universe.driver_b, "GC=F");
    }

    #[test]
    fn missing_config_file_is_config_error() {
        let result = cli::load_config(std::path::Path::new("/nonexistent/rotator.ini"));
        assert_eq!(result.err(), Some(ExitCode::from(2)));
    }
}

mod universe {
    use super::*;
    use rotator::domain::config_validation::UniverseSettings;

    fn settings() -> UniverseSettings {
        UniverseSettings {
            metadata: PathBuf::from("unused.csv"),
            benchmark: "BENCH".to_string(),
            driver_a: "HG=F".to_string(),
            driver_b: "GC=F".to_string(),
        }
    }

    #[test]
    fn reserved_ids_are_not_instruments() {
        let port = MockMetadataPort::new(vec![
            meta("BENCH", None),
            meta("TECH", Some(Regime::Cyclical)),
            meta("HG=F", None),
            meta("UTIL", Some(Regime::Defensive)),
        ]);
        let universe = cli::build_universe(&port, &settings()).unwrap();

        assert_eq!(universe.instrument_ids(), vec!["TECH", "UTIL"]);
        assert_eq!(universe.fetch_ids(), vec!["TECH", "UTIL", "BENCH", "HG=F", "GC=F"]);
    }

    #[test]
    fn codes_override_restricts_in_metadata_order() {
        let universe = context(rotation_universe()).universe;
        let restricted = cli::restrict_universe(universe, Some("safe, fast,UNKNOWN")).unwrap();

        assert_eq!(restricted.instrument_ids(), vec!["FAST", "SAFE"]);
        assert_eq!(restricted.benchmark, "BENCH");
    }

    #[test]
    fn codes_override_errors() {
        let universe = context(rotation_universe()).universe;
        assert_eq!(
            cli::restrict_universe(universe.clone(), None).unwrap().count(),
            4
        );

        let err = cli::restrict_universe(universe.clone(), Some("FAST,,SAFE")).unwrap_err();
        assert!(matches!(err, RotatorError::ConfigInvalid { key, .. } if key == "codes"));

        let err = cli::restrict_universe(universe, Some("NOPE")).unwrap_err();
        assert!(matches!(err, RotatorError::Data { .. }));
    }

    #[test]
    fn universe_without_instruments_is_rejected() {
        let port = MockMetadataPort::new(vec![meta("BENCH", None)]);
        let err = cli::build_universe(&port, &settings()).unwrap_err();
        assert!(matches!(err, RotatorError::Data { .. }));
    }
}

mod rrg_pipeline {
    use super::*;

    #[test]
    fn flat_universe_scores_five() {
        let ctx = context(vec![meta("FLAT", None)]);
        let prices = MockPricePort::new()
            .with_series(flat_series("BENCH", DATA_START, DATA_DAYS, 100.0))
            .with_series(flat_series("FLAT", DATA_START, DATA_DAYS, 100.0));

        let snaps = cli::run_rrg_pipeline(&prices, &ctx, &RrgConfig::default()).unwrap();

        assert_eq!(snaps.len(), 1);
        assert_relative_eq!(snaps[0].score.unwrap(), 5.0, epsilon = 1e-9);
        assert_eq!(snaps[0].quadrant, Some(Quadrant::Leading));
        assert_eq!(snaps[0].daily_return, Some(0.0));
        assert_eq!(snaps[0].three_month_return, Some(0.0));
    }

    #[test]
    fn benchmark_copy_sits_at_origin() {
        let ctx = context(vec![meta("COPY", None)]);
        let path = |i: usize| 100.0 * 1.0005f64.powi(i as i32) + (i as f64 / 9.0).sin();
        let prices = MockPricePort::new()
            .with_series(daily_series("BENCH", DATA_START, DATA_DAYS, path))
            .with_series(daily_series("COPY", DATA_START, DATA_DAYS, path));

        let snaps = cli::run_rrg_pipeline(&prices, &ctx, &RrgConfig::default()).unwrap();

        assert_eq!(snaps[0].quadrant, Some(Quadrant::Leading));
        assert_relative_eq!(snaps[0].trend_strength.unwrap(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(snaps[0].momentum.unwrap(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(snaps[0].score.unwrap(), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn ranking_puts_outperformer_first_and_missing_last() {
        let ctx = context(vec![meta("GONE", None), meta("LAG", None), meta("LEAD", None)]);
        let prices = MockPricePort::new()
            .with_series(flat_series("BENCH", DATA_START, DATA_DAYS, 100.0))
            .with_series(daily_series("LEAD", DATA_START, DATA_DAYS, |i| 100.0 + 0.2 * i as f64))
            .with_series(daily_series("LAG", DATA_START, DATA_DAYS, |i| 200.0 - 0.2 * i as f64));

        let snaps = cli::run_rrg_pipeline(&prices, &ctx, &RrgConfig::default()).unwrap();

        let ids: Vec<&str> = snaps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["LEAD", "LAG", "GONE"]);
        assert!(snaps[0].score.unwrap() > snaps[1].score.unwrap());
        assert_eq!(snaps[2].score, None);
    }

    #[test]
    fn missing_benchmark_is_no_data() {
        let ctx = context(vec![meta("FLAT", None)]);
        let prices =
            MockPricePort::new().with_series(flat_series("FLAT", DATA_START, DATA_DAYS, 100.0));

        let err = cli::run_rrg_pipeline(&prices, &ctx, &RrgConfig::default()).unwrap_err();
        assert!(matches!(err, RotatorError::NoData { id } if id == "BENCH"));
    }

    #[test]
    fn source_failure_propagates() {
        let ctx = context(vec![meta("FLAT", None)]);
        let prices = MockPricePort::new().with_error("connection refused");

        let err = cli::run_rrg_pipeline(&prices, &ctx, &RrgConfig::default()).unwrap_err();
        assert!(matches!(err, RotatorError::Data { reason } if reason.contains("refused")));
    }
}

mod backtest_pipeline {
    use super::*;

    fn period_return(series: &PriceSeries, from: chrono::NaiveDate, to: chrono::NaiveDate) -> f64 {
        series.price_at(to).unwrap() / series.price_at(from).unwrap() - 1.0
    }

    #[test]
    fn top_one_holds_the_strongest_cyclical() {
        let ctx = context(rotation_universe());
        let ledger =
            cli::run_backtest_pipeline(&rotation_prices(), &ctx, &monthly_daily_basis(1)).unwrap();

        // July 2023 through September 2024
        assert_eq!(ledger.len(), 15);
        let fast = monthly_growth("FAST", 1.05);
        let bench = monthly_growth("BENCH", 1.01);
        for r in ledger.iter() {
            assert!(r.period_start >= date("2023-07-01"));
            assert_eq!(r.regime, Regime::Cyclical);
            assert_eq!(r.selected, vec!["FAST"]);
            assert_relative_eq!(
                r.strategy_return,
                period_return(&fast, r.period_start, r.period_end),
                epsilon = 1e-12
            );
            assert_relative_eq!(
                r.benchmark_return,
                period_return(&bench, r.period_start, r.period_end),
                epsilon = 1e-12
            );
            assert_relative_eq!(r.alpha, r.strategy_return - r.benchmark_return, epsilon = 1e-12);
        }
    }

    #[test]
    fn top_two_is_equal_weight() {
        let ctx = context(rotation_universe());
        let ledger =
            cli::run_backtest_pipeline(&rotation_prices(), &ctx, &monthly_daily_basis(2)).unwrap();

        let fast = monthly_growth("FAST", 1.05);
        let mid = monthly_growth("MID", 1.02);
        let r = &ledger.records[0];
        assert_eq!(r.selected, vec!["FAST", "MID"]);
        let expected = (period_return(&fast, r.period_start, r.period_end)
            + period_return(&mid, r.period_start, r.period_end))
            / 2.0;
        assert_relative_eq!(r.strategy_return, expected, epsilon = 1e-12);
    }

    #[test]
    fn falling_ratio_rotates_into_defensives() {
        let ctx = context(rotation_universe());
        let prices = falling_drivers(
            MockPricePort::new()
                .with_series(monthly_growth("BENCH", 1.01))
                .with_series(monthly_growth("FAST", 1.05))
                .with_series(flat_series("SAFE", DATA_START, DATA_DAYS, 50.0)),
        );

        let ledger = cli::run_backtest_pipeline(&prices, &ctx, &monthly_daily_basis(3)).unwrap();

        assert!(!ledger.is_empty());
        for r in ledger.iter() {
            assert_eq!(r.regime, Regime::Defensive);
            assert_eq!(r.selected, vec!["SAFE"]);
            assert_relative_eq!(r.strategy_return, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn holding_the_benchmark_has_zero_alpha() {
        let ctx = context(vec![meta("COPY", Some(Regime::Cyclical))]);
        let prices = rising_drivers(
            MockPricePort::new()
                .with_series(monthly_growth("BENCH", 1.03))
                .with_series(monthly_growth("COPY", 1.03)),
        );

        let ledger = cli::run_backtest_pipeline(&prices, &ctx, &monthly_daily_basis(3)).unwrap();

        assert!(!ledger.is_empty());
        for r in ledger.iter() {
            assert_relative_eq!(r.alpha, 0.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn short_panel_on_period_basis_yields_empty_ledger() {
        let ctx = context(rotation_universe());
        let config = RotationConfig {
            frequency: Frequency::Monthly,
            ma_window: 50,
            basis: SignalBasis::Period,
            top_k: 3,
        };

        let ledger = cli::run_backtest_pipeline(&rotation_prices(), &ctx, &config).unwrap();

        assert!(ledger.is_empty());
        assert!(LedgerSummary::compute(&ledger).is_none());
    }

    #[test]
    fn missing_driver_makes_backtest_unavailable() {
        let ctx = context(rotation_universe());
        let prices = MockPricePort::new()
            .with_series(monthly_growth("BENCH", 1.01))
            .with_series(monthly_growth("FAST", 1.05))
            .with_series(daily_series("HG=F", DATA_START, DATA_DAYS, |i| 3.0 + 0.001 * i as f64));

        let err = cli::run_backtest_pipeline(&prices, &ctx, &monthly_daily_basis(1)).unwrap_err();

        assert!(matches!(&err, RotatorError::MissingDriver { id } if id == "GC=F"));
        assert_eq!(ExitCode::from(&err), ExitCode::from(5));
    }

    #[test]
    fn later_prices_do_not_change_earlier_records() {
        let ctx = context(rotation_universe());
        let shock = date("2024-03-15");
        let shocked = |series: PriceSeries, factor: f64| {
            let pairs: Vec<_> = series
                .points()
                .iter()
                .map(|p| (p.date, if p.date >= shock { p.price * factor } else { p.price }))
                .collect();
            PriceSeries::from_pairs(series.id.clone(), &pairs)
        };
        let perturbed_prices = MockPricePort::new()
            .with_series(shocked(monthly_growth("BENCH", 1.01), 0.5))
            .with_series(shocked(flat_series("SLOW", DATA_START, DATA_DAYS, 100.0), 3.0))
            .with_series(monthly_growth("MID", 1.02))
            .with_series(shocked(monthly_growth("FAST", 1.05), 0.1))
            .with_series(flat_series("SAFE", DATA_START, DATA_DAYS, 50.0))
            .with_series(shocked(
                daily_series("HG=F", DATA_START, DATA_DAYS, |i| 3.0 + 0.001 * i as f64),
                0.2,
            ))
            .with_series(flat_series("GC=F", DATA_START, DATA_DAYS, 2000.0));
        let config = monthly_daily_basis(2);

        let baseline = cli::run_backtest_pipeline(&rotation_prices(), &ctx, &config).unwrap();
        let perturbed = cli::run_backtest_pipeline(&perturbed_prices, &ctx, &config).unwrap();

        let before: Vec<_> = baseline.iter().filter(|r| r.period_end < shock).collect();
        let after: Vec<_> = perturbed.iter().filter(|r| r.period_end < shock).collect();
        assert!(!before.is_empty());
        assert_eq!(before, after);
        assert_ne!(baseline, perturbed);
    }
}

mod shared_fetch {
    use super::*;

    fn report_with_ttl(source: &MockPricePort, ttl: Duration) -> cli::Report {
        let ctx = context(rotation_universe());
        cli::with_price_cache(source, ttl, |prices| {
            cli::run_report_pipeline(prices, &ctx, &RrgConfig::default(), &monthly_daily_basis(1))
        })
        .unwrap()
    }

    #[test]
    fn report_reuses_the_cached_fetch() {
        let source = rotation_prices();
        let report = report_with_ttl(&source, Duration::from_secs(60));

        assert_eq!(source.calls.get(), 1);
        assert_eq!(report.snapshots.len(), 4);
        assert_eq!(report.ledger.len(), 15);
    }

    #[test]
    fn zero_ttl_fetches_again() {
        let source = rotation_prices();
        report_with_ttl(&source, Duration::ZERO);
        assert_eq!(source.calls.get(), 2);
    }

    #[test]
    fn cached_and_direct_runs_agree() {
        let ctx = context(rotation_universe());
        let direct = rotation_prices();
        let uncached = cli::run_report_pipeline(
            &direct,
            &ctx,
            &RrgConfig::default(),
            &monthly_daily_basis(1),
        )
        .unwrap();
        assert_eq!(direct.calls.get(), 2);

        let cached = report_with_ttl(&rotation_prices(), Duration::from_secs(60));
        assert_eq!(cached.snapshots, uncached.snapshots);
        assert_eq!(cached.ledger, uncached.ledger);
    }
}

mod end_to_end {
    use super::*;
    use tempfile::TempDir;

    struct Workspace {
        dir: TempDir,
    }

    impl Workspace {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let prices = dir.path().join("prices");
            fs::create_dir(&prices).unwrap();
            for series in rotation_prices().data.values() {
                write_price_csv(&prices, series);
            }
            write_metadata_csv(&dir.path().join("universe.csv"), &rotation_universe());
            Self { dir }
        }

        fn config(&self, extra: &str) -> PathBuf {
            let path = self.dir.path().join("rotator.ini");
            let content = format!(
                "[data]\n\
                 directory = {}\n\
                 start_date = 2023-07-01\n\
                 end_date = 2024-10-31\n\
                 \n\
                 [universe]\n\
                 metadata = {}\n\
                 benchmark = BENCH\n\
                 driver_a = HG=F\n\
                 driver_b = GC=F\n\
                 \n\
                 {extra}\n",
                self.dir.path().join("prices").display(),
                self.dir.path().join("universe.csv").display(),
            );
            fs::write(&path, content).unwrap();
            path
        }

        fn output(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }
    }

    fn run(args: &[&str]) -> ExitCode {
        let mut argv = vec!["rotator"];
        argv.extend_from_slice(args);
        cli::run(Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn rrg_writes_snapshot_csv() {
        let ws = Workspace::new();
        let config = ws.config("[rrg]\nfrequency = weekly\n");
        let out = ws.output("rrg.csv");

        let code = run(&["rrg", "-c", config.to_str().unwrap(), "-o", out.to_str().unwrap()]);

        assert_eq!(code, ExitCode::SUCCESS);
        let content = fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert!(lines[0].starts_with("id,name,sector,score,quadrant"));
        assert_eq!(lines.len(), 5);
        assert!(lines[1..].iter().all(|l| !l.split(',').nth(3).unwrap().is_empty()));
    }

    #[test]
    fn backtest_writes_ledger_csv() {
        let ws = Workspace::new();
        let config = ws.config(
            "[rotation]\nfrequency = monthly\nma_basis = daily\nma_window = 20\ntop_k = 1\n",
        );
        let out = ws.output("ledger.csv");

        let code = run(&[
            "backtest",
            "--config",
            config.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ]);

        assert_eq!(code, ExitCode::SUCCESS);
        let content = fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 16);
        assert!(lines[1].starts_with("2023-07-31,2023-08-31,Cyclical,FAST,"));
    }

    #[test]
    fn backtest_with_short_history_still_succeeds() {
        let ws = Workspace::new();
        let config = ws.config("[rotation]\nma_window = 50\n");
        let out = ws.output("ledger.csv");

        let code = run(&["backtest", "-c", config.to_str().unwrap(), "-o", out.to_str().unwrap()]);

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(fs::read_to_string(&out).unwrap().lines().count(), 1);
    }

    #[test]
    fn backtest_codes_limit_the_pools() {
        let ws = Workspace::new();
        let config = ws.config("[rotation]\nma_basis = daily\nma_window = 20\ntop_k = 1\n");
        let out = ws.output("ledger.csv");

        let code = run(&[
            "backtest",
            "-c",
            config.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--codes",
            "MID,SLOW,SAFE",
        ]);

        assert_eq!(code, ExitCode::SUCCESS);
        let content = fs::read_to_string(&out).unwrap();
        assert!(content.lines().skip(1).all(|l| l.split(',').nth(3) == Some("MID")));
    }

    #[test]
    fn report_writes_both_files() {
        let ws = Workspace::new();
        let config = ws.config("[rotation]\nma_basis = daily\nma_window = 20\ntop_k = 1\n");
        let rrg_out = ws.output("rrg.csv");
        let ledger_out = ws.output("ledger.csv");

        let code = run(&[
            "report",
            "-c",
            config.to_str().unwrap(),
            "--rrg-output",
            rrg_out.to_str().unwrap(),
            "--ledger-output",
            ledger_out.to_str().unwrap(),
        ]);

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(fs::read_to_string(&rrg_out).unwrap().lines().count(), 5);
        let ledger = fs::read_to_string(&ledger_out).unwrap();
        assert_eq!(ledger.lines().count(), 16);
    }

    #[test]
    fn lowercase_codes_select_instruments() {
        let ws = Workspace::new();
        let config = ws.config("[rotation]\nma_basis = daily\nma_window = 20\ntop_k = 1\n");
        let out = ws.output("ledger.csv");

        let code = run(&[
            "backtest",
            "-c",
            config.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--codes",
            "mid,safe",
        ]);

        assert_eq!(code, ExitCode::SUCCESS);
        let content = fs::read_to_string(&out).unwrap();
        assert!(content.lines().skip(1).all(|l| l.split(',').nth(3) == Some("MID")));
    }

    #[test]
    fn validate_accepts_good_config() {
        let ws = Workspace::new();
        let config = ws.config("");
        assert_eq!(run(&["validate", "-c", config.to_str().unwrap()]), ExitCode::SUCCESS);
    }

    #[test]
    fn validate_rejects_bad_weights() {
        let ws = Workspace::new();
        let config = ws.config("[rrg]\nweights = 0.5, 0.6\n");
        assert_eq!(run(&["validate", "-c", config.to_str().unwrap()]), ExitCode::from(2));
    }

    #[test]
    fn unknown_benchmark_file_exits_with_data_unavailable() {
        let ws = Workspace::new();
        let config = ws.config("");
        let content = fs::read_to_string(&config)
            .unwrap()
            .replace("benchmark = BENCH", "benchmark = NOPE");
        fs::write(&config, content).unwrap();

        assert_eq!(run(&["rrg", "-c", config.to_str().unwrap()]), ExitCode::from(5));
    }

    #[test]
    fn log_level_is_a_global_flag() {
        let cli =
            Cli::try_parse_from(["rotator", "validate", "-c", "x.ini", "--log-level", "debug"])
                .unwrap();
        assert_eq!(cli.log_level, "debug");
    }
}
