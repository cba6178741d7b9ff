//! CSV report adapter implementing ReportPort.

use crate::domain::backtest::BacktestLedger;
use crate::domain::error::RotatorError;
use crate::domain::metrics::equity_curve;
use crate::domain::snapshot::InstrumentSnapshot;
use crate::ports::report_port::ReportPort;
use std::path::Path;
use tracing::info;

const LEDGER_HEADER: [&str; 9] = [
    "period_start",
    "period_end",
    "regime",
    "selected",
    "strategy_return",
    "benchmark_return",
    "alpha",
    "strategy_index",
    "benchmark_index",
];

const SNAPSHOT_HEADER: [&str; 9] = [
    "id",
    "name",
    "sector",
    "score",
    "quadrant",
    "trend_strength",
    "momentum",
    "daily_return",
    "three_month_return",
];

pub struct CsvReportAdapter;

fn csv_error(path: &Path, e: csv::Error) -> RotatorError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => RotatorError::Io(io),
        other => RotatorError::Data {
            reason: format!("{}: CSV write error: {:?}", path.display(), other),
        },
    }
}

fn opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl ReportPort for CsvReportAdapter {
    fn write_ledger(
        &self,
        ledger: &BacktestLedger,
        output_path: &Path,
    ) -> Result<(), RotatorError> {
        let mut wtr = csv::Writer::from_path(output_path).map_err(|e| csv_error(output_path, e))?;
        wtr.write_record(LEDGER_HEADER)
            .map_err(|e| csv_error(output_path, e))?;

        for (record, point) in ledger.iter().zip(equity_curve(ledger)) {
            wtr.write_record([
                record.period_start.to_string(),
                record.period_end.to_string(),
                record.regime.to_string(),
                record.selected.join(";"),
                record.strategy_return.to_string(),
                record.benchmark_return.to_string(),
                record.alpha.to_string(),
                point.strategy_index.to_string(),
                point.benchmark_index.to_string(),
            ])
            .map_err(|e| csv_error(output_path, e))?;
        }

        wtr.flush()?;
        info!(path = %output_path.display(), rows = ledger.len(), "ledger written");
        Ok(())
    }

    fn write_snapshots(
        &self,
        snapshots: &[InstrumentSnapshot],
        output_path: &Path,
    ) -> Result<(), RotatorError> {
        let mut wtr = csv::Writer::from_path(output_path).map_err(|e| csv_error(output_path, e))?;
        wtr.write_record(SNAPSHOT_HEADER)
            .map_err(|e| csv_error(output_path, e))?;

        for s in snapshots {
            wtr.write_record([
                s.id.clone(),
                s.name.clone(),
                s.sector.clone(),
                opt(s.score),
                s.quadrant.map(|q| q.to_string()).unwrap_or_default(),
                opt(s.trend_strength),
                opt(s.momentum),
                opt(s.daily_return),
                opt(s.three_month_return),
            ])
            .map_err(|e| csv_error(output_path, e))?;
        }

        wtr.flush()?;
        info!(path = %output_path.display(), rows = snapshots.len(), "snapshot written");
        Ok(())
    }
}
