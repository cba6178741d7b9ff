//! Report output port.

use crate::domain::backtest::BacktestLedger;
use crate::domain::error::RotatorError;
use crate::domain::snapshot::InstrumentSnapshot;
use std::path::Path;

pub trait ReportPort {
    fn write_ledger(&self, ledger: &BacktestLedger, output_path: &Path) -> Result<(), RotatorError>;

    fn write_snapshots(
        &self,
        snapshots: &[InstrumentSnapshot],
        output_path: &Path,
    ) -> Result<(), RotatorError>;
}
