//! Instrument metadata port.

use crate::domain::error::RotatorError;
use crate::domain::universe::InstrumentMeta;

pub trait MetadataPort {
    /// All instruments, in source order.
    fn instruments(&self) -> Result<Vec<InstrumentMeta>, RotatorError>;
}
