//! Einheitliche Lese-/Schreib-Traits über std::io::{BufRead, Write}.

use crate::{
    error::Result,
    model::{FeeCalculationInput, FeeCalculationResult, FeeTable},
};
use std::io::{BufRead, Write};

pub trait ReadTable {
    fn read<R: BufRead>(r: R) -> Result<FeeTable>;
}

pub trait WriteTable {
    fn write<W: Write>(w: W, table: &FeeTable) -> Result<()>;
}

pub trait TableFormat: ReadTable + WriteTable {}
impl<T: ReadTable + WriteTable> TableFormat for T {}

/// Ausgabe einer Honoraraufstellung; die Eingabe liefert Beschriftungen (Zone, Kosten, Sätze).
pub trait WriteBreakdown {
    fn write_breakdown<W: Write>(
        w: W,
        input: &FeeCalculationInput,
        result: &FeeCalculationResult,
    ) -> Result<()>;
}
