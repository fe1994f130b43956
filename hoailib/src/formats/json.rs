//! Honorartafel als JSON: {"name", "edition", "valid_from", "rows": [{"cost_threshold", "fees": [...]}]}

use crate::{
    error::{HoaiError, Result},
    model::{FeeCalculationInput, FeeCalculationResult, FeeRange, FeeTable, FeeTableRow},
    traits::{ReadTable, WriteBreakdown, WriteTable},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use tracing::info;

#[derive(Serialize, Deserialize, Debug)]
struct JsonRange {
    #[serde(with = "rust_decimal::serde::str")]
    min: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    max: Decimal,
}

#[derive(Serialize, Deserialize, Debug)]
struct JsonRow {
    #[serde(with = "rust_decimal::serde::str")]
    cost_threshold: Decimal,
    /// Zonen I bis V in dieser Reihenfolge.
    fees: Vec<JsonRange>,
}

#[derive(Serialize, Deserialize, Debug)]
struct JsonTable {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    edition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    valid_from: Option<String>,
    rows: Vec<JsonRow>,
}

#[derive(Serialize)]
struct JsonBreakdown<'a> {
    input: &'a FeeCalculationInput,
    result: &'a FeeCalculationResult,
}

pub struct Json;

impl ReadTable for Json {
    fn read<R: BufRead>(r: R) -> Result<FeeTable> {
        let x: JsonTable = serde_json::from_reader(r)?;

        let valid_from = x
            .valid_from
            .map(|d| {
                NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                    .map_err(|e| HoaiError::Parse(format!("valid_from: {e}")))
            })
            .transpose()?;

        let mut rows = Vec::with_capacity(x.rows.len());
        for row in x.rows {
            let fees: [FeeRange; 5] = row
                .fees
                .into_iter()
                .map(|f| FeeRange::new(f.min, f.max))
                .collect::<Vec<_>>()
                .try_into()
                .map_err(|v: Vec<FeeRange>| {
                    HoaiError::Parse(format!(
                        "row {}: expected 5 zones, got {}",
                        row.cost_threshold,
                        v.len()
                    ))
                })?;
            rows.push(FeeTableRow::new(row.cost_threshold, fees));
        }

        let table = FeeTable::new(x.name, x.edition, valid_from, rows)?;
        info!(table = table.name(), rows = table.rows().len(), format = "json", "fee table loaded");
        Ok(table)
    }
}

impl WriteTable for Json {
    fn write<W: Write>(mut w: W, table: &FeeTable) -> Result<()> {
        let x = JsonTable {
            name: table.name().to_string(),
            edition: table.edition().map(str::to_string),
            valid_from: table.valid_from().map(|d| d.format("%Y-%m-%d").to_string()),
            rows: table
                .rows()
                .iter()
                .map(|r| JsonRow {
                    cost_threshold: r.cost_threshold,
                    fees: r
                        .fees
                        .iter()
                        .map(|f| JsonRange { min: f.min, max: f.max })
                        .collect(),
                })
                .collect(),
        };
        serde_json::to_writer_pretty(&mut w, &x)?;
        w.write_all(b"\n")?;
        Ok(())
    }
}

impl WriteBreakdown for Json {
    fn write_breakdown<W: Write>(
        mut w: W,
        input: &FeeCalculationInput,
        result: &FeeCalculationResult,
    ) -> Result<()> {
        serde_json::to_writer_pretty(&mut w, &JsonBreakdown { input, result })?;
        w.write_all(b"\n")?;
        Ok(())
    }
}
