//! Honorartafel als CSV, Kopfzeile:
//! cost_threshold,zone_i_min,zone_i_max,zone_ii_min,...,zone_v_max[,table_name,edition]
//!
//! Name und Ausgabe werden aus der ersten Zeile übernommen, die sie enthält.

use crate::{
    error::{HoaiError, Result},
    model::{FeeCalculationInput, FeeCalculationResult, FeeRange, FeeTable, FeeTableRow},
    traits::{ReadTable, WriteBreakdown, WriteTable},
};
use csv::{ReaderBuilder, WriterBuilder};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use tracing::info;

pub const DEFAULT_TABLE_NAME: &str = "CSV-Honorartafel";

#[derive(serde::Deserialize)]
struct CsvRow {
    cost_threshold: String,
    zone_i_min: String,
    zone_i_max: String,
    zone_ii_min: String,
    zone_ii_max: String,
    zone_iii_min: String,
    zone_iii_max: String,
    zone_iv_min: String,
    zone_iv_max: String,
    zone_v_min: String,
    zone_v_max: String,

    table_name: Option<String>,
    edition: Option<String>,
}

#[derive(serde::Serialize)]
struct CsvOutRow<'a> {
    cost_threshold: String,
    zone_i_min: String,
    zone_i_max: String,
    zone_ii_min: String,
    zone_ii_max: String,
    zone_iii_min: String,
    zone_iii_max: String,
    zone_iv_min: String,
    zone_iv_max: String,
    zone_v_min: String,
    zone_v_max: String,

    table_name: &'a str,
    edition: Option<&'a str>,
}

#[derive(serde::Serialize)]
struct CsvBreakdownRow {
    discipline: &'static str,
    zone: &'static str,
    cost: String,
    base_fee: String,
    selected_phase_percentage: String,
    phase_fee: String,
    conversion_surcharge_amount: String,
    maintenance_surcharge_amount: String,
    subtotal: String,
    incidental_costs_amount: String,
    net_total: String,
    tax_amount: String,
    gross_total: String,
}

pub struct Csv;

fn parse_dec(field: &str, value: &str) -> Result<Decimal> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|e| HoaiError::Parse(format!("{field}: {e}")))
}

fn parse_range(zone: &str, min: &str, max: &str) -> Result<FeeRange> {
    Ok(FeeRange::new(
        parse_dec(&format!("{zone} min"), min)?,
        parse_dec(&format!("{zone} max"), max)?,
    ))
}

impl ReadTable for Csv {
    fn read<R: BufRead>(r: R) -> Result<FeeTable> {
        let mut rdr = ReaderBuilder::new().flexible(true).trim(csv::Trim::All).from_reader(r);
        let mut rows = Vec::new();
        let mut name: Option<String> = None;
        let mut edition: Option<String> = None;

        for rec in rdr.deserialize::<CsvRow>() {
            let row = rec?;
            if name.is_none() {
                name = row.table_name.clone().filter(|s| !s.is_empty());
            }
            if edition.is_none() {
                edition = row.edition.clone().filter(|s| !s.is_empty());
            }

            rows.push(FeeTableRow::new(
                parse_dec("cost_threshold", &row.cost_threshold)?,
                [
                    parse_range("zone I", &row.zone_i_min, &row.zone_i_max)?,
                    parse_range("zone II", &row.zone_ii_min, &row.zone_ii_max)?,
                    parse_range("zone III", &row.zone_iii_min, &row.zone_iii_max)?,
                    parse_range("zone IV", &row.zone_iv_min, &row.zone_iv_max)?,
                    parse_range("zone V", &row.zone_v_min, &row.zone_v_max)?,
                ],
            ));
        }

        let table = FeeTable::new(
            name.unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            edition,
            None,
            rows,
        )?;
        info!(table = table.name(), rows = table.rows().len(), format = "csv", "fee table loaded");
        Ok(table)
    }
}

impl WriteTable for Csv {
    fn write<W: Write>(mut w: W, table: &FeeTable) -> Result<()> {
        let mut wrt = WriterBuilder::new().from_writer(&mut w);

        for row in table.rows() {
            let [i, ii, iii, iv, v] = row.fees;
            let out = CsvOutRow {
                cost_threshold: row.cost_threshold.to_string(),
                zone_i_min: i.min.to_string(),
                zone_i_max: i.max.to_string(),
                zone_ii_min: ii.min.to_string(),
                zone_ii_max: ii.max.to_string(),
                zone_iii_min: iii.min.to_string(),
                zone_iii_max: iii.max.to_string(),
                zone_iv_min: iv.min.to_string(),
                zone_iv_max: iv.max.to_string(),
                zone_v_min: v.min.to_string(),
                zone_v_max: v.max.to_string(),
                table_name: table.name(),
                edition: table.edition(),
            };
            wrt.serialize(out)?;
        }
        wrt.flush()?;
        Ok(())
    }
}

impl WriteBreakdown for Csv {
    fn write_breakdown<W: Write>(
        mut w: W,
        input: &FeeCalculationInput,
        result: &FeeCalculationResult,
    ) -> Result<()> {
        let mut wrt = WriterBuilder::new().from_writer(&mut w);
        wrt.serialize(CsvBreakdownRow {
            discipline: input.discipline.key(),
            zone: input.zone.roman(),
            cost: input.cost.to_string(),
            base_fee: result.base_fee.to_string(),
            selected_phase_percentage: result.selected_phase_percentage.to_string(),
            phase_fee: result.phase_fee.to_string(),
            conversion_surcharge_amount: result.conversion_surcharge_amount.to_string(),
            maintenance_surcharge_amount: result.maintenance_surcharge_amount.to_string(),
            subtotal: result.subtotal.to_string(),
            incidental_costs_amount: result.incidental_costs_amount.to_string(),
            net_total: result.net_total.to_string(),
            tax_amount: result.tax_amount.to_string(),
            gross_total: result.gross_total.to_string(),
        })?;
        wrt.flush()?;
        Ok(())
    }
}
