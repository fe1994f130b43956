//! Honoraraufstellung als Klartext zum Ausdrucken oder Einfügen in ein Angebot.

use crate::{
    error::Result,
    model::{FeeCalculationInput, FeeCalculationResult},
    money::{format_eur, format_percent},
    traits::WriteBreakdown,
};
use std::io::Write;

pub struct Text;

const LABEL_WIDTH: usize = 34;

impl WriteBreakdown for Text {
    fn write_breakdown<W: Write>(
        mut w: W,
        input: &FeeCalculationInput,
        result: &FeeCalculationResult,
    ) -> Result<()> {
        let lines = [
            ("Fachbereich".to_string(), input.discipline.title().to_string()),
            ("Honorarzone".to_string(), input.zone.roman().to_string()),
            ("Anrechenbare Kosten".to_string(), format_eur(&input.cost)),
            ("Grundhonorar (Mittelsatz, 100 %)".to_string(), format_eur(&result.base_fee)),
            (
                format!("Leistungsphasen ({})", format_percent(&result.selected_phase_percentage)),
                format_eur(&result.phase_fee),
            ),
            (
                format!("Umbauzuschlag ({})", format_percent(&input.conversion_surcharge_percent)),
                format_eur(&result.conversion_surcharge_amount),
            ),
            (
                format!(
                    "Instandhaltungszuschlag ({})",
                    format_percent(&input.maintenance_surcharge_percent)
                ),
                format_eur(&result.maintenance_surcharge_amount),
            ),
            ("Zwischensumme".to_string(), format_eur(&result.subtotal)),
            (
                format!("Nebenkosten ({})", format_percent(&input.incidental_costs_percent)),
                format_eur(&result.incidental_costs_amount),
            ),
            ("Honorar netto".to_string(), format_eur(&result.net_total)),
            (
                format!("MwSt ({})", format_percent(&input.tax_percent)),
                format_eur(&result.tax_amount),
            ),
            ("Honorar brutto".to_string(), format_eur(&result.gross_total)),
        ];

        for (label, value) in &lines {
            writeln!(w, "{label:<LABEL_WIDTH$} {value:>16}")?;
        }
        Ok(())
    }
}
