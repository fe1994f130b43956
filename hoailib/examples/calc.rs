use hoailib::{
    compute_fee_breakdown,
    formats::text::Text,
    model::{Discipline, FeeCalculationInput, Zone, DEFAULT_INCIDENTAL_COSTS_PERCENT, DEFAULT_TAX_PERCENT},
    phases::{selected_percentage, Phase},
    traits::WriteBreakdown,
};
use rust_decimal::Decimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Beispiel: Neubau, 500.000 € anrechenbare Kosten, Zone III, LP 1 bis 8
    let phases = &Phase::ALL[..8];
    let input = FeeCalculationInput::new(Discipline::Gebaeude, Decimal::from(500_000), Zone::III)
        .with_phase_percentage(selected_percentage(Discipline::Gebaeude, phases))
        .with_incidental_costs(DEFAULT_INCIDENTAL_COSTS_PERCENT)
        .with_tax(DEFAULT_TAX_PERCENT);

    let result = compute_fee_breakdown(&input)?;
    Text::write_breakdown(std::io::stdout(), &input, &result)?;
    Ok(())
}
