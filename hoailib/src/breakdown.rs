//! Honoraraufstellung: Grundhonorar, Phasen, Zuschläge, Nebenkosten, MwSt.

use crate::{
    error::{HoaiError, Result},
    interpolate::interpolate_base_fee,
    model::{Discipline, FeeCalculationInput, FeeCalculationResult, FeeTable, Zone},
    tables,
};
use rust_decimal::Decimal;
use tracing::debug;

/// Rechnet mit genau einer Honorartafel.
#[derive(Debug, Clone)]
pub struct FeeInterpolator {
    table: FeeTable,
}

impl FeeInterpolator {
    pub fn new(table: FeeTable) -> Self {
        Self { table }
    }

    pub fn for_discipline(discipline: Discipline) -> Result<Self> {
        Ok(Self::new(tables::fee_table(discipline)?))
    }

    pub fn table(&self) -> &FeeTable {
        &self.table
    }

    /// Grundhonorar (100 %) nach Prüfung der Kosten.
    pub fn base_fee(&self, cost: Decimal, zone: Zone) -> Result<Decimal> {
        if cost.is_sign_negative() && !cost.is_zero() {
            return Err(HoaiError::InvalidInput(format!(
                "anrechenbare Kosten must not be negative: {cost}"
            )));
        }
        interpolate_base_fee(self.table.rows(), cost, zone)
    }

    pub fn breakdown(&self, input: &FeeCalculationInput) -> Result<FeeCalculationResult> {
        input.validate()?;

        let base_fee = interpolate_base_fee(self.table.rows(), input.cost, input.zone)?;
        let phase_fee = percent_of(base_fee, input.selected_phase_percentage)?;
        let conversion_surcharge_amount = percent_of(phase_fee, input.conversion_surcharge_percent)?;
        let maintenance_surcharge_amount =
            percent_of(phase_fee, input.maintenance_surcharge_percent)?;
        let subtotal = add(add(phase_fee, conversion_surcharge_amount)?, maintenance_surcharge_amount)?;
        let incidental_costs_amount = percent_of(subtotal, input.incidental_costs_percent)?;
        let net_total = add(subtotal, incidental_costs_amount)?;
        let tax_amount = percent_of(net_total, input.tax_percent)?;
        let gross_total = add(net_total, tax_amount)?;

        debug!(
            table = self.table.name(),
            cost = %input.cost,
            zone = %input.zone,
            %base_fee,
            %net_total,
            %gross_total,
            "fee breakdown"
        );

        Ok(FeeCalculationResult {
            base_fee,
            selected_phase_percentage: input.selected_phase_percentage,
            phase_fee,
            conversion_surcharge_amount,
            maintenance_surcharge_amount,
            subtotal,
            incidental_costs_amount,
            net_total,
            tax_amount,
            gross_total,
        })
    }
}

/// Aufstellung mit der mitgelieferten Tafel des gewählten Fachbereichs.
pub fn compute_fee_breakdown(input: &FeeCalculationInput) -> Result<FeeCalculationResult> {
    FeeInterpolator::for_discipline(input.discipline)?.breakdown(input)
}

fn percent_of(amount: Decimal, percent: Decimal) -> Result<Decimal> {
    amount
        .checked_mul(percent)
        .map(|v| v / Decimal::ONE_HUNDRED)
        .ok_or_else(|| overflow(amount))
}

fn add(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_add(b).ok_or_else(|| overflow(a))
}

fn overflow(amount: Decimal) -> HoaiError {
    HoaiError::InvalidInput(format!("amount out of range near {amount}"))
}
