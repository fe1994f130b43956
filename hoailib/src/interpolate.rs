//! Lineare Interpolation der Honorartafel (Mittelsatz je Zone).

use crate::{
    error::{HoaiError, Result},
    model::{FeeTableRow, Zone},
};
use rust_decimal::Decimal;
use tracing::debug;

/// Honorar für 100 % der Leistung bei `cost` anrechenbaren Kosten in `zone`.
///
/// Zwischen zwei Tafelstufen wird linear interpoliert. Unterhalb der kleinsten Stufe
/// gilt deren Mittelsatz, oberhalb der größten wird die Gerade der letzten beiden
/// Stufen fortgeschrieben. Die Kosten werden hier nicht geprüft, das übernimmt
/// [`crate::breakdown::FeeInterpolator`].
pub fn interpolate_base_fee(rows: &[FeeTableRow], cost: Decimal, zone: Zone) -> Result<Decimal> {
    let (lower, upper) = segment(rows, cost)?;

    let mid_lower = midpoint(lower, zone)?;
    let mid_upper = midpoint(upper, zone)?;

    if lower.cost_threshold == upper.cost_threshold {
        debug!(%cost, %zone, threshold = %lower.cost_threshold, "no interpolation");
        return Ok(mid_lower);
    }

    debug!(
        %cost,
        %zone,
        lower = %lower.cost_threshold,
        upper = %upper.cost_threshold,
        "interpolating fee"
    );
    let span = upper.cost_threshold.checked_sub(lower.cost_threshold).ok_or_else(|| {
        HoaiError::InvalidTable(format!(
            "segment {}..{} is out of range",
            lower.cost_threshold, upper.cost_threshold
        ))
    })?;
    let rise = mid_upper.checked_sub(mid_lower).ok_or_else(|| {
        HoaiError::InvalidTable(format!(
            "zone {zone} at {}: fee step is out of range",
            upper.cost_threshold
        ))
    })?;
    // erst multiplizieren, dann teilen: Tafeltreffer bleiben exakt
    cost.checked_sub(lower.cost_threshold)
        .and_then(|offset| rise.checked_mul(offset))
        .and_then(|scaled| scaled.checked_div(span))
        .and_then(|delta| mid_lower.checked_add(delta))
        .ok_or_else(|| HoaiError::InvalidInput(format!("cost {cost} is out of range")))
}

fn midpoint(row: &FeeTableRow, zone: Zone) -> Result<Decimal> {
    row.midpoint(zone).ok_or_else(|| {
        HoaiError::InvalidTable(format!(
            "zone {zone} at {}: fees are out of range",
            row.cost_threshold
        ))
    })
}

fn segment(rows: &[FeeTableRow], cost: Decimal) -> Result<(&FeeTableRow, &FeeTableRow)> {
    let first = rows
        .first()
        .ok_or_else(|| HoaiError::InvalidTable("fee table has no rows".into()))?;

    match rows.iter().position(|r| cost <= r.cost_threshold) {
        Some(0) => Ok((first, first)),
        Some(i) => Ok((&rows[i - 1], &rows[i])),
        // über der Tafel: letzte Stufe fortschreiben
        None => match rows {
            [.., lower, upper] => Ok((lower, upper)),
            _ => Ok((first, first)),
        },
    }
}
