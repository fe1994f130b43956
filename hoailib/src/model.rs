//! Domänenmodell: Honorarzonen, Honorartafeln, Ein- und Ausgabe der Berechnung.

use crate::error::{HoaiError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Nebenkosten-Pauschale, wie sie das Formular vorbelegt.
pub const DEFAULT_INCIDENTAL_COSTS_PERCENT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Regelsteuersatz (MwSt).
pub const DEFAULT_TAX_PERCENT: Decimal = Decimal::from_parts(19, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Zone {
    I,
    II,
    III,
    IV,
    V,
}

impl Zone {
    pub const ALL: [Zone; 5] = [Zone::I, Zone::II, Zone::III, Zone::IV, Zone::V];

    /// Spaltenindex in der Honorartafel (0 für Zone I).
    pub fn index(self) -> usize {
        match self {
            Zone::I => 0,
            Zone::II => 1,
            Zone::III => 2,
            Zone::IV => 3,
            Zone::V => 4,
        }
    }

    pub fn roman(self) -> &'static str {
        match self {
            Zone::I => "I",
            Zone::II => "II",
            Zone::III => "III",
            Zone::IV => "IV",
            Zone::V => "V",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.roman())
    }
}

impl FromStr for Zone {
    type Err = HoaiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "I" | "1" => Ok(Zone::I),
            "II" | "2" => Ok(Zone::II),
            "III" | "3" => Ok(Zone::III),
            "IV" | "4" => Ok(Zone::IV),
            "V" | "5" => Ok(Zone::V),
            other => Err(HoaiError::InvalidInput(format!("unknown zone identifier: {other:?}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Discipline {
    /// Objektplanung Gebäude
    Gebaeude,
    /// Objektplanung Innenräume
    Innenraeume,
}

impl Discipline {
    pub const ALL: [Discipline; 2] = [Discipline::Gebaeude, Discipline::Innenraeume];

    pub fn key(self) -> &'static str {
        match self {
            Discipline::Gebaeude => "gebaeude",
            Discipline::Innenraeume => "innenraeume",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Discipline::Gebaeude => "Objektplanung Gebäude",
            Discipline::Innenraeume => "Objektplanung Innenräume",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Discipline {
    type Err = HoaiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gebaeude" | "gebäude" => Ok(Discipline::Gebaeude),
            "innenraeume" | "innenräume" => Ok(Discipline::Innenraeume),
            other => Err(HoaiError::InvalidInput(format!("unknown discipline: {other:?}"))),
        }
    }
}

/// Von-/Bis-Satz einer Zone an einer Tafelstufe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeeRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl FeeRange {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// Mittelsatz; `None`, wenn `min + max` den Wertebereich sprengt.
    pub fn midpoint(&self) -> Option<Decimal> {
        self.min.checked_add(self.max).map(|sum| sum / Decimal::TWO)
    }
}

/// Eine Zeile der Honorartafel: anrechenbare Kosten und je Zone ein Von-/Bis-Satz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeeTableRow {
    pub cost_threshold: Decimal,
    pub fees: [FeeRange; 5],
}

impl FeeTableRow {
    pub fn new(cost_threshold: Decimal, fees: [FeeRange; 5]) -> Self {
        Self { cost_threshold, fees }
    }

    pub fn fee(&self, zone: Zone) -> FeeRange {
        self.fees[zone.index()]
    }

    pub fn min_fee(&self, zone: Zone) -> Decimal {
        self.fee(zone).min
    }

    pub fn max_fee(&self, zone: Zone) -> Decimal {
        self.fee(zone).max
    }

    pub fn midpoint(&self, zone: Zone) -> Option<Decimal> {
        self.fee(zone).midpoint()
    }
}

/// Geprüfte Honorartafel; nur über [`FeeTable::new`] zu bauen.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeTable {
    name: String,
    edition: Option<String>,
    valid_from: Option<NaiveDate>,
    rows: Vec<FeeTableRow>,
}

impl FeeTable {
    /// Baut eine Tafel und prüft sie: nicht leer, Kosten aufsteigend, Sätze nicht
    /// negativ, `min <= max` je Zone und ein darstellbarer Mittelsatz.
    pub fn new(
        name: impl Into<String>,
        edition: Option<String>,
        valid_from: Option<NaiveDate>,
        rows: Vec<FeeTableRow>,
    ) -> Result<Self> {
        let table = Self {
            name: name.into(),
            edition,
            valid_from,
            rows,
        };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<()> {
        if self.rows.is_empty() {
            return Err(HoaiError::InvalidTable(format!("{}: no rows", self.name)));
        }
        let mut previous: Option<Decimal> = None;
        for row in &self.rows {
            if row.cost_threshold.is_sign_negative() {
                return Err(HoaiError::InvalidTable(format!(
                    "negative cost threshold {}",
                    row.cost_threshold
                )));
            }
            if let Some(prev) = previous {
                if row.cost_threshold < prev {
                    return Err(HoaiError::InvalidTable(format!(
                        "cost thresholds not ascending: {} after {}",
                        row.cost_threshold, prev
                    )));
                }
            }
            for zone in Zone::ALL {
                let range = row.fee(zone);
                if range.min < Decimal::ZERO {
                    return Err(HoaiError::InvalidTable(format!(
                        "zone {zone} at {}: negative fee {}",
                        row.cost_threshold, range.min
                    )));
                }
                if range.min > range.max {
                    return Err(HoaiError::InvalidTable(format!(
                        "zone {zone} at {}: min {} exceeds max {}",
                        row.cost_threshold, range.min, range.max
                    )));
                }
                if range.midpoint().is_none() {
                    return Err(HoaiError::InvalidTable(format!(
                        "zone {zone} at {}: fees {} and {} are out of range",
                        row.cost_threshold, range.min, range.max
                    )));
                }
            }
            previous = Some(row.cost_threshold);
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn edition(&self) -> Option<&str> {
        self.edition.as_deref()
    }

    pub fn valid_from(&self) -> Option<NaiveDate> {
        self.valid_from
    }

    pub fn rows(&self) -> &[FeeTableRow] {
        &self.rows
    }

    pub fn min_cost(&self) -> Decimal {
        self.rows.first().map(|r| r.cost_threshold).unwrap_or_default()
    }

    pub fn max_cost(&self) -> Decimal {
        self.rows.last().map(|r| r.cost_threshold).unwrap_or_default()
    }
}

/// Eingaben einer Berechnung; wird pro Klick auf „Berechnen" neu aufgebaut.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeeCalculationInput {
    pub discipline: Discipline,
    /// Anrechenbare Kosten.
    pub cost: Decimal,
    pub zone: Zone,
    pub selected_phase_percentage: Decimal,
    pub conversion_surcharge_percent: Decimal,
    pub maintenance_surcharge_percent: Decimal,
    pub incidental_costs_percent: Decimal,
    pub tax_percent: Decimal,
}

impl FeeCalculationInput {
    /// Volle Leistung (100 %), ohne Zuschläge, Nebenkosten und Steuer.
    pub fn new(discipline: Discipline, cost: Decimal, zone: Zone) -> Self {
        Self {
            discipline,
            cost,
            zone,
            selected_phase_percentage: Decimal::ONE_HUNDRED,
            conversion_surcharge_percent: Decimal::ZERO,
            maintenance_surcharge_percent: Decimal::ZERO,
            incidental_costs_percent: Decimal::ZERO,
            tax_percent: Decimal::ZERO,
        }
    }

    pub fn with_phase_percentage(mut self, percent: Decimal) -> Self {
        self.selected_phase_percentage = percent;
        self
    }

    pub fn with_conversion_surcharge(mut self, percent: Decimal) -> Self {
        self.conversion_surcharge_percent = percent;
        self
    }

    pub fn with_maintenance_surcharge(mut self, percent: Decimal) -> Self {
        self.maintenance_surcharge_percent = percent;
        self
    }

    pub fn with_incidental_costs(mut self, percent: Decimal) -> Self {
        self.incidental_costs_percent = percent;
        self
    }

    pub fn with_tax(mut self, percent: Decimal) -> Self {
        self.tax_percent = percent;
        self
    }

    /// Negative Kosten oder Prozentsätze werden abgewiesen; über 100 % wird nicht gekappt.
    pub fn validate(&self) -> Result<()> {
        if self.cost.is_sign_negative() && !self.cost.is_zero() {
            return Err(HoaiError::InvalidInput(format!(
                "anrechenbare Kosten must not be negative: {}",
                self.cost
            )));
        }
        let percents = [
            ("selected_phase_percentage", self.selected_phase_percentage),
            ("conversion_surcharge_percent", self.conversion_surcharge_percent),
            ("maintenance_surcharge_percent", self.maintenance_surcharge_percent),
            ("incidental_costs_percent", self.incidental_costs_percent),
            ("tax_percent", self.tax_percent),
        ];
        for (field, value) in percents {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(HoaiError::InvalidInput(format!(
                    "{field} must not be negative: {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Honoraraufstellung; nach der Berechnung unveränderlich.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeeCalculationResult {
    pub base_fee: Decimal,
    pub selected_phase_percentage: Decimal,
    pub phase_fee: Decimal,
    pub conversion_surcharge_amount: Decimal,
    pub maintenance_surcharge_amount: Decimal,
    pub subtotal: Decimal,
    pub incidental_costs_amount: Decimal,
    pub net_total: Decimal,
    pub tax_amount: Decimal,
    pub gross_total: Decimal,
}
