//! Leistungsphasen 1 bis 9 und ihre Bewertung in Prozent des Gesamthonorars.

use crate::{
    error::{HoaiError, Result},
    model::Discipline,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    Lp1,
    Lp2,
    Lp3,
    Lp4,
    Lp5,
    Lp6,
    Lp7,
    Lp8,
    Lp9,
}

impl Phase {
    pub const ALL: [Phase; 9] = [
        Phase::Lp1,
        Phase::Lp2,
        Phase::Lp3,
        Phase::Lp4,
        Phase::Lp5,
        Phase::Lp6,
        Phase::Lp7,
        Phase::Lp8,
        Phase::Lp9,
    ];

    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_number(n: u8) -> Option<Phase> {
        match n {
            1..=9 => Some(Self::ALL[usize::from(n - 1)]),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Lp1 => "Grundlagenermittlung",
            Phase::Lp2 => "Vorplanung",
            Phase::Lp3 => "Entwurfsplanung",
            Phase::Lp4 => "Genehmigungsplanung",
            Phase::Lp5 => "Ausführungsplanung",
            Phase::Lp6 => "Vorbereitung der Vergabe",
            Phase::Lp7 => "Mitwirkung bei der Vergabe",
            Phase::Lp8 => "Objektüberwachung",
            Phase::Lp9 => "Objektbetreuung",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LP{} {}", self.number(), self.name())
    }
}

// Gebäude: §34 Abs. 3, Innenräume: §34 Abs. 4 HOAI.
const GEBAEUDE_WEIGHTS: [u32; 9] = [2, 7, 15, 3, 25, 10, 4, 32, 2];
const INNENRAEUME_WEIGHTS: [u32; 9] = [2, 7, 15, 2, 30, 7, 3, 32, 2];

/// Anteil einer Leistungsphase am Gesamthonorar in Prozent.
pub fn phase_percentage(discipline: Discipline, phase: Phase) -> Decimal {
    let weights = match discipline {
        Discipline::Gebaeude => &GEBAEUDE_WEIGHTS,
        Discipline::Innenraeume => &INNENRAEUME_WEIGHTS,
    };
    Decimal::from(weights[usize::from(phase.number() - 1)])
}

/// Summe der Anteile der gewählten Phasen; doppelt gewählte Phasen zählen einmal.
pub fn selected_percentage(discipline: Discipline, phases: &[Phase]) -> Decimal {
    let mut seen = [false; 9];
    let mut total = Decimal::ZERO;
    for &phase in phases {
        let idx = usize::from(phase.number() - 1);
        if !seen[idx] {
            seen[idx] = true;
            total += phase_percentage(discipline, phase);
        }
    }
    total
}

/// Liest eine Auswahl wie `1-3,5,8` (Zahlen und geschlossene Bereiche, kommagetrennt).
///
/// Ergebnis ist aufsteigend sortiert und ohne Dubletten.
pub fn parse_phase_selection(s: &str) -> Result<Vec<Phase>> {
    let mut phases = Vec::new();
    for part in s.split(',').map(str::trim) {
        if part.is_empty() {
            return Err(HoaiError::InvalidInput(format!("empty phase selection in {s:?}")));
        }
        match part.split_once('-') {
            Some((from, to)) => {
                let from = parse_phase_number(from)?;
                let to = parse_phase_number(to)?;
                if from > to {
                    return Err(HoaiError::InvalidInput(format!(
                        "phase range {part:?} runs backwards"
                    )));
                }
                phases.extend(Phase::ALL.iter().copied().filter(|p| *p >= from && *p <= to));
            }
            None => phases.push(parse_phase_number(part)?),
        }
    }
    phases.sort();
    phases.dedup();
    Ok(phases)
}

fn parse_phase_number(s: &str) -> Result<Phase> {
    let s = s.trim();
    let digits = s
        .strip_prefix("LP")
        .or_else(|| s.strip_prefix("lp"))
        .unwrap_or(s);
    digits
        .parse::<u8>()
        .ok()
        .and_then(Phase::from_number)
        .ok_or_else(|| HoaiError::InvalidInput(format!("unknown Leistungsphase {s:?}")))
}
