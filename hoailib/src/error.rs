//! Einheitlicher Fehlertyp der öffentlichen API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HoaiError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Eingabewerte einer Berechnung (Kosten, Zone, Prozentsätze, Phasen).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid fee table: {0}")]
    InvalidTable(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl HoaiError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, HoaiError::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, HoaiError>;
