//! hoailib: Honorarberechnung nach HOAI (Honorartafeln, Interpolation, Honoraraufstellung)

pub mod breakdown;
pub mod error;
pub mod interpolate;
pub mod model;
pub mod money;
pub mod phases;
pub mod tables;
pub mod traits;

pub mod formats {
    pub mod csv;
    pub mod json;
    pub mod text;
}

pub use breakdown::{compute_fee_breakdown, FeeInterpolator};
pub use interpolate::interpolate_base_fee;
