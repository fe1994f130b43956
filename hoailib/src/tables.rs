//! Mitgelieferte Honorartafel zu §35 (Gebäude und Innenräume).

use crate::{
    error::Result,
    model::{Discipline, FeeRange, FeeTable, FeeTableRow},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub const TABLE_NAME: &str = "Honorartafel §35 Gebäude und Innenräume";
pub const TABLE_EDITION: &str = "HOAI 2021";

// anrechenbare Kosten, dann je Zone I..V die Grenzen; Zone n reicht von [n] bis [n+1]
const SECTION_35: [(i64, [i64; 6]); 18] = [
    (25_000, [2_611, 3_120, 3_669, 4_315, 4_861, 5_269]),
    (35_000, [3_439, 4_109, 4_832, 5_683, 6_402, 6_939]),
    (50_000, [4_604, 5_502, 6_470, 7_610, 8_572, 9_291]),
    (75_000, [6_416, 7_667, 9_016, 10_604, 11_945, 12_947]),
    (100_000, [8_119, 9_702, 11_409, 13_419, 15_116, 16_384]),
    (150_000, [11_314, 13_520, 15_898, 18_699, 21_064, 22_831]),
    (200_000, [14_317, 17_109, 20_118, 23_663, 26_655, 28_891]),
    (300_000, [19_950, 23_841, 28_034, 32_974, 37_144, 40_260]),
    (500_000, [30_304, 36_213, 42_583, 50_086, 56_420, 61_153]),
    (750_000, [42_228, 50_463, 59_339, 69_795, 78_621, 85_217]),
    (1_000_000, [53_438, 63_858, 75_090, 88_322, 99_490, 107_837]),
    (1_500_000, [74_465, 88_985, 104_638, 123_075, 138_638, 150_270]),
    (2_000_000, [94_231, 112_606, 132_413, 155_745, 175_439, 190_158]),
    (3_000_000, [131_310, 156_915, 184_517, 217_029, 244_473, 264_983]),
    (5_000_000, [199_456, 238_349, 280_275, 329_660, 371_346, 402_501]),
    (7_500_000, [277_939, 332_137, 390_560, 459_378, 517_467, 560_881]),
    (10_000_000, [351_717, 420_302, 494_232, 581_317, 654_826, 709_764]),
    (25_000_000, [744_468, 889_639, 1_046_126, 1_230_456, 1_386_050, 1_502_336]),
];

/// Honorartafel des Fachbereichs. Gebäude und Innenräume teilen sich §35.
pub fn fee_table(discipline: Discipline) -> Result<FeeTable> {
    match discipline {
        Discipline::Gebaeude | Discipline::Innenraeume => section_35(),
    }
}

fn section_35() -> Result<FeeTable> {
    let rows = SECTION_35
        .iter()
        .map(|(cost, bounds)| {
            let fees = [0, 1, 2, 3, 4]
                .map(|z| FeeRange::new(Decimal::from(bounds[z]), Decimal::from(bounds[z + 1])));
            FeeTableRow::new(Decimal::from(*cost), fees)
        })
        .collect();
    FeeTable::new(
        TABLE_NAME,
        Some(TABLE_EDITION.to_string()),
        NaiveDate::from_ymd_opt(2021, 1, 1),
        rows,
    )
}
