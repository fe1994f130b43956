use hoailib::{
    error::HoaiError,
    formats::{csv::{Csv, DEFAULT_TABLE_NAME}, json::Json, text::Text},
    interpolate_base_fee,
    model::{Discipline, FeeCalculationInput, Zone},
    tables::fee_table,
    traits::{ReadTable, WriteBreakdown, WriteTable},
    FeeInterpolator,
};
use rust_decimal_macros::dec;
use std::io::{self, Cursor};
use std::sync::{Arc, Mutex};

const HEADER: &str = "cost_threshold,zone_i_min,zone_i_max,zone_ii_min,zone_ii_max,zone_iii_min,zone_iii_max,zone_iv_min,zone_iv_max,zone_v_min,zone_v_max";

#[test]
fn csv_read_custom_table() {
    let input = format!(
        "{HEADER},table_name,edition\n\
         100000,10,20,20,30,30,40,40,50,50,60,Testtafel,2024\n\
         200000,20,40,40,60,60,80,80,100,100,120,,\n"
    );
    let table = Csv::read(Cursor::new(input)).expect("read csv");
    assert_eq!(table.name(), "Testtafel");
    assert_eq!(table.edition(), Some("2024"));
    assert_eq!(table.rows().len(), 2);
    assert_eq!(table.min_cost(), dec!(100000));
    assert_eq!(table.max_cost(), dec!(200000));

    let fee = interpolate_base_fee(table.rows(), dec!(150000), Zone::III).expect("fee");
    assert_eq!(fee, dec!(52.5));
}

#[test]
fn csv_without_metadata_columns() {
    let input = format!("{HEADER}\n25000,1,2,2,3,3,4,4,5,5,6\n");
    let table = Csv::read(Cursor::new(input)).expect("read csv");
    assert_eq!(table.name(), DEFAULT_TABLE_NAME);
    assert_eq!(table.edition(), None);
}

#[test]
fn csv_rejects_descending_thresholds() {
    let input = format!(
        "{HEADER}\n\
         200000,1,2,2,3,3,4,4,5,5,6\n\
         100000,1,2,2,3,3,4,4,5,5,6\n"
    );
    let err = Csv::read(Cursor::new(input)).unwrap_err();
    assert!(matches!(err, HoaiError::InvalidTable(_)), "{err}");
}

#[test]
fn csv_rejects_min_above_max() {
    let input = format!("{HEADER}\n100000,1,2,2,3,9,4,4,5,5,6\n");
    let err = Csv::read(Cursor::new(input)).unwrap_err();
    assert!(matches!(err, HoaiError::InvalidTable(_)), "{err}");
}

#[test]
fn csv_rejects_bad_amount() {
    let input = format!("{HEADER}\n100000,1,2,2,3,3,4,4,5,5,sechs\n");
    let err = Csv::read(Cursor::new(input)).unwrap_err();
    assert!(matches!(err, HoaiError::Parse(_)), "{err}");
}

#[test]
fn empty_csv_is_invalid_table() {
    let err = Csv::read(Cursor::new(format!("{HEADER}\n"))).unwrap_err();
    assert!(matches!(err, HoaiError::InvalidTable(_)), "{err}");
}

#[test]
fn csv_export_loads_back_into_an_interpolator() {
    let builtin = fee_table(Discipline::Gebaeude).expect("builtin");
    let mut out = Vec::new();
    Csv::write(&mut out, &builtin).expect("write csv");

    let table = Csv::read(Cursor::new(out)).expect("read csv");
    assert_eq!(table.rows(), builtin.rows());
    assert_eq!(table.name(), builtin.name());

    let fee = FeeInterpolator::new(table).base_fee(dec!(500000), Zone::III).expect("fee");
    assert_eq!(fee, dec!(46334.5));
}

#[test]
fn json_write_then_read_back() {
    let builtin = fee_table(Discipline::Gebaeude).expect("builtin");
    let mut out = Vec::new();
    Json::write(&mut out, &builtin).expect("write json");

    let table = Json::read(Cursor::new(out)).expect("read json");
    assert_eq!(table, builtin);
    assert_eq!(table.valid_from().map(|d| d.to_string()), Some("2021-01-01".to_string()));
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn captured_info_logs(f: impl FnOnce()) -> String {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buf.0.lock().expect("log buffer").clone();
    String::from_utf8(bytes).expect("utf-8 log")
}

#[test]
fn readers_log_loaded_tables() {
    let csv = format!("{HEADER},table_name\n25000,1,2,2,3,3,4,4,5,5,6,Testtafel\n");
    let logs = captured_info_logs(|| {
        Csv::read(Cursor::new(csv)).expect("read csv");
    });
    assert!(logs.contains("fee table loaded"), "{logs}");
    assert!(logs.contains("Testtafel"), "{logs}");
    assert!(logs.contains("rows=1"), "{logs}");

    let mut json = Vec::new();
    Json::write(&mut json, &fee_table(Discipline::Gebaeude).expect("builtin")).expect("write json");
    let logs = captured_info_logs(|| {
        Json::read(Cursor::new(json)).expect("read json");
    });
    assert!(logs.contains("fee table loaded"), "{logs}");
    assert!(logs.contains("rows=18"), "{logs}");
}

#[test]
fn rejected_tables_are_not_logged_as_loaded() {
    let csv = format!("{HEADER}\n100000,1,2,2,3,9,4,4,5,5,6\n");
    let logs = captured_info_logs(|| {
        Csv::read(Cursor::new(csv)).unwrap_err();
    });
    assert!(!logs.contains("fee table loaded"), "{logs}");
}

#[test]
fn json_requires_five_zones() {
    let input = r#"{
        "name": "kaputt",
        "rows": [{"cost_threshold": "1000", "fees": [{"min": "1", "max": "2"}]}]
    }"#;
    let err = Json::read(Cursor::new(input)).unwrap_err();
    assert!(matches!(err, HoaiError::Parse(_)), "{err}");
}

#[test]
fn json_syntax_errors_surface() {
    let err = Json::read(Cursor::new("{ nope")).unwrap_err();
    assert!(matches!(err, HoaiError::Json(_)), "{err}");
}

fn example_breakdown() -> (FeeCalculationInput, hoailib::model::FeeCalculationResult) {
    let input = FeeCalculationInput::new(Discipline::Gebaeude, dec!(500000), Zone::III)
        .with_incidental_costs(dec!(5))
        .with_tax(dec!(19));
    let result = hoailib::compute_fee_breakdown(&input).expect("breakdown");
    (input, result)
}

#[test]
fn text_report_is_german() {
    let (input, result) = example_breakdown();
    let mut out = Vec::new();
    Text::write_breakdown(&mut out, &input, &result).expect("write text");
    let text = String::from_utf8(out).expect("utf8");

    assert!(text.contains("Honorarzone"));
    assert!(text.contains("500.000,00 €"));
    assert!(text.contains("46.334,50 €"));
    assert!(text.contains("Nebenkosten (5 %)"));
    assert!(text.contains("MwSt (19 %)"));
    let last = text.lines().last().expect("lines");
    assert!(last.starts_with("Honorar brutto"));
    assert!(last.ends_with("57.894,96 €"));
}

#[test]
fn json_report_carries_input_and_result() {
    let (input, result) = example_breakdown();
    let mut out = Vec::new();
    Json::write_breakdown(&mut out, &input, &result).expect("write json");

    let v: serde_json::Value = serde_json::from_slice(&out).expect("json");
    assert_eq!(v["input"]["zone"], "III");
    assert_eq!(v["result"]["gross_total"], "57894.95775");
}

#[test]
fn csv_report_is_one_row() {
    let (input, result) = example_breakdown();
    let mut out = Vec::new();
    Csv::write_breakdown(&mut out, &input, &result).expect("write csv");
    let text = String::from_utf8(out).expect("utf8");

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("discipline,zone,cost,base_fee"));
    assert!(lines[1].starts_with("gebaeude,III,500000,46334.5"));
    assert!(lines[1].ends_with("57894.95775"));
}
