use hoailib::money::{format_eur, format_percent, parse_amount};
use rust_decimal_macros::dec;

#[test]
fn eur_formatting() {
    assert_eq!(format_eur(&dec!(57894.95775)), "57.894,96 €");
    assert_eq!(format_eur(&dec!(2316.725)), "2.316,73 €");
    assert_eq!(format_eur(&dec!(0)), "0,00 €");
    assert_eq!(format_eur(&dec!(999)), "999,00 €");
    assert_eq!(format_eur(&dec!(1000000)), "1.000.000,00 €");
    assert_eq!(format_eur(&dec!(-1234.5)), "-1.234,50 €");
}

#[test]
fn percent_formatting() {
    assert_eq!(format_percent(&dec!(19)), "19 %");
    assert_eq!(format_percent(&dec!(2.50)), "2,5 %");
}

#[test]
fn german_amounts() {
    assert_eq!(parse_amount("500000").expect("amount"), dec!(500000));
    assert_eq!(parse_amount("500.000").expect("amount"), dec!(500000));
    assert_eq!(parse_amount("500.000,50").expect("amount"), dec!(500000.50));
    assert_eq!(parse_amount("500000,5").expect("amount"), dec!(500000.5));
    assert_eq!(parse_amount("500000.5").expect("amount"), dec!(500000.5));
    assert_eq!(parse_amount(" 1.234.567 € ").expect("amount"), dec!(1234567));
    assert_eq!(parse_amount("2,5").expect("amount"), dec!(2.5));
    assert_eq!(parse_amount("19").expect("amount"), dec!(19));
}

#[test]
fn garbage_is_invalid_input() {
    for raw in ["", "abc", "12x", "€"] {
        let err = parse_amount(raw).unwrap_err();
        assert!(err.is_invalid_input(), "{raw:?}");
    }
}

#[test]
fn thousands_grouping_is_stable_across_calls_and_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                for _ in 0..250 {
                    assert_eq!(parse_amount("12.345.678").expect("amount"), dec!(12345678));
                    assert_eq!(parse_amount("-1.234").expect("amount"), dec!(-1234));
                    // keine Dreiergruppe: Dezimalpunkt
                    assert_eq!(parse_amount("1.23").expect("amount"), dec!(1.23));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker thread");
    }
}
