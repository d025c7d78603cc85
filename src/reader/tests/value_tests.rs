//! Tests for named value access and type coercion

use super::*;
use crate::Error;
use crate::constants::zero_date_time;
use chrono::{NaiveDate, Timelike};

#[test]
fn test_string_value_is_trimmed() {
    let reader = reader_at_first_record(TYPED, ReaderConfig::new(&[';']));
    assert_eq!(
        reader.get_string_value("String").unwrap(),
        Some("This is a test")
    );
}

#[test]
fn test_empty_value_stays_empty_by_default() {
    let reader = reader_at_first_record(TYPED, ReaderConfig::new(&[';']));
    assert_eq!(reader.get_string_value("Empty").unwrap(), Some(""));
}

#[test]
fn test_empty_value_converted_to_null() {
    let config = ReaderConfig::new(&[';']).with_convert_empty_string_to_null(true);
    let reader = reader_at_first_record(TYPED, config);

    assert_eq!(reader.get_string_value("Empty").unwrap(), None);
    assert_eq!(
        reader.get_string_value("String").unwrap(),
        Some("This is a test")
    );
}

#[test]
fn test_keys_not_read_before_load() {
    let reader = buffer_reader(PEOPLE);
    assert!(matches!(
        reader.get_string_value("Name"),
        Err(Error::KeysNotRead)
    ));
}

#[test]
fn test_values_not_read_before_read_line() {
    let mut reader = buffer_reader(PEOPLE);
    reader.load().unwrap();
    assert!(matches!(
        reader.get_string_value("Name"),
        Err(Error::ValuesNotRead)
    ));
    assert!(matches!(
        reader.get_bool_value("IsMarried"),
        Err(Error::ValuesNotRead)
    ));
}

#[test]
fn test_unknown_key_reports_key() {
    let reader = reader_at_first_record(PEOPLE, ReaderConfig::new(&[';']));

    match reader.get_string_value("Surname") {
        Err(Error::KeyNotFound { key }) => assert_eq!(key, "Surname"),
        other => panic!("expected key not found, got {:?}", other),
    }
    assert!(matches!(
        reader.get_date_time_value("Surname", "yyyy"),
        Err(Error::KeyNotFound { .. })
    ));
}

#[test]
fn test_key_lookup_is_exact() {
    let reader = reader_at_first_record(PEOPLE, ReaderConfig::new(&[';']));
    assert!(matches!(
        reader.get_string_value("name"),
        Err(Error::KeyNotFound { .. })
    ));
}

#[test]
fn test_bool_value_is_case_insensitive() {
    let content = "A;B;C;D\ntrue;FALSE;True;fAlSe\n";
    let reader = reader_at_first_record(content, ReaderConfig::new(&[';']));

    assert!(reader.get_bool_value("A").unwrap());
    assert!(!reader.get_bool_value("B").unwrap());
    assert!(reader.get_bool_value("C").unwrap());
    assert!(!reader.get_bool_value("D").unwrap());
}

#[test]
fn test_bool_value_falls_back_to_false() {
    let config = ReaderConfig::new(&[';']).with_convert_empty_string_to_null(true);
    let reader = reader_at_first_record(TYPED, config);

    assert!(!reader.get_bool_value("Junk").unwrap());
    assert!(!reader.get_bool_value("Int").unwrap());
    assert!(!reader.get_bool_value("Empty").unwrap());
    assert!(reader.get_bool_value("Bool").unwrap());
}

#[test]
fn test_date_time_value_parses_format() {
    let reader = reader_at_first_record(TYPED, ReaderConfig::new(&[';']));
    let date = reader.get_date_time_value("Date", "yyyy-MM-dd").unwrap();

    assert_eq!(date.date(), NaiveDate::from_ymd_opt(1975, 1, 23).unwrap());
    assert_eq!(date.hour(), 0);
}

#[test]
fn test_date_time_value_falls_back_to_zero_date() {
    let reader = reader_at_first_record(TYPED, ReaderConfig::new(&[';']));

    assert_eq!(
        reader.get_date_time_value("Junk", "yyyy-MM-dd").unwrap(),
        zero_date_time()
    );
    // Right text, wrong format
    assert_eq!(
        reader.get_date_time_value("Date", "dd/MM/yyyy").unwrap(),
        zero_date_time()
    );
}

#[test]
fn test_date_time_value_with_time() {
    let content = "When\n23.01.1975 14:05:09\n";
    let reader = reader_at_first_record(content, ReaderConfig::new(&[';']));
    let when = reader
        .get_date_time_value("When", "dd.MM.yyyy HH:mm:ss")
        .unwrap();

    assert_eq!(
        when,
        NaiveDate::from_ymd_opt(1975, 1, 23)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    );
}

#[test]
fn test_date_time_value_with_short_fraction_and_bare_hour() {
    let content = "Stamp;Hour\n23.01.1975 14:05:09.25;13\n";
    let reader = reader_at_first_record(content, ReaderConfig::new(&[';']));

    let stamp = reader
        .get_date_time_value("Stamp", "dd.MM.yyyy HH:mm:ss.ff")
        .unwrap();
    assert_eq!(
        stamp,
        NaiveDate::from_ymd_opt(1975, 1, 23)
            .unwrap()
            .and_hms_milli_opt(14, 5, 9, 250)
            .unwrap()
    );

    let hour = reader.get_date_time_value("Hour", "HH").unwrap();
    assert_eq!(hour.date(), zero_date_time().date());
    assert_eq!(hour.hour(), 13);
}

#[test]
fn test_numeric_values() {
    let reader = reader_at_first_record(TYPED, ReaderConfig::new(&[';']));

    assert_eq!(reader.get_i64_value("Int").unwrap(), 42);
    assert_eq!(reader.get_f64_value("Float").unwrap(), 2.5);
    assert_eq!(reader.get_i64_value("Junk").unwrap(), 0);
    assert_eq!(reader.get_f64_value("Junk").unwrap(), 0.0);
    assert_eq!(reader.get_i64_value("Float").unwrap(), 0);
}

#[test]
fn test_parse_value_is_strict() {
    let config = ReaderConfig::new(&[';']).with_convert_empty_string_to_null(true);
    let reader = reader_at_first_record(TYPED, config);

    assert_eq!(reader.parse_value::<u32>("Int").unwrap(), Some(42));
    assert_eq!(reader.parse_value::<bool>("Empty").unwrap(), None);

    match reader.parse_value::<i32>("Junk") {
        Err(Error::ValueParse { key, value, .. }) => {
            assert_eq!(key, "Junk");
            assert_eq!(value, "abc");
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_record_snapshot() {
    let config = ReaderConfig::new(&[';']).with_convert_empty_string_to_null(true);
    let reader = reader_at_first_record("A;B;C\n x ;;z\n", config);

    assert_eq!(
        reader.record().unwrap(),
        vec![("A", Some("x")), ("B", None), ("C", Some("z"))]
    );
}
