//! Spreadsheet parsing and export formatting.

use chrono::{NaiveDate, NaiveDateTime};
use postal_pinger_bot::database::models::Registration;
use postal_pinger_bot::export::{write_flat_csv, write_grouped};
use postal_pinger_bot::fsa::Fsa;
use postal_pinger_bot::import::{parse_header, parse_row, parse_timestamp};

fn strings(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[test]
fn header_fsas_come_from_everything_after_the_date_column() {
    let fsas = parse_header(&strings(&["Date", "K1P", "m5v"])).expect("valid header");
    assert_eq!(fsas, vec![Fsa::parse("k1p").unwrap(), Fsa::parse("m5v").unwrap()]);
}

#[test]
fn one_bad_header_cell_fails_the_header() {
    assert!(parse_header(&strings(&["Date", "K1P", "not-an-fsa"])).is_err());
}

#[test]
fn timestamps_use_the_spreadsheet_format() {
    let ts = parse_timestamp("12/31/2020 23:59:59").expect("valid timestamp");
    assert_eq!(ts.to_string(), "2020-12-31 23:59:59");
    assert!(parse_timestamp("2020-12-31 23:59:59").is_err());
}

#[test]
fn rows_strip_the_at_sign_and_skip_bad_cells() {
    let fsas = vec![Fsa::parse("k1p").unwrap(), Fsa::parse("m5v").unwrap()];
    let row = strings(&[
        "12/31/2020 23:59:59",
        "@user1#1001",
        "user2#1002", // missing '@'
    ]);
    let (entries, skipped) = parse_row(&fsas, &row);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].fsa, fsas[0]);
    assert_eq!(entries[0].username.to_string(), "user1#1001");
    assert_eq!(skipped.len(), 1);
}

#[test]
fn rows_skip_empty_cells_and_columns_without_a_header() {
    let fsas = vec![Fsa::parse("k1p").unwrap()];
    let row = strings(&["12/31/2020 23:59:59", "", "@user1#1001"]);
    let (entries, skipped) = parse_row(&fsas, &row);
    assert!(entries.is_empty());
    // The extra column has no FSA to attach to.
    assert_eq!(skipped.len(), 1);
}

#[test]
fn rows_report_invalid_username_tokens() {
    let fsas = vec![Fsa::parse("k1p").unwrap()];
    let row = strings(&["12/31/2020 23:59:59", "@not a valid#token#1"]);
    let (entries, skipped) = parse_row(&fsas, &row);
    assert!(entries.is_empty());
    assert_eq!(skipped.len(), 1);
}

fn registration(username: &str, user_id: &str, fsa: &str, id: i64) -> Registration {
    Registration {
        username: username.to_string(),
        user_id: user_id.to_string(),
        fsa: fsa.to_string(),
        created_at: Some(sample_timestamp()),
        id,
    }
}

fn sample_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap()
}

#[test]
fn flat_csv_has_a_header_and_one_line_per_row() {
    let rows = vec![
        registration("user1#1001", "11", "k1p", 1),
        registration("user2#1002", "22", "m5v", 2),
    ];
    let mut out = Vec::new();
    write_flat_csv(&mut out, &rows).expect("csv write");
    let text = String::from_utf8(out).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "username,user_id,fsa,created_at,id");
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "user1#1001,11,k1p,2021-01-02 03:04:05,1");
}

#[test]
fn grouped_listing_sections_by_fsa_in_order() {
    let rows = vec![
        registration("user1#1001", "11", "k1p", 1),
        registration("user2#1002", "22", "k1p", 2),
        registration("user3#1003", "33", "m5v", 3),
    ];
    let mut out = Vec::new();
    write_grouped(&mut out, &rows).expect("grouped write");
    let text = String::from_utf8(out).expect("utf8");
    assert_eq!(
        text,
        "=== K1P ===\n@user1#1001\n@user2#1002\n=== M5V ===\n@user3#1003\n"
    );
}
