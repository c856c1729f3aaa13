use flighttrace_core::normalize::{canonicalize, normalize, REQUIRED_COLUMNS};
use flighttrace_core::{PipelineError, PipelineWarning};
use flighttrace_parser::RawTable;
use polars::prelude::*;

fn raw(df: DataFrame) -> RawTable {
    RawTable::new("CSV", df)
}

#[test]
fn navigation_export_headers_normalize() {
    let df = df![
        " Time " => ["09:36:14"],
        "Lattitude (deg)" => ["37.6"],
        "Longitude (deg)" => ["-122.3"],
        "Altitude (meters)" => ["4.5"],
        "Roll (deg)" => ["0.1"],
        "Pitch (deg)" => ["0.2"],
        "True Heading (deg)" => ["90"],
    ]
    .expect("df");

    let normalized = normalize(&raw(df)).expect("normalize");
    assert_eq!(
        normalized.df.get_column_names(),
        ["time", "latitude", "longitude", "altitude", "roll", "pitch", "heading"]
    );
    assert!(normalized.warnings.is_empty());
    assert_eq!(normalized.text_column("heading").expect("heading"), vec![Some("90")]);
}

#[test]
fn missing_altitude_is_reported() {
    let df = df![
        "time" => ["09:36:14"],
        "latitude" => ["37.6"],
        "longitude" => ["-122.3"],
    ]
    .expect("df");

    match normalize(&raw(df)) {
        Err(PipelineError::MissingColumns(missing)) => assert_eq!(missing, vec!["altitude"]),
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn every_missing_column_is_listed_in_required_order() {
    let df = df!["Roll (deg)" => ["1"], "other" => ["2"]].expect("df");

    match normalize(&raw(df)) {
        Err(PipelineError::MissingColumns(missing)) => {
            assert_eq!(missing, REQUIRED_COLUMNS.to_vec())
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn later_duplicate_after_canonicalization_is_dropped() {
    let df = df![
        "time" => ["09:36:14"],
        "latitude" => ["1"],
        "longitude" => ["2"],
        "Altitude (meters)" => ["3"],
        "ALTITUDE" => ["999"],
    ]
    .expect("df");

    let normalized = normalize(&raw(df)).expect("normalize");
    assert_eq!(normalized.df.width(), 4);
    assert_eq!(normalized.text_column("altitude").expect("altitude"), vec![Some("3")]);
    assert_eq!(
        normalized.warnings,
        vec![PipelineWarning::DuplicateColumn {
            source: "ALTITUDE".to_string(),
            canonical: "altitude".to_string(),
        }]
    );
}

#[test]
fn canonical_names_are_fixed_points() {
    for name in ["Altitude (meters)", "Lattitude (deg)", "a b (c) deg meters"] {
        let once = canonicalize(name);
        assert_eq!(canonicalize(&once), once);
    }
}
