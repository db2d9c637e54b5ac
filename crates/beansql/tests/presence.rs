//! Presence rule and literal rendering across scalar kinds.

use beansql::{
    Record, ScalarKind, SqlBuilder, Value, ZeroValues, build_select, build_update, present_fields,
};
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

#[derive(Debug, Default, Record)]
struct Measurement {
    id: u32,
    label: Option<String>,
    active: Option<bool>,
    flagged: bool,
    score: f64,
    ratio: f32,
    grade: char,
    taken_on: Option<NaiveDate>,
    taken_at: Option<NaiveDateTime>,
    batch: Option<Uuid>,
}

#[test]
fn default_record_keeps_only_plain_bool() {
    let m = Measurement::default();
    let present = present_fields(&m).unwrap();
    assert_eq!(present.names(), ["flagged"]);
    assert_eq!(present.get("flagged"), Some("false"));
}

#[test]
fn zero_numbers_and_nul_char_are_absent() {
    let m = Measurement {
        score: 0.0,
        ratio: -0.0,
        grade: '\0',
        ..Measurement::default()
    };
    let present = present_fields(&m).unwrap();
    assert!(!present.contains("score"));
    assert!(!present.contains("ratio"));
    assert!(!present.contains("grade"));
}

#[test]
fn non_numeric_values_are_quoted() {
    let batch = Uuid::nil();
    let m = Measurement {
        id: 9,
        label: Some("probe".into()),
        active: Some(true),
        flagged: true,
        score: 2.5,
        ratio: 0.5,
        grade: 'a',
        taken_on: NaiveDate::from_ymd_opt(2024, 3, 1),
        taken_at: None,
        batch: Some(batch),
    };
    assert_eq!(
        build_update(&m).unwrap(),
        format!(
            "update measurement set label='probe',active=true,flagged=true,score=2.5,ratio=0.5,\
             grade='a',taken_on='2024-03-01',batch='{batch}' where id=9"
        )
    );
}

#[test]
fn suppressing_false_booleans_is_opt_in() {
    let m = Measurement {
        label: Some("x".into()),
        active: Some(false),
        ..Measurement::default()
    };
    assert_eq!(
        build_select(&m).unwrap(),
        "select label,active,flagged from measurement where 1=1 and label='x' and active=false and flagged=false"
    );

    let builder = SqlBuilder::new()
        .zero_values(ZeroValues::standard().with_zero(ScalarKind::Bool, Value::Bool(false)));
    assert_eq!(
        builder.select(&m).unwrap().sql,
        "select label from measurement where 1=1 and label='x'"
    );
}

#[test]
fn describe_reports_every_field() {
    let m = Measurement {
        label: Some("x".into()),
        ..Measurement::default()
    };
    let fields = SqlBuilder::new().describe(&m).unwrap();
    assert_eq!(fields.len(), 10);
    let present: Vec<&str> = fields
        .iter()
        .filter(|f| f.present)
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(present, ["label", "flagged"]);
    assert!(fields[0].key);
    assert_eq!(fields[0].literal(), "0");
}
