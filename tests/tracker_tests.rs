//! Tracker invariants, exercised directly against the library DB API:
//! one open record per driver, contiguous intervals, rejection without
//! state change.

use chrono::{NaiveDate, NaiveDateTime};
use rhoslogger::core::change::ChangeLogic;
use rhoslogger::db::initialize::init_db;
use rhoslogger::db::pool::DbPool;
use rhoslogger::db::queries::{load_driver_records, load_open_record};
use rhoslogger::errors::AppError;
use rhoslogger::models::duty_status::DutyStatus;
use rhoslogger::models::geo::GeoPoint;
use rhoslogger::models::source::RecordSource;
use std::env;

fn ts(d: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, d)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn test_pool(name: &str) -> DbPool {
    let mut path = env::temp_dir();
    path.push(format!("{}_rhoslogger_tracker.sqlite", name));
    std::fs::remove_file(&path).ok();

    let pool = DbPool::new(&path.to_string_lossy()).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}

fn change(pool: &mut DbPool, status: DutyStatus, at: NaiveDateTime) -> Result<(), AppError> {
    ChangeLogic::apply(
        pool,
        "D001",
        status,
        at,
        GeoPoint::unknown(),
        RecordSource::Manual,
    )
    .map(|_| ())
}

#[test]
fn log_stays_contiguous_with_one_open_record() {
    let mut pool = test_pool("contiguous");

    change(&mut pool, DutyStatus::OnDutyNotDriving, ts(1, 6, 0)).unwrap();
    change(&mut pool, DutyStatus::Driving, ts(1, 6, 30)).unwrap();
    change(&mut pool, DutyStatus::OnDutyNotDriving, ts(1, 10, 0)).unwrap();
    change(&mut pool, DutyStatus::Driving, ts(1, 10, 45)).unwrap();
    change(&mut pool, DutyStatus::OffDuty, ts(1, 17, 0)).unwrap();

    let records = load_driver_records(&mut pool, "D001").unwrap();
    assert_eq!(records.len(), 5);

    // exactly one open record, and it is the last one
    let open: Vec<_> = records.iter().filter(|r| r.is_open()).collect();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].status, DutyStatus::OffDuty);

    // each record closes exactly where the next one starts
    for pair in records.windows(2) {
        assert_eq!(pair[0].end, Some(pair[1].start));
    }
}

#[test]
fn same_status_is_rejected_and_leaves_log_unchanged() {
    let mut pool = test_pool("idempotent");

    change(&mut pool, DutyStatus::Driving, ts(1, 8, 0)).unwrap();

    let before = load_driver_records(&mut pool, "D001").unwrap();

    let err = change(&mut pool, DutyStatus::Driving, ts(1, 9, 0)).unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { .. }));

    let after = load_driver_records(&mut pool, "D001").unwrap();
    assert_eq!(before.len(), after.len());
    assert_eq!(before[0].start, after[0].start);
    assert!(after[0].is_open());
}

#[test]
fn new_driver_defaults_to_off_duty() {
    let mut pool = test_pool("default_off");

    // a brand-new driver is already off duty
    let err = change(&mut pool, DutyStatus::OffDuty, ts(1, 8, 0)).unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { .. }));
    assert!(load_driver_records(&mut pool, "D001").unwrap().is_empty());

    // any other status opens the first record without closing anything
    change(&mut pool, DutyStatus::OnDutyNotDriving, ts(1, 8, 0)).unwrap();
    let records = load_driver_records(&mut pool, "D001").unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].is_open());
}

#[test]
fn out_of_order_timestamp_is_rejected() {
    let mut pool = test_pool("out_of_order");

    change(&mut pool, DutyStatus::Driving, ts(1, 8, 0)).unwrap();

    let err = change(&mut pool, DutyStatus::OffDuty, ts(1, 7, 59)).unwrap_err();
    assert!(matches!(err, AppError::OutOfOrderTimestamp { .. }));

    // the open record is untouched
    let open = load_open_record(&pool.conn, "D001").unwrap().unwrap();
    assert_eq!(open.status, DutyStatus::Driving);
    assert_eq!(open.start, ts(1, 8, 0));
}

#[test]
fn equal_timestamp_closes_a_zero_length_record() {
    let mut pool = test_pool("zero_length");

    change(&mut pool, DutyStatus::Driving, ts(1, 8, 0)).unwrap();
    change(&mut pool, DutyStatus::OnDutyNotDriving, ts(1, 8, 0)).unwrap();

    let records = load_driver_records(&mut pool, "D001").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].end, Some(records[0].start));
}

#[test]
fn drivers_have_independent_timelines() {
    let mut pool = test_pool("independent");

    change(&mut pool, DutyStatus::Driving, ts(1, 8, 0)).unwrap();

    ChangeLogic::apply(
        &mut pool,
        "D002",
        DutyStatus::OnDutyNotDriving,
        ts(1, 9, 0),
        GeoPoint::unknown(),
        RecordSource::Manual,
    )
    .unwrap();

    let d1 = load_driver_records(&mut pool, "D001").unwrap();
    let d2 = load_driver_records(&mut pool, "D002").unwrap();
    assert_eq!(d1.len(), 1);
    assert_eq!(d2.len(), 1);
    assert_eq!(d1[0].status, DutyStatus::Driving);
    assert_eq!(d2[0].status, DutyStatus::OnDutyNotDriving);
}

#[test]
fn auto_and_manual_share_the_same_entry_point() {
    let mut pool = test_pool("auto_source");

    ChangeLogic::apply(
        &mut pool,
        "D001",
        DutyStatus::Driving,
        ts(1, 8, 0),
        GeoPoint::new(41.9, 12.5).unwrap(),
        RecordSource::Auto,
    )
    .unwrap();

    // the auto record obeys the same transition rules
    let err = ChangeLogic::apply(
        &mut pool,
        "D001",
        DutyStatus::Driving,
        ts(1, 9, 0),
        GeoPoint::unknown(),
        RecordSource::Manual,
    )
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { .. }));

    let records = load_driver_records(&mut pool, "D001").unwrap();
    assert_eq!(records[0].source, RecordSource::Auto);
    assert!((records[0].location.lat - 41.9).abs() < 1e-9);
}
