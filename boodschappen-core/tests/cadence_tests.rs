use boodschappen_core::cadence::{
    snoozed_until, DEFAULT_CORRECTION_FACTOR, FACTOR_MAX, SNOOZE_HOURS,
};
use boodschappen_core::{next_correction_factor, snooze, MemoryCadenceStore, SnoozeError};
use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
}

#[test]
fn test_factor_converges_to_cap() {
    let mut factor = DEFAULT_CORRECTION_FACTOR;
    let mut history = Vec::new();
    for _ in 0..40 {
        let next = next_correction_factor(Some(factor));
        assert!(next >= factor);
        assert!(next <= FACTOR_MAX);
        factor = next;
        history.push(factor);
    }

    assert!(history[13] > 1.97 && history[13] < 2.0, "{}", history[13]);
    assert_eq!(history[14], FACTOR_MAX);
    assert!(history[14..].iter().all(|f| *f == FACTOR_MAX));
}

#[test]
fn test_snooze_sets_window_and_bumps_factor() {
    let mut store = MemoryCadenceStore::new();
    let household = Uuid::new_v4();
    let product = store.insert_product(household, None);

    let outcome = snooze(&mut store, household, product, fixed_now()).unwrap();

    assert_eq!(outcome.product_id, product);
    assert_eq!(
        outcome.snoozed_until,
        fixed_now() + Duration::hours(SNOOZE_HOURS)
    );
    assert_eq!(outcome.previous_factor, DEFAULT_CORRECTION_FACTOR);
    assert!((outcome.frequency_correction_factor - 1.05).abs() < 1e-12);
    assert_eq!(
        store.snoozed_until(household, product),
        Some(snoozed_until(fixed_now()))
    );
    assert_eq!(
        store.correction_factor(product),
        Some(outcome.frequency_correction_factor)
    );
}

#[test]
fn test_repeated_snooze_replaces_window() {
    let mut store = MemoryCadenceStore::new();
    let household = Uuid::new_v4();
    let product = store.insert_product(household, Some(1.5));

    snooze(&mut store, household, product, fixed_now()).unwrap();
    let later = fixed_now() + Duration::hours(30);
    let outcome = snooze(&mut store, household, product, later).unwrap();

    assert_eq!(store.snooze_count(), 1);
    assert_eq!(store.snoozed_until(household, product), Some(snoozed_until(later)));
    assert!((outcome.previous_factor - 1.575).abs() < 1e-9);
    assert!((outcome.frequency_correction_factor - 1.65375).abs() < 1e-9);
}

#[test]
fn test_other_household_gets_not_found() {
    let mut store = MemoryCadenceStore::new();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let product = store.insert_product(owner, Some(1.2));

    let err = snooze(&mut store, stranger, product, fixed_now()).unwrap_err();

    assert_eq!(err, SnoozeError::NotFound);
    assert!(!err.is_storage());
    assert_eq!(store.snooze_count(), 0);
    assert_eq!(store.correction_factor(product), Some(1.2));
}

#[test]
fn test_unknown_product_gets_not_found() {
    let mut store = MemoryCadenceStore::new();
    let err = snooze(&mut store, Uuid::new_v4(), Uuid::new_v4(), fixed_now()).unwrap_err();
    assert_eq!(err, SnoozeError::NotFound);
}

#[test]
fn test_failed_snooze_write_leaves_factor_alone() {
    let mut store = MemoryCadenceStore::new();
    let household = Uuid::new_v4();
    let product = store.insert_product(household, None);
    store.fail_snooze_writes(true);

    let err = snooze(&mut store, household, product, fixed_now()).unwrap_err();

    assert!(matches!(err, SnoozeError::SnoozeWrite(_)));
    assert!(err.is_storage());
    assert_eq!(store.correction_factor(product), None);
}

#[test]
fn test_failed_factor_write_is_an_error() {
    let mut store = MemoryCadenceStore::new();
    let household = Uuid::new_v4();
    let product = store.insert_product(household, Some(1.1));
    store.fail_factor_writes(true);

    let err = snooze(&mut store, household, product, fixed_now()).unwrap_err();

    assert!(matches!(err, SnoozeError::FactorWrite(_)));
    assert!(err.is_storage());
    // without a transaction the snooze write stays
    assert!(store.snoozed_until(household, product).is_some());
    assert_eq!(store.correction_factor(product), Some(1.1));
}
