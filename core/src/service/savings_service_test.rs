use crate::config::{Config, GoalPersistence};
use crate::model::intent::Intent;
use crate::model::savings::UpdateError;
use crate::repository::{KeyValueStore, MemoryKeyValueStore, KEY_CURRENT_SAVINGS, KEY_SAVINGS_GOAL};
use crate::service::savings_service::{Outcome, SavingsService};

use anyhow::{anyhow, Result};

struct FailingStore;

impl KeyValueStore for FailingStore {
    fn load_string(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn load_f64(&self, _key: &str) -> Result<Option<f64>> {
        Ok(None)
    }

    fn save_string(&self, _key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("disk full"))
    }

    fn save_f64(&self, _key: &str, _value: f64) -> Result<()> {
        Err(anyhow!("disk full"))
    }
}

fn seeded_store(goal: &str, savings: f64) -> MemoryKeyValueStore {
    let store = MemoryKeyValueStore::new();
    store.save_string(KEY_SAVINGS_GOAL, goal).unwrap();
    store.save_f64(KEY_CURRENT_SAVINGS, savings).unwrap();
    store
}

fn service(goal: &str, savings: f64) -> SavingsService<MemoryKeyValueStore> {
    SavingsService::new(seeded_store(goal, savings), Config::default()).unwrap()
}

#[test]
fn test_defaults_when_store_is_empty() {
    let store = MemoryKeyValueStore::new();
    let service = SavingsService::new(store, Config::default()).unwrap();
    assert_eq!(service.state().goal_text, "");
    assert_eq!(service.state().current_savings(), 0.0);
    assert_eq!(service.state().pending_amount_text(), "");
}

#[test]
fn test_negative_stored_balance_loads_as_zero() {
    let service = service("100", -40.0);
    assert_eq!(service.state().current_savings(), 0.0);
}

#[test]
fn test_add_scenario() {
    let mut service = service("1000", 0.0);
    service.set_pending_amount("250");

    assert_eq!(service.add_pending().unwrap(), Outcome::Applied);

    let state = service.state();
    assert_eq!(state.current_savings(), 250.0);
    assert_eq!(state.progress(), 0.25);
    assert_eq!(state.remaining(), 750.0);
    assert_eq!(state.filled_segments(10), 2);
    assert_eq!(state.pending_amount_text(), "");
    assert_eq!(
        service.store().load_f64(KEY_CURRENT_SAVINGS).unwrap(),
        Some(250.0)
    );
}

#[test]
fn test_invalid_add_writes_nothing() {
    let mut service = service("1000", 10.0);
    let writes_before = service.store().write_count();
    service.set_pending_amount("ten");

    let outcome = service.add_pending().unwrap();

    assert_eq!(
        outcome,
        Outcome::Rejected(UpdateError::InvalidAmount("ten".to_string()))
    );
    assert_eq!(service.state().current_savings(), 10.0);
    assert_eq!(service.state().pending_amount_text(), "ten");
    assert_eq!(service.store().write_count(), writes_before);
}

#[test]
fn test_overdraft_rejected_scenario() {
    let mut service = service("", 100.0);
    service.set_pending_amount("150");

    let outcome = service.withdraw_pending().unwrap();

    assert!(matches!(
        outcome,
        Outcome::Rejected(UpdateError::InsufficientFunds { .. })
    ));
    assert_eq!(service.state().current_savings(), 100.0);
    assert_eq!(service.state().pending_amount_text(), "150");
    assert_eq!(
        service.store().load_f64(KEY_CURRENT_SAVINGS).unwrap(),
        Some(100.0)
    );
}

#[test]
fn test_withdraw_persists() {
    let mut service = service("", 100.0);
    assert!(service.withdraw("30.5").unwrap().is_applied());
    assert_eq!(service.state().current_savings(), 69.5);
    assert_eq!(
        service.store().load_f64(KEY_CURRENT_SAVINGS).unwrap(),
        Some(69.5)
    );
}

#[test]
fn test_empty_goal_scenario() {
    let service = service("", 50.0);
    assert_eq!(service.state().progress(), 0.0);
    assert_eq!(service.state().remaining(), 0.0);
}

#[test]
fn test_reset_scenario() {
    let mut service = service("500", 300.0);
    service.reset().unwrap();

    assert_eq!(service.state().current_savings(), 0.0);
    assert_eq!(
        service.store().load_f64(KEY_CURRENT_SAVINGS).unwrap(),
        Some(0.0)
    );
    assert_eq!(
        service.store().load_string(KEY_SAVINGS_GOAL).unwrap(),
        Some("500".to_string())
    );
}

#[test]
fn test_goal_edits_wait_for_commit() {
    let mut service = service("", 0.0);
    let writes_before = service.store().write_count();

    service.set_goal("1").unwrap();
    service.set_goal("10").unwrap();
    service.set_goal("100").unwrap();

    assert!(service.has_unsaved_goal());
    assert_eq!(service.store().write_count(), writes_before);
    assert_eq!(
        service.store().load_string(KEY_SAVINGS_GOAL).unwrap(),
        Some(String::new())
    );

    service.commit_goal().unwrap();

    assert!(!service.has_unsaved_goal());
    assert_eq!(
        service.store().load_string(KEY_SAVINGS_GOAL).unwrap(),
        Some("100".to_string())
    );

    // Nothing dirty, nothing written.
    let writes_after = service.store().write_count();
    service.commit_goal().unwrap();
    assert_eq!(service.store().write_count(), writes_after);
}

#[test]
fn test_goal_edits_persist_immediately_on_edit_policy() {
    let config = Config {
        goal_persistence: GoalPersistence::OnEdit,
        ..Config::default()
    };
    let mut service = SavingsService::new(MemoryKeyValueStore::new(), config).unwrap();

    service.set_goal("12").unwrap();

    assert!(!service.has_unsaved_goal());
    assert_eq!(
        service.store().load_string(KEY_SAVINGS_GOAL).unwrap(),
        Some("12".to_string())
    );
}

#[test]
fn test_balance_update_also_saves_dirty_goal() {
    let mut service = service("", 0.0);
    service.set_goal("2000").unwrap();
    service.add("5").unwrap();

    assert!(!service.has_unsaved_goal());
    assert_eq!(
        service.store().load_string(KEY_SAVINGS_GOAL).unwrap(),
        Some("2000".to_string())
    );
}

#[test]
fn test_dispatch_maps_intents() {
    let mut service = service("1000", 0.0);

    service.dispatch(Intent::GoalTextChanged("400".to_string())).unwrap();
    service.dispatch(Intent::AmountTextChanged("100".to_string())).unwrap();
    assert_eq!(
        service.dispatch(Intent::AddPressed).unwrap(),
        Outcome::Applied
    );
    assert_eq!(service.state().current_savings(), 100.0);
    assert_eq!(service.state().progress(), 0.25);

    service.dispatch(Intent::AmountTextChanged("500".to_string())).unwrap();
    assert!(matches!(
        service.dispatch(Intent::WithdrawPressed).unwrap(),
        Outcome::Rejected(_)
    ));

    assert_eq!(
        service.dispatch(Intent::BackgroundTap).unwrap(),
        Outcome::Unchanged
    );
    assert_eq!(service.state().pending_amount_text(), "500");

    service.dispatch(Intent::ResetPressed).unwrap();
    assert_eq!(service.state().current_savings(), 0.0);
}

#[test]
fn test_view_uses_configured_segments() {
    let config = Config {
        segment_count: 4,
        ..Config::default()
    };
    let service = SavingsService::new(seeded_store("100", 50.0), config).unwrap();

    let view = service.view();
    assert_eq!(view.segments, vec![true, true, false, false]);
}

#[test]
fn test_store_failure_propagates() {
    let mut service = SavingsService::new(FailingStore, Config::default()).unwrap();
    let err = service.add("5").unwrap_err();
    assert!(format!("{:#}", err).contains("disk full"));
}
