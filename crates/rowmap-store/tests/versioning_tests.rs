// Auto-increment keys and optimistic locking on the Account table

mod common;

use common::{accounts_db, Account};
use rowmap_core::{values, ExErrorKind};
use rowmap_store::SqlExecutor;

fn account(owner: &str, balance: i64) -> Account {
    Account {
        owner: owner.to_string(),
        balance,
        ..Account::default()
    }
}

#[test]
fn test_insert_writes_back_generated_key_and_version() {
    let db = accounts_db();

    let mut ana = account("ana", 10);
    let mut rui = account("rui", 20);
    db.insert(&mut ana).unwrap();
    db.insert(&mut rui).unwrap();

    assert!(ana.id > 0);
    assert_eq!(rui.id, ana.id + 1);
    assert_eq!(ana.version, 1);

    let stored = db.get::<Account>(&values![rui.id]).unwrap().unwrap();
    assert_eq!(stored, rui);
}

#[test]
fn test_update_bumps_version() {
    let db = accounts_db();
    let mut ana = account("ana", 10);
    db.insert(&mut ana).unwrap();

    ana.balance = 15;
    assert_eq!(db.update(&mut ana).unwrap(), 1);
    assert_eq!(ana.version, 2);

    let stored = db.get::<Account>(&values![ana.id]).unwrap().unwrap();
    assert_eq!(stored.balance, 15);
    assert_eq!(stored.version, 2);
}

#[test]
fn test_stale_update_is_rejected() {
    let db = accounts_db();
    let mut ana = account("ana", 10);
    db.insert(&mut ana).unwrap();

    let mut first = ana.clone();
    let mut second = ana.clone();

    first.balance = 100;
    db.update(&mut first).unwrap();

    second.balance = 200;
    let err = db.update(&mut second).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::OptimisticLock);
    assert_eq!(err.table(), Some("Account"));
    assert_eq!(second.version, 1);

    let stored = db.get::<Account>(&values![ana.id]).unwrap().unwrap();
    assert_eq!(stored.balance, 100);
}

#[test]
fn test_stale_delete_is_rejected() {
    let db = accounts_db();
    let mut ana = account("ana", 10);
    db.insert(&mut ana).unwrap();

    let stale = ana.clone();
    db.update(&mut ana).unwrap();

    let err = db.delete(&stale).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::OptimisticLock);

    assert_eq!(db.delete(&ana).unwrap(), 1);
}

#[test]
fn test_versioned_update_of_missing_row_is_zero() {
    let db = accounts_db();
    let mut ghost = Account {
        id: 404,
        version: 1,
        ..account("ghost", 0)
    };
    assert_eq!(db.update(&mut ghost).unwrap(), 0);
    assert_eq!(ghost.version, 1);
}

#[test]
fn test_version_column_is_not_updatable_by_name() {
    let db = accounts_db();
    let mut ana = account("ana", 10);
    db.insert(&mut ana).unwrap();

    let err = db
        .update_with(&mut ana, &rowmap_core::UpdateMode::columns(["version"]))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}

#[test]
fn test_update_at_max_version_is_rejected() {
    let db = accounts_db();
    let mut ana = account("ana", 10);
    db.insert(&mut ana).unwrap();
    db.exec(
        "update Account set version = ? where id = ?",
        &values![i64::MAX, ana.id],
    )
    .unwrap();

    let mut stored = db.get::<Account>(&values![ana.id]).unwrap().unwrap();
    stored.balance = 99;
    let err = db.update(&mut stored).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(err.table(), Some("Account"));
    assert_eq!(stored.version, i64::MAX);

    let unchanged = db.get::<Account>(&values![ana.id]).unwrap().unwrap();
    assert_eq!(unchanged.balance, 10);
}
