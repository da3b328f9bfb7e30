// Insert, update, delete, get and select behavior against Country and City

mod common;

use common::{world_db, City, Country};
use rowmap_core::{values, ExErrorKind, UpdateMode, Value};
use rowmap_store::SqlExecutor;

fn seed(db: &rowmap_store::DbMap) {
    db.insert(&mut Country::new("PT", "Portugal")).unwrap();
    db.insert(&mut Country::new("SP", "Spain")).unwrap();
    db.insert(&mut City::new("OPO", "Porto", "PT")).unwrap();
    db.insert(&mut City::new("LIS", "Lisbon", "PT")).unwrap();
}

#[test]
fn test_insert_duplicate_key_fails() {
    let db = world_db();
    seed(&db);

    let err = db
        .insert(&mut Country::new("PT", "Portugal again"))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
    assert_eq!(err.code(), "ERR_ALREADY_EXISTS");
    assert_eq!(err.op(), Some("insert"));
    assert_eq!(err.table(), Some("Country"));
    assert_eq!(err.key(), Some(r#""PT""#));

    let stored = db.get::<Country>(&values!["PT"]).unwrap().unwrap();
    assert_eq!(stored.name, "Portugal");
}

#[test]
fn test_get_missing_row_is_none() {
    let db = world_db();
    assert_eq!(db.get::<City>(&values!["NOPE"]).unwrap(), None);
}

#[test]
fn test_get_with_wrong_key_arity_fails() {
    let db = world_db();
    let err = db.get::<City>(&values!["LIS", "PT"]).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(err.table(), Some("City"));
}

#[test]
fn test_full_update_overwrites_every_field() {
    let db = world_db();
    seed(&db);

    let mut porto = City::new("OPO", "Oporto", "");
    assert_eq!(db.update(&mut porto).unwrap(), 1);

    let stored = db.get::<City>(&values!["OPO"]).unwrap().unwrap();
    assert_eq!(stored, City::new("OPO", "Oporto", ""));
}

#[test]
fn test_column_update_preserves_other_fields() {
    let db = world_db();
    seed(&db);

    let mut lisboa = City {
        code: "LIS".to_string(),
        name: "Lisboa".to_string(),
        ..City::default()
    };
    let count = db
        .update_with(&mut lisboa, &UpdateMode::columns(["name"]))
        .unwrap();
    assert_eq!(count, 1);

    let stored = db.get::<City>(&values!["LIS"]).unwrap().unwrap();
    assert_eq!(stored, City::new("LIS", "Lisboa", "PT"));
}

#[test]
fn test_column_update_rejects_key_and_unknown_columns() {
    let db = world_db();
    seed(&db);
    let mut city = City::new("LIS", "Lisboa", "PT");

    let err = db
        .update_with(&mut city, &UpdateMode::columns(["code"]))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);

    let err = db
        .update_with(&mut city, &UpdateMode::columns(["population"]))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::UnknownColumn);

    let stored = db.get::<City>(&values!["LIS"]).unwrap().unwrap();
    assert_eq!(stored.name, "Lisbon");
}

#[test]
fn test_update_and_delete_missing_row_affect_nothing() {
    let db = world_db();
    seed(&db);

    assert_eq!(db.update(&mut City::new("XXX", "Nowhere", "")).unwrap(), 0);
    assert_eq!(db.delete(&City::new("XXX", "", "")).unwrap(), 0);
    assert_eq!(db.select_int("select count(*) from City", &[]).unwrap(), 2);
}

#[test]
fn test_delete_only_uses_key() {
    let db = world_db();
    seed(&db);

    // Non-key fields differ from the stored row
    let count = db.delete(&City::new("OPO", "whatever", "SP")).unwrap();
    assert_eq!(count, 1);
    assert!(db.get::<City>(&values!["OPO"]).unwrap().is_none());
}

#[test]
fn test_select_empty_result() {
    let db = world_db();
    let cities: Vec<City> = db
        .select("select * from City where countryCode = ?", &values!["FR"])
        .unwrap();
    assert!(cities.is_empty());
}

#[test]
fn test_select_with_column_subset_fails_to_decode() {
    let db = world_db();
    seed(&db);

    let err = db
        .select::<City>("select code, name from City", &[])
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::MissingColumn);
}

#[test]
fn test_select_invalid_sql_is_persistence_error() {
    let db = world_db();
    let err = db
        .select::<City>("select * from Nowhere", &[])
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Persistence);
}

#[test]
fn test_select_one() {
    let db = world_db();
    seed(&db);

    let porto: Option<City> = db
        .select_one("select * from City where code = ?", &values!["OPO"])
        .unwrap();
    assert_eq!(porto, Some(City::new("OPO", "Porto", "PT")));

    let none: Option<City> = db
        .select_one("select * from City where code = ?", &values!["MAD"])
        .unwrap();
    assert_eq!(none, None);

    let err = db
        .select_one::<City>("select * from City", &[])
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::TooManyRows);
}

#[test]
fn test_scalar_helpers() {
    let db = world_db();
    seed(&db);

    assert_eq!(
        db.select_str("select name from Country where code = ?", &values!["SP"])
            .unwrap(),
        "Spain"
    );
    assert_eq!(
        db.select_str("select name from Country where code = ?", &values!["FR"])
            .unwrap(),
        ""
    );
    assert_eq!(
        db.select_null_str("select name from Country where code = ?", &values!["FR"])
            .unwrap(),
        None
    );
    assert_eq!(
        db.select_null_int("select max(length(code)) from City", &[])
            .unwrap(),
        Some(3)
    );
    assert_eq!(
        db.select_null_int("select max(length(code)) from City where 0", &[])
            .unwrap(),
        None
    );
    assert_eq!(
        db.select_float("select avg(length(name)) from Country", &[])
            .unwrap(),
        6.5
    );
    assert_eq!(
        db.select_null_float("select avg(length(name)) from Country where 0", &[])
            .unwrap(),
        None
    );
    assert_eq!(
        db.select_value("select code from City order by code", &[])
            .unwrap(),
        Some(Value::from("LIS"))
    );
}

#[test]
fn test_scalar_type_mismatch() {
    let db = world_db();
    seed(&db);

    let err = db
        .select_int("select name from Country where code = ?", &values!["PT"])
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::TypeMismatch);
}

#[test]
fn test_non_utf8_text_is_type_mismatch() {
    let db = world_db();
    db.exec(
        "insert into Country (code, name) values (?, cast(x'50ff' as text))",
        &values!["XX"],
    )
    .unwrap();

    let err = db
        .select_str("select name from Country where code = ?", &values!["XX"])
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::TypeMismatch);
    assert_eq!(err.op(), Some("query"));

    let err = db.get::<Country>(&values!["XX"]).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::TypeMismatch);
}

#[test]
fn test_exec_returns_affected_rows() {
    let db = world_db();
    seed(&db);

    let count = db
        .exec(
            "update City set countryCode = ? where countryCode = ?",
            &values!["XX", "PT"],
        )
        .unwrap();
    assert_eq!(count, 2);
}

#[test]
fn test_unregistered_record_type() {
    struct Planet;

    impl rowmap_core::Record for Planet {
        const TABLE: &'static str = "Planet";
        const COLUMNS: &'static [rowmap_core::Column] = &[rowmap_core::Column::text("name")];

        fn to_row(&self) -> Vec<Value> {
            values!["Earth"]
        }

        fn from_row(_row: &rowmap_core::Row<'_>) -> rowmap_core::Result<Self> {
            Ok(Planet)
        }
    }

    let db = world_db();
    let err = db.insert(&mut Planet).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::UnregisteredTable);
    assert!(err.message().contains("Planet"));
}

#[test]
fn test_write_without_keys_fails() {
    let mut db = rowmap_store::DbMap::open_in_memory().unwrap();
    db.add_table::<Country>();
    db.create_tables().unwrap();

    // Inserting works without keys; keyed operations do not
    db.insert(&mut Country::new("PT", "Portugal")).unwrap();
    let err = db.update(&mut Country::new("PT", "Portugal")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::MissingKeys);
    let err = db.get::<Country>(&values!["PT"]).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::MissingKeys);
}
