//! Integration tests for the commerce-sqlite crate.

use commerce_core::UserUpdate;
use commerce_sqlite::{Store, StoreError, schema};

/// Helper to open a fresh in-memory store.
fn setup_store() -> Store {
    Store::open_in_memory().unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// =============================================================================
// Users
// =============================================================================

#[test]
fn test_duplicate_username_leaves_original_unchanged() {
    let mut store = setup_store();
    let original = store.create_user("alice", "a@x.com", "pw1").unwrap();

    let err = store.create_user("alice", "other@x.com", "pw2").unwrap_err();
    assert!(matches!(err, StoreError::ConstraintViolation(_)));

    let users = store.list_users().unwrap();
    assert_eq!(users, vec![original.clone()]);
    assert_eq!(store.get_user_by_username("alice").unwrap(), original);
}

#[test]
fn test_unknown_username_is_not_found() {
    let store = setup_store();
    let err = store.get_user_by_username("nobody").unwrap_err();
    match err {
        StoreError::NotFound { entity, key } => {
            assert_eq!(entity, "user");
            assert_eq!(key, "nobody");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_password_update_is_read_back() {
    let mut store = setup_store();
    let user = store.create_user("alice", "a@x.com", "pw1").unwrap();

    store.update_user_password(&user, "pw2").unwrap();

    let reloaded = store.get_user_by_username("alice").unwrap();
    assert_eq!(reloaded.password, "pw2");
    assert_eq!(reloaded.email, "a@x.com");
}

#[test]
fn test_password_update_after_delete_is_not_found() {
    let mut store = setup_store();
    let user = store.create_user("alice", "a@x.com", "pw1").unwrap();
    store.delete_user(&user).unwrap();

    let err = store.update_user_password(&user, "pw2").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_full_user_update() {
    let mut store = setup_store();
    let user = store.create_user("alice", "a@x.com", "pw1").unwrap();

    let update = UserUpdate {
        username: Some("alicia".to_string()),
        email: Some("alicia@x.com".to_string()),
        password: Some("pw9".to_string()),
    };
    store.update_user(user.id, &update).unwrap();

    assert!(store.get_user_by_username("alice").unwrap_err().is_not_found());
    let renamed = store.get_user_by_username("alicia").unwrap();
    assert_eq!(renamed.id, user.id);
    assert_eq!(renamed.email, "alicia@x.com");
    assert_eq!(renamed.password, "pw9");
}

// =============================================================================
// Orders and totals
// =============================================================================

#[test]
fn test_order_total_mixed_items() {
    let mut store = setup_store();
    let user = store.create_user("alice", "a@x.com", "pw1").unwrap();
    let ten = store.create_product("Ten", 10.00).unwrap();
    let five = store.create_product("FiveFifty", 5.50).unwrap();
    let order = store.create_order(&user).unwrap();

    store.add_product_to_order(order.id, ten.id, 2).unwrap();
    store.add_product_to_order(order.id, five.id, 1).unwrap();

    assert_close(store.calculate_order_total(order.id).unwrap(), 25.50);
}

#[test]
fn test_order_total_without_items_is_zero() {
    let mut store = setup_store();
    let user = store.create_user("alice", "a@x.com", "pw1").unwrap();
    let order = store.create_order(&user).unwrap();

    assert_eq!(store.calculate_order_total(order.id).unwrap(), 0.0);
}

#[test]
fn test_add_product_to_missing_order_writes_nothing() {
    let mut store = setup_store();
    let product = store.create_product("Widget", 9.99).unwrap();

    let err = store.add_product_to_order(404, product.id, 1).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "order", .. }));

    let count: i64 = store
        .connection()
        .query_row("SELECT COUNT(*) FROM order_line_items", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn test_add_missing_product_to_order_writes_nothing() {
    let mut store = setup_store();
    let user = store.create_user("alice", "a@x.com", "pw1").unwrap();
    let order = store.create_order(&user).unwrap();

    let err = store.add_product_to_order(order.id, 404, 1).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "product", .. }));
    assert!(store.line_items(order.id).unwrap().is_empty());
}

#[test]
fn test_end_to_end_widget_order() {
    let mut store = setup_store();
    store.create_user("alice", "a@x.com", "pw1").unwrap();
    let widget = store.create_product("Widget", 9.99).unwrap();

    let alice = store.get_user_by_username("alice").unwrap();
    let order = store.create_order(&alice).unwrap();
    store.add_product_to_order(order.id, widget.id, 3).unwrap();

    assert_close(store.calculate_order_total(order.id).unwrap(), 29.97);
}

#[test]
fn test_delete_user_keeps_orders() {
    let mut store = setup_store();
    let alice = store.create_user("alice", "a@x.com", "pw1").unwrap();
    let bob = store.create_user("bob", "b@x.com", "pw2").unwrap();
    let order = store.create_order(&alice).unwrap();

    store.delete_user(&alice).unwrap();

    assert_eq!(store.list_users().unwrap(), vec![bob]);
    let orders = store.list_orders().unwrap();
    assert_eq!(orders, vec![order]);
    assert_eq!(orders[0].user_id, alice.id);
    assert!(store.get_user(alice.id).unwrap_err().is_not_found());
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("e_commerce.db");

    let order_id = {
        let mut store = Store::open(&path).unwrap();
        let user = store.create_user("alice", "a@x.com", "pw1").unwrap();
        let widget = store.create_product("Widget", 9.99).unwrap();
        let (order, _) = store.place_order(user.id, widget.id, 3).unwrap();
        order.id
    };

    let store = Store::open(&path).unwrap();
    assert!(schema::tables_exist(store.connection()).unwrap());
    assert_eq!(store.list_users().unwrap().len(), 1);
    assert_eq!(store.list_products().unwrap().len(), 1);
    assert_close(store.calculate_order_total(order_id).unwrap(), 29.97);
}

#[test]
fn test_open_fails_for_unreachable_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("nested").join("db.sqlite");
    assert!(Store::open(&path).is_err());
}
