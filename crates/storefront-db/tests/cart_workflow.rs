//! End-to-end store behavior against a fresh in-memory database.

use storefront_core::{CoreError, Money, Pagination, ProductInput};
use storefront_db::{Database, DbConfig, DbError};

fn input(name: &str, cents: i64) -> ProductInput {
    ProductInput::new(name, Money::from_cents(cents))
}

async fn database() -> Database {
    Database::in_memory().await.expect("in-memory database")
}

#[tokio::test]
async fn created_product_reads_back_unchanged() {
    let db = database().await;
    let products = db.products();

    let created = products.create(&input("Sencha", 1250)).await.unwrap();
    let fetched = products.get_by_id(created.id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "Sencha");
    assert_eq!(fetched.price, Money::from_cents(1250));
}

#[tokio::test]
async fn insert_or_get_is_idempotent_for_name_and_price() {
    let db = database().await;
    let products = db.products();

    let first = products.insert_or_get(&[input("Matcha", 1800)]).await.unwrap();
    let second = products.insert_or_get(&[input("Matcha", 1800)]).await.unwrap();

    assert_eq!(first[0].id, second[0].id);
    assert_eq!(products.count().await.unwrap(), 1);

    // Same name, different price is a different product
    let third = products.insert_or_get(&[input("Matcha", 1900)]).await.unwrap();
    assert_ne!(third[0].id, first[0].id);
    assert_eq!(products.count().await.unwrap(), 2);
}

#[tokio::test]
async fn listing_pages_through_catalog_in_id_order() {
    let db = database().await;
    let products = db.products();

    let mut ids = Vec::new();
    for i in 0..15 {
        let p = products
            .create(&input(&format!("Item {}", i), 100 + i))
            .await
            .unwrap();
        ids.push(p.id);
    }

    let first: Vec<i64> = products
        .list(Pagination::new(0, 10))
        .await
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    let rest: Vec<i64> = products
        .list(Pagination::new(10, 10))
        .await
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();

    assert_eq!(first, ids[..10]);
    assert_eq!(rest, ids[10..]);
}

#[tokio::test]
async fn empty_id_list_returns_nothing() {
    let db = database().await;
    db.products().create(&input("Chai", 400)).await.unwrap();

    assert!(db.products().get_by_id_list(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn cart_lifecycle_from_open_to_checked_out() {
    let db = database().await;
    let carts = db.carts();

    let cart = carts.get_or_create(None).await.unwrap();
    assert!(cart.is_open());

    let cart = carts
        .add_products(cart.id, &[input("Tea", 999), input("Scone", 500)])
        .await
        .unwrap();
    assert_eq!(cart.products.len(), 2);

    let unchanged = carts.add_products(cart.id, &[]).await.unwrap();
    assert_eq!(unchanged.product_ids(), cart.product_ids());

    let summary = carts.checkout(cart.id).await.unwrap();
    assert_eq!(summary.subtotal, Money::from_cents(1499));
    assert_eq!(summary.subtotal.to_decimal(), 14.99);

    let stored = carts.get_cart(cart.id).await.unwrap();
    assert!(stored.checked_out);

    let refused = [
        carts.add_products(cart.id, &[input("Jam", 300)]).await.unwrap_err(),
        carts.remove_products(cart.id, &cart.product_ids()).await.unwrap_err(),
        carts.clear(cart.id).await.unwrap_err(),
    ];
    for err in refused {
        assert!(matches!(err, DbError::Domain(CoreError::CartCheckedOut { .. })));
    }
    assert!(matches!(
        carts.checkout(cart.id).await.unwrap_err(),
        DbError::Domain(CoreError::CartCheckedOut { .. })
    ));

    // The refused add must not have created the product
    assert_eq!(db.products().count().await.unwrap(), 2);
}

#[tokio::test]
async fn clear_keeps_the_cart() {
    let db = database().await;
    let carts = db.carts();

    let cart = carts.get_or_create(None).await.unwrap();
    carts.add_products(cart.id, &[input("Tea", 999)]).await.unwrap();

    let cleared = carts.clear(cart.id).await.unwrap();
    assert!(cleared.products.is_empty());

    let reloaded = carts.get_cart(cart.id).await.unwrap();
    assert!(reloaded.products.is_empty());
    assert!(reloaded.is_open());
}

#[tokio::test]
async fn removing_from_one_cart_leaves_others_alone() {
    let db = database().await;
    let carts = db.carts();

    let a = carts.get_or_create(None).await.unwrap();
    let b = carts.get_or_create(None).await.unwrap();

    let a = carts.add_products(a.id, &[input("Tea", 999)]).await.unwrap();
    let b = carts.add_products(b.id, &[input("Tea", 999)]).await.unwrap();
    assert_eq!(a.product_ids(), b.product_ids());

    let a = carts.remove_products(a.id, &a.product_ids()).await.unwrap();
    assert!(a.products.is_empty());

    let b = carts.get_cart(b.id).await.unwrap();
    assert_eq!(b.products.len(), 1);
}

#[tokio::test]
async fn get_or_create_replaces_missing_cart() {
    let db = database().await;
    let carts = db.carts();

    let created = carts.get_or_create(Some(4242)).await.unwrap();
    assert_ne!(created.id, 4242);
    assert!(created.products.is_empty());

    let again = carts.get_or_create(Some(created.id)).await.unwrap();
    assert_eq!(again.id, created.id);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_on_a_file_database_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig::new(dir.path().join("storefront.db")).max_connections(5);
    let db = Database::new(config).await.unwrap();

    let cart_id = db.carts().get_or_create(None).await.unwrap().id;

    let mut tasks = Vec::new();
    for i in 0..40 {
        let carts = db.carts();
        tasks.push(tokio::spawn(async move {
            carts
                .add_products(cart_id, &[input(&format!("p{}", i), 100)])
                .await
        }));
    }

    let mut failures = Vec::new();
    for task in tasks {
        if let Err(err) = task.await.unwrap() {
            failures.push(err.to_string());
        }
    }
    assert!(failures.is_empty(), "failed adds: {:?}", failures);

    let cart = db.carts().get_cart(cart_id).await.unwrap();
    assert_eq!(cart.products.len(), 40);
    assert_eq!(db.products().count().await.unwrap(), 40);

    db.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_new_carts_on_a_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(DbConfig::new(dir.path().join("storefront.db")))
        .await
        .unwrap();

    let mut tasks = Vec::new();
    for _ in 0..20 {
        let carts = db.carts();
        tasks.push(tokio::spawn(async move {
            carts.add_to_cart(None, &[input("Tea", 999)]).await
        }));
    }

    let mut ids = Vec::new();
    for task in tasks {
        ids.push(task.await.unwrap().unwrap().id);
    }
    ids.sort_unstable();
    ids.dedup();

    assert_eq!(ids.len(), 20);
    // Every cart resolved the same product
    assert_eq!(db.products().count().await.unwrap(), 1);

    db.close().await;
}

#[tokio::test]
async fn cart_references_existing_products_by_id() {
    let db = database().await;
    let tea = db.products().create(&input("Tea", 999)).await.unwrap();

    let reference: ProductInput = serde_json::from_str(&format!(r#"{{"id":{}}}"#, tea.id)).unwrap();
    let cart = db.carts().add_to_cart(None, &[reference]).await.unwrap();

    assert_eq!(cart.products, vec![tea]);
}
