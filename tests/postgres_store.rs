//! `PgStore` against a live PostgreSQL.
//!
//! Runs only when `DATABASE_URL` is set; otherwise each test returns early.
//! Owners are random so the suite can share a database with other runs.

use pizza_api::{
    db,
    models::pizza::{NewPizza, PizzaChanges, PizzaFilter},
    services::key_service,
    store::{KeyStore, PgStore, PizzaStore},
};
use uuid::Uuid;

async fn store() -> Option<PgStore> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping PostgreSQL store test");
        return None;
    };

    let pool = db::create_pool(&url, 2).await.unwrap();
    db::run_migrations(&pool).await.unwrap();
    Some(PgStore::new(pool))
}

async fn owner_with_key(store: &PgStore) -> String {
    let owner = format!("owner-{}", Uuid::new_v4());
    key_service::issue(store, &owner).await.unwrap();
    owner
}

fn new_pizza(owner: &str, name: &str, toppings: &[&str]) -> NewPizza {
    NewPizza {
        owner: owner.to_string(),
        name: name.to_string(),
        crust: "thin".to_string(),
        toppings: toppings.iter().map(|t| t.to_string()).collect(),
    }
}

#[tokio::test]
async fn keys_are_unique_per_owner_and_replaced_in_place() {
    let Some(store) = store().await else { return };
    let owner = owner_with_key(&store).await;

    assert!(key_service::issue(&store, &owner).await.is_err());

    let fresh = key_service::regenerate(&store, &owner).await.unwrap();
    let record = store
        .find_by_hash(&key_service::hash_key(&fresh.key))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.owner, owner);

    let unknown = format!("owner-{}", Uuid::new_v4());
    assert!(store.replace_key(&unknown, "no-such").await.unwrap().is_none());
}

#[tokio::test]
async fn filters_match_exactly_within_owner() {
    let Some(store) = store().await else { return };
    let alice = owner_with_key(&store).await;
    let bob = owner_with_key(&store).await;

    let first = store
        .insert_pizza(new_pizza(&alice, "Margherita", &["basil", "mozzarella"]))
        .await
        .unwrap();
    let second = store
        .insert_pizza(new_pizza(&alice, "Marinara", &["garlic"]))
        .await
        .unwrap();
    store
        .insert_pizza(new_pizza(&bob, "Margherita", &["basil", "mozzarella"]))
        .await
        .unwrap();

    let all = store
        .find_pizzas(&alice, &PizzaFilter::default())
        .await
        .unwrap();
    assert_eq!(all, vec![first.clone(), second.clone()]);

    let by_name_and_crust = PizzaFilter {
        name: Some("Margherita".to_string()),
        crust: Some("thin".to_string()),
        ..PizzaFilter::default()
    };
    assert_eq!(
        store.find_pizzas(&alice, &by_name_and_crust).await.unwrap(),
        vec![first.clone()]
    );

    let by_id = PizzaFilter {
        id: Some(second.id),
        ..PizzaFilter::default()
    };
    assert_eq!(
        store.find_pizzas(&alice, &by_id).await.unwrap(),
        vec![second]
    );
    assert!(store.find_pizzas(&bob, &by_id).await.unwrap().is_empty());

    let exact = PizzaFilter {
        toppings: Some(vec!["basil".to_string(), "mozzarella".to_string()]),
        ..PizzaFilter::default()
    };
    let partial = PizzaFilter {
        toppings: Some(vec!["basil".to_string()]),
        ..PizzaFilter::default()
    };
    assert_eq!(
        store.find_pizzas(&alice, &exact).await.unwrap(),
        vec![first]
    );
    assert!(store.find_pizzas(&alice, &partial).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_and_delete_are_owner_scoped() {
    let Some(store) = store().await else { return };
    let alice = owner_with_key(&store).await;
    let bob = owner_with_key(&store).await;

    let pizza = store
        .insert_pizza(new_pizza(&alice, "Margherita", &["basil"]))
        .await
        .unwrap();

    let changes = PizzaChanges {
        crust: Some("deep dish".to_string()),
        toppings: Some(Vec::new()),
        ..PizzaChanges::default()
    };
    assert!(!store.update_pizza(pizza.id, &bob, &changes).await.unwrap());
    assert!(store.update_pizza(pizza.id, &alice, &changes).await.unwrap());

    let stored = store
        .find_pizzas(&alice, &PizzaFilter::default())
        .await
        .unwrap();
    assert_eq!(stored[0].name, "Margherita");
    assert_eq!(stored[0].crust, "deep dish");
    assert!(stored[0].toppings.is_empty());

    assert!(!store.delete_pizza(pizza.id, &bob).await.unwrap());
    assert!(store.delete_pizza(pizza.id, &alice).await.unwrap());
    assert!(!store.delete_pizza(pizza.id, &alice).await.unwrap());
    store.health_check().await.unwrap();
}
