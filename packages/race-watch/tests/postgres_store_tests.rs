//! PostgreSQL snapshot store against a throwaway container.
//!
//! Needs Docker: `cargo test -p race-watch -- --ignored`

use race_watch::{PostgresStore, RaceRecord, SnapshotStore};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;

async fn start_store() -> (ContainerAsync<Postgres>, PostgresStore) {
    let postgres = Postgres::default()
        .with_tag("16")
        .start()
        .await
        .expect("Failed to start Postgres container");

    let host = postgres.get_host().await.unwrap();
    let port = postgres.get_host_port_ipv4(5432).await.unwrap();
    let url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

    let store = PostgresStore::connect(&url)
        .await
        .expect("Failed to connect store");
    (postgres, store)
}

fn race(title: &str, status: &str) -> RaceRecord {
    RaceRecord::new(title, "Jan 1", "8am", "Park", status)
}

#[tokio::test]
#[ignore = "requires docker"]
async fn replace_all_round_trips_snapshot() {
    let (_pg, store) = start_store().await;

    store
        .replace_all(&[race("B", "Open"), race("A", "Closed")])
        .await
        .unwrap();

    let loaded = store.load_all().await.unwrap();
    assert_eq!(loaded, vec![race("A", "Closed"), race("B", "Open")]);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn replace_all_drops_races_missing_from_new_snapshot() {
    let (_pg, store) = start_store().await;

    store
        .replace_all(&[race("A", "Open"), race("B", "Open")])
        .await
        .unwrap();
    store.replace_all(&[race("B", "Sold Out")]).await.unwrap();

    assert_eq!(store.load_all().await.unwrap(), vec![race("B", "Sold Out")]);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn insert_missing_skips_existing_ids() {
    let (_pg, store) = start_store().await;

    store.replace_all(&[race("A", "Open")]).await.unwrap();
    let inserted = store
        .insert_missing(&[race("A", "Closed"), race("B", "Open")])
        .await
        .unwrap();

    assert_eq!(inserted, 1);
    assert_eq!(
        store.load_all().await.unwrap(),
        vec![race("A", "Open"), race("B", "Open")]
    );
}

#[tokio::test]
#[ignore = "requires docker"]
async fn reconnecting_keeps_existing_table() {
    let (_pg, store) = start_store().await;
    store.replace_all(&[race("A", "Open")]).await.unwrap();

    let again = PostgresStore::from_pool(store.pool().clone()).await.unwrap();

    assert_eq!(again.load_all().await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn failed_replace_keeps_previous_snapshot() {
    let (_pg, store) = start_store().await;
    store.replace_all(&[race("A", "Open")]).await.unwrap();

    // Postgres rejects NUL bytes in TEXT, so the second insert fails mid-transaction.
    let rejected = race("Bad\0Title", "Open");
    let result = store.replace_all(&[race("B", "Open"), rejected]).await;

    assert!(result.is_err());
    assert_eq!(store.load_all().await.unwrap(), vec![race("A", "Open")]);
}
