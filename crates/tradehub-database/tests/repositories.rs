//! Repository integration tests.
//!
//! These run against a live PostgreSQL instance and are ignored by
//! default. Point `TRADEHUB_TEST_DATABASE_URL` at a scratch database and
//! run with `cargo test -- --ignored --test-threads=1`; some tests clear
//! tables and must not interleave.

use sqlx::PgPool;
use uuid::Uuid;

use tradehub_core::error::Resource;
use tradehub_core::types::filter::Filter;
use tradehub_core::types::sorting::SortDirection;
use tradehub_database::migration::run_migrations;
use tradehub_database::repositories::{
    CustomerRepository, InvoiceRepository, ProductRepository, UserRepository,
};
use tradehub_entity::customer::CreateCustomer;
use tradehub_entity::invoice::{CreateInvoice, CreateInvoiceItem};
use tradehub_entity::product::CreateProduct;
use tradehub_entity::user::CreateUser;

async fn test_pool() -> PgPool {
    let url = std::env::var("TRADEHUB_TEST_DATABASE_URL")
        .expect("TRADEHUB_TEST_DATABASE_URL must point at a scratch database");
    let pool = PgPool::connect(&url).await.expect("connect to test db");
    run_migrations(&pool).await.expect("run migrations");
    pool
}

fn user_payload(tag: &str) -> CreateUser {
    CreateUser {
        first_name: "Test".to_string(),
        last_name: tag.to_string(),
        email: format!("{tag}-{}@example.com", Uuid::new_v4()),
        password: "changeme123".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn create_then_find_by_id_round_trips() {
    let pool = test_pool().await;
    let repo = UserRepository::new(pool);

    let created = repo.create(&user_payload("roundtrip")).await.unwrap();
    assert!(created.id > 0);
    assert!(created.updated_at.is_none());
    assert!(created.deleted_at.is_none());

    let found = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.uuid, created.uuid);
    assert_eq!(found.first_name, created.first_name);
    assert_eq!(found.last_name, created.last_name);
    assert_eq!(found.email, created.email);
    assert_eq!(found.password, created.password);
    // Postgres stores microseconds; compare at that precision.
    assert_eq!(
        found.created_at.timestamp_micros(),
        created.created_at.timestamp_micros()
    );
    assert!(found.updated_at.is_none());
    assert!(found.deleted_at.is_none());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn update_nonexistent_id_is_not_found() {
    let pool = test_pool().await;
    let repo = UserRepository::new(pool);

    let mut ghost = repo.create(&user_payload("ghost")).await.unwrap();
    repo.delete(ghost.id).await.unwrap();

    ghost.first_name = "Nobody".to_string();
    let err = repo.update(&ghost).await.unwrap_err();
    assert!(err.is_not_found(Resource::User));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn update_stamps_updated_at() {
    let pool = test_pool().await;
    let repo = UserRepository::new(pool);

    let mut user = repo.create(&user_payload("stamp")).await.unwrap();
    user.first_name = "Renamed".to_string();

    let updated = repo.update(&user).await.unwrap();
    assert_eq!(updated.first_name, "Renamed");
    assert!(updated.updated_at.is_some());

    let found = repo.find_by_id(user.id).await.unwrap();
    assert_eq!(found.first_name, "Renamed");
    assert!(found.updated_at.is_some());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn delete_then_find_by_id_is_not_found() {
    let pool = test_pool().await;
    let repo = UserRepository::new(pool);

    let user = repo.create(&user_payload("deleted")).await.unwrap();
    repo.delete(user.id).await.unwrap();

    let err = repo.find_by_id(user.id).await.unwrap_err();
    assert!(err.is_not_found(Resource::User));

    let err = repo.delete(user.id).await.unwrap_err();
    assert!(err.is_not_found(Resource::User));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn pagination_splits_three_rows_across_two_pages() {
    let pool = test_pool().await;
    let repo = CustomerRepository::new(pool.clone());

    // Isolate from other tests' rows.
    sqlx::query("DELETE FROM invoice_items")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("DELETE FROM invoice_headers")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("DELETE FROM customers")
        .execute(&pool)
        .await
        .unwrap();

    let mut ids = Vec::new();
    for n in 0..3 {
        let c = repo
            .create(&CreateCustomer {
                first_name: "Page".to_string(),
                last_name: format!("Customer{n}"),
                email: format!("page{n}@example.com"),
            })
            .await
            .unwrap();
        ids.push(c.id);
    }

    let filter = Filter::new(1, 2).sorted_by("id", SortDirection::Asc);
    let page = repo.find_all(&filter).await.unwrap();

    assert_eq!(page.total_rows, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].id, ids[0]);
    assert_eq!(page.items[1].id, ids[1]);
    assert!(page.has_next);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn invoice_header_and_items_round_trip() {
    let pool = test_pool().await;
    let customers = CustomerRepository::new(pool.clone());
    let products = ProductRepository::new(pool.clone());
    let invoices = InvoiceRepository::new(pool);

    let client = customers
        .create(&CreateCustomer {
            first_name: "Bill".to_string(),
            last_name: "Able".to_string(),
            email: format!("bill-{}@example.com", Uuid::new_v4()),
        })
        .await
        .unwrap();
    let product = products
        .create(&CreateProduct {
            name: "Widget".to_string(),
            observations: None,
            price: 4.50,
        })
        .await
        .unwrap();

    let invoice = invoices
        .create(&CreateInvoice {
            client_id: client.id,
            items: vec![
                CreateInvoiceItem {
                    product_id: product.id,
                },
                CreateInvoiceItem {
                    product_id: product.id,
                },
            ],
        })
        .await
        .unwrap();

    assert!(invoice.header.id > 0);
    assert_eq!(invoice.items.len(), 2);

    let found = invoices.find_by_id(invoice.header.id).await.unwrap();
    assert_eq!(found.header.id, invoice.header.id);
    assert_eq!(found.header.uuid, invoice.header.uuid);
    assert_eq!(found.header.client_id, client.id);
    assert_eq!(found.items, invoice.items);

    invoices.delete(invoice.header.id).await.unwrap();
    let err = invoices.find_by_id(invoice.header.id).await.unwrap_err();
    assert!(err.is_not_found(Resource::Invoice));
}
