//! Postgres-backed store tests.
//!
//! Run with a scratch database:
//! `DATABASE_URL=postgres://... cargo test -p eduhub-database -- --ignored --test-threads=1`

use std::sync::Arc;

use sqlx::PgPool;

use eduhub_core::types::ListQuery;
use eduhub_database::migration::run_migrations;
use eduhub_database::repositories::PgPrincipalRepository;
use eduhub_database::store::PrincipalStore;
use eduhub_entity::{NewPrincipal, PrincipalProfile, Role};

async fn connect() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for postgres tests");
    let pool = PgPool::connect(&url).await.expect("Failed to connect");
    run_migrations(&pool).await.expect("Failed to run migrations");
    sqlx::query("TRUNCATE student_payment, teacher, support_teacher, student, administration, manager CASCADE")
        .execute(&pool)
        .await
        .expect("Failed to truncate");
    pool
}

fn new_principal(name: &str) -> NewPrincipal {
    NewPrincipal {
        fullname: name.to_string(),
        phone: "+998935550011".to_string(),
        password_hash: "hash".to_string(),
        branch_id: None,
        profile: PrincipalProfile {
            salary: Some(4_500_000),
            ..Default::default()
        },
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_creates_never_duplicate_logins() {
    let pool = connect().await;
    let repo = Arc::new(PgPrincipalRepository::new(pool, Role::Administration).unwrap());

    let tasks = (0..25).map(|i| {
        let repo = Arc::clone(&repo);
        tokio::spawn(async move { repo.create(&new_principal(&format!("Admin {i}"))).await })
    });

    let mut logins: Vec<String> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap().unwrap().login)
        .collect();
    logins.sort();
    logins.dedup();

    assert_eq!(logins.len(), 25);
    assert_eq!(logins[0], "A00001");
    assert_eq!(repo.get_last_login().await.unwrap(), "A00025");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_soft_delete_hides_row_but_keeps_sequence() {
    let pool = connect().await;
    let repo = PgPrincipalRepository::new(pool, Role::Manager).unwrap();

    let first = repo.create(&new_principal("Manager one")).await.unwrap();
    assert!(repo.delete(first.id).await.unwrap());
    assert!(repo.get_by_login(&first.login).await.unwrap().is_none());
    assert_eq!(repo.get_list(&ListQuery::default()).await.unwrap().total_items, 0);

    let second = repo.create(&new_principal("Manager two")).await.unwrap();
    assert_eq!(first.login, "M00001");
    assert_eq!(second.login, "M00002");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_staff_report_accrues_salary() {
    let pool = connect().await;
    let repo = PgPrincipalRepository::new(pool, Role::Administration).unwrap();
    repo.create(&new_principal("Fresh hire")).await.unwrap();

    let report = repo.get_report_list(&ListQuery::default()).await.unwrap();
    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].total, 0);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_search_treats_wildcards_literally() {
    let pool = connect().await;
    let repo = PgPrincipalRepository::new(pool, Role::Teacher).unwrap();
    repo.create(&new_principal("Nodir_Usmonov")).await.unwrap();
    repo.create(&new_principal("NodirXUsmonov")).await.unwrap();

    let query = ListQuery {
        search: Some("r_U".to_string()),
        ..Default::default()
    };
    let page = repo.get_list(&query).await.unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].fullname, "Nodir_Usmonov");
}
