//! Tests for the SQLite-backed user store (UserService over SqliteUserRepository)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use userdb::application::services::UserService;
use userdb::application::ErrorKind;
use userdb::config::Settings;
use userdb::domain::UserId;
use userdb::infrastructure::{ServiceContainer, SqliteUserRepository, UserRepository};
use userdb::util::testing;

struct Store {
    _dir: TempDir,
    path: PathBuf,
}

#[fixture]
fn store() -> Store {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("users.db");
    Store { _dir: dir, path }
}

fn open(path: &Path) -> ServiceContainer {
    ServiceContainer::open(Settings::default().with_db_path(Some(path))).expect("open store")
}

fn email_count(path: &Path, email: &str) -> i64 {
    let conn = rusqlite::Connection::open(path).unwrap();
    conn.query_row(
        "SELECT count(*) FROM users WHERE email = ?1",
        [email],
        |row| row.get(0),
    )
    .unwrap()
}

#[rstest]
fn given_fresh_store_when_user_created_then_listed_with_generated_id(store: Store) {
    // Arrange
    let container = open(&store.path);

    // Act
    container.users.create_user("a@x.com", "alice").unwrap();
    let users = container.users.get_users(1).unwrap();

    // Assert
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "a@x.com");
    assert_eq!(users[0].username, "alice");
    assert!(!users[0].id.is_nil());
    container.close().unwrap();
}

#[rstest]
fn given_created_user_when_get_user_by_id_then_returns_it(store: Store) {
    let container = open(&store.path);
    let created = container.users.create_user("a@x.com", "alice").unwrap();

    let fetched = container.users.get_user(&created.id).unwrap();

    assert_eq!(fetched, created);
}

#[rstest]
fn given_existing_email_when_created_again_then_constraint_and_single_row(store: Store) {
    // Arrange
    let container = open(&store.path);
    container.users.create_user("a@x.com", "alice").unwrap();

    // Act
    let err = container
        .users
        .create_user("a@x.com", "alice")
        .unwrap_err();
    container.close().unwrap();

    // Assert
    assert_eq!(err.kind(), ErrorKind::Constraint);
    assert!(err.to_string().contains("UNIQUE constraint failed"));
    assert_eq!(email_count(&store.path, "a@x.com"), 1);
}

#[rstest]
fn given_unknown_id_when_get_user_then_not_found(store: Store) {
    let container = open(&store.path);
    container.users.create_user("a@x.com", "alice").unwrap();

    let err = container.users.get_user(&UserId::generate()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
fn given_empty_store_when_get_users_then_empty_not_error(store: Store) {
    let container = open(&store.path);
    assert!(container.users.get_users(10).unwrap().is_empty());
}

#[rstest]
#[case::zero_limit(3, 0, 0)]
#[case::limit_below_count(3, 1, 1)]
#[case::limit_equals_count(3, 3, 3)]
#[case::limit_above_count(2, 10, 2)]
fn given_rows_when_get_users_with_limit_then_returns_min(
    store: Store,
    #[case] rows: usize,
    #[case] limit: u32,
    #[case] expected: usize,
) {
    let container = open(&store.path);
    for i in 0..rows {
        container
            .users
            .create_user(&format!("user{i}@x.com"), &format!("user{i}"))
            .unwrap();
    }

    let users = container.users.get_users(limit).unwrap();

    assert_eq!(users.len(), expected);
}

#[rstest]
fn given_users_created_in_order_when_listed_then_creation_order(store: Store) {
    let container = open(&store.path);
    for name in ["zed", "amy", "mia"] {
        container
            .users
            .create_user(&format!("{name}@x.com"), name)
            .unwrap();
    }

    let names: Vec<String> = container
        .users
        .get_users(10)
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();

    assert_eq!(names, ["zed", "amy", "mia"]);
}

#[rstest]
fn given_closed_twice_when_reopened_then_data_intact(store: Store) {
    // Arrange
    let container = open(&store.path);
    let created = container.users.create_user("a@x.com", "alice").unwrap();

    // Act
    container.close().unwrap();
    container.close().unwrap();
    let reopened = open(&store.path);

    // Assert
    assert_eq!(reopened.users.get_user(&created.id).unwrap(), created);
    assert_eq!(reopened.users.get_users(10).unwrap().len(), 1);
}

#[rstest]
fn given_closed_store_when_used_then_connection_error(store: Store) {
    let container = open(&store.path);
    container.close().unwrap();

    let err = container.users.get_users(10).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Connection);
}

#[rstest]
fn given_non_database_file_when_opened_then_connection_error(store: Store) {
    std::fs::write(&store.path, "this is not a sqlite database, just some text padding it out")
        .unwrap();

    let err = SqliteUserRepository::open(&store.path)
        .err()
        .expect("open should fail");

    assert_eq!(err.kind(), ErrorKind::Connection);
}

#[rstest]
fn given_missing_parent_directory_when_opened_then_connection_error(store: Store) {
    let path = store.path.join("nested").join("users.db");

    let err = SqliteUserRepository::open(&path)
        .err()
        .expect("open should fail");

    assert_eq!(err.kind(), ErrorKind::Connection);
}

#[rstest]
fn given_repository_when_wired_manually_then_service_uses_it(store: Store) {
    let repo: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::open(&store.path).unwrap());
    let service = UserService::new(Arc::clone(&repo));

    service.create_user("b@x.com", "bob").unwrap();
    repo.close().unwrap();

    let reopened = open(&store.path);
    assert_eq!(reopened.users.get_users(10).unwrap()[0].username, "bob");
}
