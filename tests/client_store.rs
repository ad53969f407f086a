use taskflow::application::board_service::BoardServiceImpl;
use taskflow::client::ClientError;
use taskflow::client::api::ApiClient;
use taskflow::client::cache::SnapshotCache;
use taskflow::client::store::{BoardStore, default_categories};
use taskflow::domain::category::Category;
use taskflow::domain::repository::BoardRepository;
use taskflow::domain::task::Task;
use taskflow::http::routes::AppState;
use taskflow::http::routing;
use taskflow::infrastructure::sqlite_repo::SqliteBoardRepository;
use tempfile::TempDir;

/// Spin up the real server on an ephemeral port; returns its base URL.
async fn spawn_server() -> (String, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
    let repo = SqliteBoardRepository::connect(&url).await.unwrap();
    repo.init().await.unwrap();
    let service = BoardServiceImpl::new(repo);
    let app = routing::app(AppState { service });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), dir)
}

fn store_for(base_url: &str, cache_dir: &std::path::Path) -> BoardStore {
    BoardStore::new(ApiClient::new(base_url), SnapshotCache::new(cache_dir))
}

#[tokio::test]
async fn saved_task_round_trips_field_for_field() {
    let (base_url, _db) = spawn_server().await;
    let cache = tempfile::tempdir().unwrap();
    let mut store = store_for(&base_url, cache.path());

    let task = Task::new(
        "Write report",
        Some("quarterly numbers".into()),
        Some("cat-1".into()),
        Some("2026-09-01".into()),
    );
    store.save_task(task.clone()).await.unwrap();

    assert_eq!(store.tasks(), [task]);
}

#[tokio::test]
async fn empty_title_is_rejected_before_any_request() {
    let (base_url, _db) = spawn_server().await;
    let cache = tempfile::tempdir().unwrap();
    let mut store = store_for(&base_url, cache.path());

    let err = store
        .save_task(Task::new("   ", None, None, None))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::EmptyTitle));

    store.refresh().await;
    assert!(store.tasks().is_empty());
}

#[tokio::test]
async fn empty_category_name_is_rejected() {
    let (base_url, _db) = spawn_server().await;
    let cache = tempfile::tempdir().unwrap();
    let mut store = store_for(&base_url, cache.path());

    let err = store
        .save_category(Category::new("", "#3b82f6"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::EmptyName));
}

#[tokio::test]
async fn category_with_tasks_cannot_be_deleted() {
    let (base_url, _db) = spawn_server().await;
    let cache = tempfile::tempdir().unwrap();
    let mut store = store_for(&base_url, cache.path());

    let category = Category::new("Work", "#3b82f6");
    store.save_category(category.clone()).await.unwrap();
    store
        .save_task(Task::new("t", None, Some(category.id.clone()), None))
        .await
        .unwrap();

    let err = store.delete_category(&category.id).await.unwrap_err();
    assert!(matches!(err, ClientError::CategoryInUse(_)));
    // nothing was deleted
    store.refresh().await;
    assert!(store.categories().iter().any(|c| c.id == category.id));

    // once the task is gone the category can go too
    let task_id = store.tasks()[0].id.clone();
    store.delete_task(&task_id).await.unwrap();
    store.delete_category(&category.id).await.unwrap();
    assert!(store.categories().iter().all(|c| c.id != category.id));
}

#[tokio::test]
async fn empty_server_yields_default_category_seed() {
    let (base_url, _db) = spawn_server().await;
    let cache = tempfile::tempdir().unwrap();
    let mut store = store_for(&base_url, cache.path());

    store.refresh().await;
    assert_eq!(store.categories(), default_categories());
    assert!(store.tasks().is_empty());
}

#[tokio::test]
async fn fetch_failure_falls_back_to_last_snapshot() {
    let (base_url, _db) = spawn_server().await;
    let cache = tempfile::tempdir().unwrap();

    // Prime the snapshot through a working connection.
    let mut store = store_for(&base_url, cache.path());
    let category = Category::new("Work", "#3b82f6");
    store.save_category(category.clone()).await.unwrap();
    let task = Task::new("offline me", None, Some(category.id.clone()), None);
    store.save_task(task.clone()).await.unwrap();

    // Same cache dir, unreachable backend: reads serve the stale snapshot.
    let mut offline = store_for("http://127.0.0.1:9", cache.path());
    offline.refresh().await;
    assert_eq!(offline.tasks(), [task]);
    assert_eq!(offline.categories(), [category]);
}

#[tokio::test]
async fn no_snapshot_and_no_server_yields_seed_and_empty_tasks() {
    let cache = tempfile::tempdir().unwrap();
    let mut offline = store_for("http://127.0.0.1:9", cache.path());
    offline.refresh().await;
    assert!(offline.tasks().is_empty());
    assert_eq!(offline.categories(), default_categories());
}
