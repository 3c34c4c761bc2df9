use hearth::repository::{database, KeyValueStorage, Repository};
use hearth::services::search_controller::{SearchController, SEARCH_KEY};
use hearth::services::{HouseApp, Intent};
use hearth::test_helpers::TestContext;

#[tokio::test]
async fn test_search_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("hearth.db");
    let db_path = db_path.to_str().unwrap();

    {
        let pool = database::init_database(db_path).await.unwrap();
        let repository = Repository::new(pool.clone());
        let mut app = HouseApp::init(repository.storage()).await.unwrap();

        app.apply(Intent::QueryChanged("Belg".into())).await.unwrap();
        pool.close().await;
    }

    // Simulate an application restart
    {
        let pool = database::init_database(db_path).await.unwrap();
        let repository = Repository::new(pool.clone());
        let controller = SearchController::init(repository.storage()).await.unwrap();

        assert_eq!(controller.query(), "Belg");
        assert_eq!(
            repository.kv.get(SEARCH_KEY).await.unwrap(),
            Some("Belg".to_string())
        );
        pool.close().await;
    }
}

#[tokio::test]
async fn test_first_mount_writes_empty_search() {
    let pool = database::init_test_database().await.unwrap();
    let repository = Repository::new(pool);

    assert_eq!(repository.kv.get(SEARCH_KEY).await.unwrap(), None);
    HouseApp::init(repository.storage()).await.unwrap();
    assert_eq!(
        repository.kv.get(SEARCH_KEY).await.unwrap(),
        Some(String::new())
    );
}

#[tokio::test]
async fn test_every_keystroke_is_written_in_order() {
    let context = TestContext::new_for_test();
    let mut app = context.mount().await.unwrap();

    for text in ["n", "ne", "net", "ne"] {
        app.on_query_change(text).await.unwrap();
    }

    let writes: Vec<String> = context
        .storage
        .write_log()
        .into_iter()
        .filter(|(key, _)| key == SEARCH_KEY)
        .map(|(_, value)| value)
        .collect();
    assert_eq!(writes, vec!["", "n", "ne", "net", "ne"]);

    let remounted = context.mount().await.unwrap();
    assert_eq!(remounted.query(), "ne");
}
