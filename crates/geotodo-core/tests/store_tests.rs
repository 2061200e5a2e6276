mod common;

use common::{create_test_store, place_params, test_user, todo_params};
use geotodo_core::{
    models::{DateBucket, Priority, User},
    params::{CreateTodo, SetTodoDone},
    GeoTodoError, StoreBuilder, TodoStore,
};
use tempfile::TempDir;

#[tokio::test]
async fn test_builder_creates_missing_directories() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("deeper").join("geo.db");

    let store = StoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .unwrap();

    assert!(db_path.exists());
    assert_eq!(store.database_path(), db_path.as_path());
}

#[tokio::test]
async fn test_create_and_load_places() {
    let (_dir, store) = create_test_store().await;
    let user = test_user();

    let home = store
        .create_place(&user, &place_params("  Home ", 52.5, 13.4, Some(120.0)))
        .await
        .unwrap();
    let work = store
        .create_place(&user, &place_params("Work", 52.6, 13.5, Some(-1.0)))
        .await
        .unwrap();

    assert_eq!(home.name, "Home");
    assert_eq!(home.radius_meters, 120.0);
    assert_eq!(work.radius_meters, 300.0);
    assert_ne!(home.id, work.id);

    let places = store.load_places(&user).await.unwrap();
    assert_eq!(places, vec![home, work]);
}

#[tokio::test]
async fn test_create_place_rejects_invalid_input() {
    let (_dir, store) = create_test_store().await;
    let user = test_user();

    let err = store
        .create_place(&user, &place_params("Mars base", 120.0, 0.0, None))
        .await
        .unwrap_err();
    assert!(matches!(err, GeoTodoError::InvalidInput { .. }));

    let err = store
        .create_place(&user, &place_params("", 0.0, 0.0, None))
        .await
        .unwrap_err();
    assert!(matches!(err, GeoTodoError::InvalidInput { .. }));

    assert!(store.load_places(&user).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_todo_applies_defaults() {
    let (_dir, store) = create_test_store().await;
    let user = test_user();

    let todo = store
        .create_todo(&user, &todo_params("Buy stamps", None))
        .await
        .unwrap();

    assert_eq!(todo.action_type, "buy");
    assert_eq!(todo.date_bucket, DateBucket::ThisWeek);
    assert_eq!(todo.priority, Priority::default());
    assert!(!todo.is_done);

    let loaded = store.load_todos(&user).await.unwrap();
    assert_eq!(loaded, vec![todo]);
}

#[tokio::test]
async fn test_create_todo_with_all_fields() {
    let (_dir, store) = create_test_store().await;
    let user = test_user();
    let place = store
        .create_place(&user, &place_params("Garage", 1.0, 1.0, None))
        .await
        .unwrap();

    let todo = store
        .create_todo(
            &user,
            &CreateTodo {
                title: "Winter tires".to_string(),
                description: Some("Before November".to_string()),
                action_type: Some("visit".to_string()),
                date_bucket: Some(DateBucket::ThisMonth),
                priority: Some(5),
                tags: vec!["car".to_string(), " car ".to_string(), "seasonal".to_string()],
                place_id: Some(place.id.clone()),
            },
        )
        .await
        .unwrap();

    let loaded = store.load_todos(&user).await.unwrap();
    assert_eq!(loaded, vec![todo.clone()]);
    assert_eq!(todo.tags, vec!["car".to_string(), "seasonal".to_string()]);
    assert_eq!(todo.place_id, Some(place.id));
    assert_eq!(todo.priority, Priority::MAX);
}

#[tokio::test]
async fn test_create_todo_requires_known_place() {
    let (_dir, store) = create_test_store().await;
    let user = test_user();
    let other = User::new("someone-else");
    let foreign = store
        .create_place(&other, &place_params("Theirs", 0.0, 0.0, None))
        .await
        .unwrap();

    for place_id in ["missing", foreign.id.as_str()] {
        let err = store
            .create_todo(&user, &todo_params("Orphan", Some(place_id)))
            .await
            .unwrap_err();
        assert!(matches!(err, GeoTodoError::PlaceNotFound { ref id } if id == place_id));
    }
    assert!(store.load_todos(&user).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_set_todo_done() {
    let (_dir, store) = create_test_store().await;
    let user = test_user();
    let todo = store
        .create_todo(&user, &todo_params("Return parcel", None))
        .await
        .unwrap();

    let done = store
        .set_todo_done(&user, &SetTodoDone { id: todo.id.clone(), done: true })
        .await
        .unwrap();
    assert!(done.is_done);
    assert!(store.load_todos(&user).await.unwrap()[0].is_done);

    let err = store
        .set_todo_done(&user, &SetTodoDone { id: "nope".to_string(), done: true })
        .await
        .unwrap_err();
    assert!(matches!(err, GeoTodoError::TodoNotFound { .. }));
}

#[tokio::test]
async fn test_users_do_not_see_each_other() {
    let (_dir, store) = create_test_store().await;
    let alice = User::new("alice");
    let bob = User::new("bob");

    store
        .create_place(&alice, &place_params("Alice's", 0.0, 0.0, None))
        .await
        .unwrap();
    store
        .create_todo(&alice, &todo_params("Alice's todo", None))
        .await
        .unwrap();

    assert!(store.load_places(&bob).await.unwrap().is_empty());
    assert!(store.load_todos(&bob).await.unwrap().is_empty());
    assert_eq!(store.load_todos(&alice).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("persist.db");
    let user = test_user();

    {
        let store = StoreBuilder::new()
            .with_database_path(Some(&db_path))
            .build()
            .await
            .unwrap();
        store
            .create_todo(&user, &todo_params("Persist me", None))
            .await
            .unwrap();
    }

    let store = StoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .unwrap();
    let todos = store.load_todos(&user).await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, "Persist me");
}
