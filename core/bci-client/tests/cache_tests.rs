mod common;

use bci_cache::EntityKey;
use bci_client::queries::GetTasks;
use bci_client::{DataSource, FetchPolicy, QueryOptions, TasksVariables};
use bci_link::link::mock::ScriptedLink;
use common::{ok, scripted_client, task, unavailable};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn pending() -> TasksVariables {
    TasksVariables {
        status: Some("pending".to_string()),
        ..TasksVariables::default()
    }
}

fn limited() -> TasksVariables {
    TasksVariables {
        limit: Some(5),
        ..TasksVariables::default()
    }
}

// ── Entity identity ─────────────────────────────────────────────

#[tokio::test]
async fn two_reads_of_one_entity_converge_on_one_record() {
    let script = Arc::new(ScriptedLink::sequence(
        vec![
            ok(json!({"tasks": [task("t1", "pending", &["a", "b"])]})),
            ok(json!({"tasks": [task("t1", "in_progress", &["c"])]})),
        ],
        unavailable(),
    ));
    let client = scripted_client(&script);

    let first = client.tasks(&pending()).await;
    assert_eq!(first.data.unwrap()[0].tags, vec!["a", "b"]);

    let second = client.tasks(&limited()).await;
    assert_eq!(second.source, DataSource::Network);
    assert_eq!(second.data.unwrap()[0].tags, vec!["c"]);

    assert_eq!(client.cache().entity_keys(), vec![EntityKey::new("Task", "t1")]);
    let entity = client.cache().read_entity(&EntityKey::new("Task", "t1")).unwrap();
    assert_eq!(entity["tags"], json!(["c"]));
    assert_eq!(entity["status"], "in_progress");

    // The earlier query now resolves to the same, latest entity.
    let options = QueryOptions::new().fetch_policy(FetchPolicy::CacheFirst);
    let revisited = client.query_with::<GetTasks>(&pending(), options).await;
    assert_eq!(revisited.source, DataSource::Cache);
    let revisited = revisited.data.unwrap();
    assert_eq!(revisited[0].status, "in_progress");
    assert_eq!(revisited[0].tags, vec!["c"]);
    assert_eq!(script.call_count(), 2);
}

#[tokio::test]
async fn cache_and_network_hit_returns_cached_entity_while_loading() {
    let script = Arc::new(ScriptedLink::always(ok(json!({
        "tasks": [task("t1", "pending", &["a"])]
    }))));
    let client = scripted_client(&script);

    client.tasks(&pending()).await;
    let hit = client.tasks(&pending()).await;

    assert_eq!(hit.source, DataSource::Cache);
    assert!(hit.loading);
    assert!(hit.error.is_none());
    assert_eq!(hit.data.unwrap()[0].id, "t1");
}

#[tokio::test(start_paused = true)]
async fn background_refresh_success_clears_demo_mode() {
    let tasks = || ok(json!({"tasks": [task("t1", "pending", &["a"])]}));
    let script = Arc::new(ScriptedLink::sequence(vec![tasks(), unavailable()], tasks()));
    let client = scripted_client(&script);

    client.tasks(&pending()).await;
    assert!(client.tasks(&limited()).await.is_mock());
    assert!(client.is_demo_mode());

    let hit = client.tasks(&pending()).await;
    assert_eq!(hit.source, DataSource::Cache);
    assert!(hit.loading);

    for _ in 0..100 {
        if !client.is_demo_mode() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;
    }
    assert!(!client.is_demo_mode());
    assert_eq!(script.call_count(), 3);
}

#[tokio::test]
async fn failed_reads_write_nothing() {
    let script = Arc::new(ScriptedLink::always(unavailable()));
    let client = scripted_client(&script);

    let result = client.tasks(&pending()).await;

    assert!(result.is_mock());
    assert_eq!(client.cache().entity_count(), 0);
    assert!(client.cache().snapshot().is_empty());
}

#[tokio::test]
async fn undecodable_cache_entry_is_treated_as_a_miss() {
    let script = Arc::new(ScriptedLink::always(unavailable()));
    let client = scripted_client(&script);
    client
        .cache()
        .write_query("tasks", &json!({"status": "pending"}), &json!([{"id": 7}]));

    let result = client.tasks(&pending()).await;

    assert!(result.is_mock());
    assert_eq!(script.call_count(), 1);
}

#[tokio::test]
async fn reset_forgets_cached_results() {
    let script = Arc::new(ScriptedLink::sequence(
        vec![ok(json!({"tasks": [task("t1", "pending", &[])]}))],
        unavailable(),
    ));
    let client = scripted_client(&script);
    client.tasks(&pending()).await;

    client.cache().reset();

    let after = client.tasks(&pending()).await;
    assert!(after.is_mock());
    assert!(client.is_demo_mode());
}
