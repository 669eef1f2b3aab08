#![allow(clippy::unwrap_used)]

use predicates::prelude::*;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::test_context::TestContext;

fn task_json(id: &str, title: &str, priority: &str, completed: bool, day: u32) -> Value {
    let completed_at = completed.then(|| format!("2024-03-{:02}T12:00:00.000Z", day));
    json!({
        "_id": id,
        "title": title,
        "description": "",
        "priority": priority,
        "completed": completed,
        "createdAt": format!("2024-03-{:02}T10:00:00.000Z", day),
        "completedAt": completed_at,
    })
}

fn sample_tasks() -> Value {
    json!([
        task_json("t3", "Write report", "High", false, 16),
        task_json("t2", "Buy milk", "Low", true, 15),
        task_json("t1", "Call bob", "Medium", false, 14),
    ])
}

/// Logged-in context against a mock server already serving `GET /api/tasks`
async fn setup(tasks: Value) -> (MockServer, TestContext) {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tasks))
        .mount(&server)
        .await;

    let ctx = TestContext::with_api(&format!("{}/api", server.uri()));
    ctx.login("secret");
    (server, ctx)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_json() {
    let (_server, ctx) = setup(sample_tasks()).await;

    let output = ctx
        .command()
        .args(["list", "--output", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["filtered_count"], 3);
    assert_eq!(value["total_pages"], 1);
    assert_eq!(value["tasks"][0]["_id"], "t3");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_filters() {
    let (_server, ctx) = setup(sample_tasks()).await;

    ctx.command()
        .args(["list", "--output", "plain", "--status", "pending", "--priority", "medium"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Call bob")
                .and(predicate::str::contains("Write report").not())
                .and(predicate::str::contains("Page 1 of 1 (1 tasks, 5 per page)")),
        );

    ctx.command()
        .args(["list", "--output", "plain", "--from", "2024-03-15", "--to", "2024-03-15"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Buy milk")
                .and(predicate::str::contains("Call bob").not()),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_pages() {
    let tasks: Vec<Value> = (0..12)
        .map(|i| task_json(&format!("t{}", i), &format!("Task {}", i), "Low", false, 16))
        .collect();
    let (_server, ctx) = setup(Value::Array(tasks)).await;

    ctx.command()
        .args(["list", "--output", "plain", "--page", "3"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Task 10")
                .and(predicate::str::contains("Task 11"))
                .and(predicate::str::contains("Task 9").not())
                .and(predicate::str::contains("Page 3 of 3 (12 tasks, 5 per page) [prev]")),
        );

    ctx.command()
        .args(["list", "--output", "plain", "--page", "2", "--per-page", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 2 of 2 (12 tasks, 10 per page)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_empty() {
    let (_server, ctx) = setup(json!([])).await;

    ctx.command()
        .args(["list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("No tasks found.")
                .and(predicate::str::contains("Page 1 of 0")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_task() {
    let (server, ctx) = setup(json!([])).await;

    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .and(body_json(json!({
            "title": "Buy milk",
            "description": "two liters",
            "priority": "High"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(task_json("new", "Buy milk", "High", false, 16)),
        )
        .expect(1)
        .mount(&server)
        .await;

    ctx.command()
        .args(["add", "-d", "two liters", "-p", "high", "Buy", "milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added successfully (new)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_rejected_by_server() {
    let (server, ctx) = setup(json!([])).await;

    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"msg": "Title too long"})))
        .mount(&server)
        .await;

    ctx.command()
        .args(["add", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Title too long"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_done_and_delete() {
    let (server, ctx) = setup(sample_tasks()).await;

    Mock::given(method("PUT"))
        .and(path("/api/tasks/t1"))
        .and(body_json(json!({"completed": true})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(task_json("t1", "Call bob", "Medium", true, 14)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/tasks/t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"msg": "Task removed"})))
        .expect(1)
        .mount(&server)
        .await;

    ctx.command()
        .args(["done", "t1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task completed successfully (t1)"));

    ctx.command()
        .args(["delete", "-y", "t2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task deleted successfully"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_toggle_completed_task() {
    let (server, ctx) = setup(sample_tasks()).await;

    Mock::given(method("PUT"))
        .and(path("/api/tasks/t2"))
        .and(body_json(json!({"completed": false})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(task_json("t2", "Buy milk", "Low", false, 15)),
        )
        .expect(1)
        .mount(&server)
        .await;

    ctx.command()
        .args(["toggle", "t2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task marked as pending (t2)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_clear_completed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_tasks()))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json("t3", "Write report", "High", false, 16),
            task_json("t1", "Call bob", "Medium", false, 14),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/tasks/clear"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"msg": "Cleared"})))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = TestContext::with_api(&format!("{}/api", server.uri()));
    ctx.login("secret");

    ctx.command()
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 completed tasks"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_expired_token_logs_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"msg": "Token is not valid"})))
        .mount(&server)
        .await;

    let ctx = TestContext::with_api(&format!("{}/api", server.uri()));
    ctx.login("stale");
    assert!(ctx.token_path().exists());

    ctx.command()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Session expired, please log in again"));

    assert!(!ctx.token_path().exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_keeps_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let ctx = TestContext::with_api(&format!("{}/api", server.uri()));
    ctx.login("secret");

    ctx.command()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load tasks"));

    assert!(ctx.token_path().exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_flags_after_title() {
    let (server, ctx) = setup(json!([])).await;

    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .and(body_json(json!({
            "title": "Buy milk",
            "description": "",
            "priority": "Medium"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(task_json("new", "Buy milk", "Medium", false, 16)),
        )
        .expect(1)
        .mount(&server)
        .await;

    ctx.command()
        .args(["add", "Buy", "milk", "-p", "medium"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added successfully (new)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_cannot_target_clear_route() {
    let (server, ctx) = setup(sample_tasks()).await;

    Mock::given(method("DELETE"))
        .and(path("/api/tasks/clear"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"msg": "Cleared"})))
        .expect(0)
        .mount(&server)
        .await;

    ctx.command()
        .args(["delete", "-y", "clear"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid task id 'clear'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_expired_token_during_clear_logs_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_tasks()))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"msg": "Token is not valid"})))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/tasks/clear"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"msg": "Cleared"})))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = TestContext::with_api(&format!("{}/api", server.uri()));
    ctx.login("secret");

    ctx.command()
        .args(["clear", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Session expired, please log in again"));

    assert!(!ctx.token_path().exists());
}
