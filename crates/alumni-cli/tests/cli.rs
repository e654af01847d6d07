//! CLI integration tests against a mock alumni API.

mod common;

use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{run_cli_with_env, run_cli_with_env_success};

fn api_url(server: &MockServer) -> String {
    format!("http://127.0.0.1:{}/api", server.address().port())
}

fn home(temp: &TempDir) -> PathBuf {
    let home = temp.path().join("home");
    std::fs::create_dir_all(&home).unwrap();
    home
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "ada@example.edu", "password": "secret123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "cli-token",
            "user": {"_id": "m1", "firstName": "Ada", "lastName": "Lovelace"}
        })))
        .mount(server)
        .await;
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run(args: &[&str], home: &PathBuf, api: &str) -> std::process::Output {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let home = home.clone();
    let api = api.to_string();
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli_with_env(&args, &home, &api)
    })
    .await
    .unwrap()
}

async fn run_success(args: &[&str], home: &PathBuf, api: &str) -> String {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let home = home.clone();
    let api = api.to_string();
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli_with_env_success(&args, &home, &api)
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_whoami_logout() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let temp = TempDir::new().unwrap();
    let home = home(&temp);
    let api = api_url(&server);

    let stdout = run_success(
        &["login", "--email", "ada@example.edu", "--password", "secret123"],
        &home,
        &api,
    )
    .await;
    assert!(stdout.contains("Logged in successfully"));
    assert!(stdout.contains("m1"));

    let stdout = run_success(&["whoami"], &home, &api).await;
    assert!(stdout.contains("m1"));
    assert!(stdout.contains("/api"));

    let stdout = run_success(&["logout"], &home, &api).await;
    assert!(stdout.contains("Logged out"));

    let output = run(&["whoami"], &home, &api).await;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("alumni login"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_with_wrong_password_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "nope"})))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let home = home(&temp);

    let output = run(
        &["login", "--email", "ada@example.edu", "--password", "wrong"],
        &home,
        &api_url(&server),
    )
    .await;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid credentials"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_groups_list_filters_fetched_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/groups"))
        .and(query_param("page", "1"))
        .and(query_param("size", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [
                {"_id": "g1", "name": "Rust Guild", "memberCount": 12, "isPrivate": false},
                {"_id": "g2", "name": "Chess Club", "memberCount": 4, "isPrivate": false}
            ],
            "total": 3
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/groups"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [
                {"_id": "g3", "name": "rustaceans abroad", "memberCount": 3, "isPrivate": true}
            ],
            "total": 3
        })))
        .expect(1)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let home = home(&temp);

    let output = run(
        &["groups", "list", "--all", "--search", "RUST", "--page-size", "2"],
        &home,
        &api_url(&server),
    )
    .await;

    assert!(
        output.status.success(),
        "groups list failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Rust Guild"));
    assert!(stdout.contains("rustaceans abroad"));
    assert!(!stdout.contains("Chess Club"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("2 shown, 3 fetched of 3 groups"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_single_page_reports_more_available() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [
                {"_id": "j1", "title": "Backend Engineer", "company": "Acme", "type": "job"},
                {"_id": "j2", "title": "Data Intern", "company": "Initech", "type": "internship"}
            ],
            "total": 5
        })))
        .expect(1)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let home = home(&temp);

    let output = run(
        &["jobs", "list", "--type", "internship", "--json", "--page-size", "2"],
        &home,
        &api_url(&server),
    )
    .await;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["_id"], "j2");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("More available: rerun with --pages 2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_mutations_send_stored_token() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/groups/g1/join"))
        .and(header("authorization", "Bearer cli-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/members/m2/follow"))
        .and(header("authorization", "Bearer cli-token"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let home = home(&temp);
    let api = api_url(&server);

    run_success(
        &["login", "--email", "ada@example.edu", "--password", "secret123"],
        &home,
        &api,
    )
    .await;

    let stdout = run_success(&["groups", "join", "g1"], &home, &api).await;
    assert!(stdout.contains("Joined group g1"));

    let stdout = run_success(&["members", "follow", "m2"], &home, &api).await;
    assert!(stdout.contains("Following m2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_mutation_without_session_fails() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let home = home(&temp);

    let output = run(&["groups", "leave", "g1"], &home, &api_url(&server)).await;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No active session"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_missing_member() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/members/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"})))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let home = home(&temp);

    let output = run(&["members", "show", "ghost"], &home, &api_url(&server)).await;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("members 'ghost' not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_token_stays_with_issuing_api() {
    let issuer = MockServer::start().await;
    mount_login(&issuer).await;
    let other = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{"_id": "g9", "name": "Elsewhere", "memberCount": 1, "isPrivate": false}],
            "total": 1
        })))
        .mount(&other)
        .await;
    let temp = TempDir::new().unwrap();
    let home = home(&temp);
    let issuer_api = api_url(&issuer);
    let other_api = api_url(&other);

    run_success(
        &["login", "--email", "ada@example.edu", "--password", "secret123"],
        &home,
        &issuer_api,
    )
    .await;

    // Public reads against another API go out signed out.
    let stdout = run_success(&["groups", "list", "--api", &other_api], &home, &issuer_api).await;
    assert!(stdout.contains("Elsewhere"));
    let requests = other.received_requests().await.unwrap();
    assert!(!requests.is_empty());
    assert!(
        requests
            .iter()
            .all(|r| r.headers.get("authorization").is_none())
    );

    // Anything needing the session refuses to run there.
    let output = run(&["groups", "join", "g9", "--api", &other_api], &home, &issuer_api).await;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Session belongs to"));
    assert!(stderr.contains(&issuer_api));
    assert_eq!(other.received_requests().await.unwrap().len(), requests.len());

    // Without an override the session still reports its own API.
    let stdout = run_success(&["whoami"], &home, &issuer_api).await;
    assert!(stdout.contains(&issuer_api));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_all_pages_stops_at_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/groups"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [
                {"_id": "g1", "name": "Rust Guild", "memberCount": 12, "isPrivate": false},
                {"_id": "g2", "name": "Chess Club", "memberCount": 4, "isPrivate": false}
            ],
            "total": 100
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/groups"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"records": [], "total": 100})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/groups"))
        .and(query_param("page", "3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"records": [], "total": 100})),
        )
        .expect(0)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let home = home(&temp);

    let output = run(
        &["groups", "list", "--all", "--page-size", "2"],
        &home,
        &api_url(&server),
    )
    .await;

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("2 shown, 2 fetched of 100 groups"));
    assert!(!stderr.contains("More available"));
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn test_session_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let server = MockServer::start().await;
    mount_login(&server).await;
    let temp = TempDir::new().unwrap();
    let home = home(&temp);

    run_success(
        &["login", "--email", "ada@example.edu", "--password", "secret123"],
        &home,
        &api_url(&server),
    )
    .await;

    let file = home.join("data").join("alumni").join("session.json");
    let mode = std::fs::metadata(&file).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
