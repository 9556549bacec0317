// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: login and logout drive what the route guard allows.
//!
//! The first group wires the library stack over a session file; the second
//! runs the `purrview` binary against a mock auth API.

use std::path::Path;
use std::process::Output;
use std::sync::Arc;

use purrview_core::KeyValueStore;
use purrview_session::{FileStore, GuardDecision, RouteGuard, SessionStore};
use purrview_test_utils::{MockAuthApi, TestHarness};
use tokio::process::Command;

fn file_store(path: &Path) -> Arc<dyn KeyValueStore> {
    Arc::new(FileStore::open(path).unwrap())
}

// ---- Library stack over a session file ----

#[tokio::test]
async fn login_opens_protected_routes_and_closes_login() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let h = TestHarness::builder()
        .with_store(file_store(&path))
        .build()
        .await
        .unwrap();

    assert!(!h.guard.check("/profile").is_allowed());
    assert!(h.guard.check("/login").is_allowed());

    h.login().await.unwrap();

    assert!(h.guard.check("/profile").is_allowed());
    assert_eq!(
        h.guard.check("/login"),
        GuardDecision::Deny {
            redirect_to: "/profile".into()
        }
    );

    h.auth.logout();

    assert_eq!(
        h.guard.check("/profile"),
        GuardDecision::Deny {
            redirect_to: "/login".into()
        }
    );
    assert!(h.guard.check("/login").is_allowed());
}

#[tokio::test]
async fn persisted_session_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let h = TestHarness::builder()
        .with_store(file_store(&path))
        .build()
        .await
        .unwrap();
    h.login().await.unwrap();

    // A second stack over the same file sees the session without any call.
    let reopened = Arc::new(SessionStore::new(file_store(&path)));
    let guard = RouteGuard::new(Arc::clone(&reopened), &h.config.routes);
    assert!(guard.check("/cats").is_allowed());
    assert_eq!(reopened.current_user().as_ref(), Some(h.auth_api.user()));

    h.auth.logout();
    let after_logout = Arc::new(SessionStore::new(file_store(&path)));
    assert!(!after_logout.is_authenticated());
    assert!(!after_logout.has_any_auth_key());
}

// ---- The binary ----

struct Cli {
    config_path: std::path::PathBuf,
    _dir: tempfile::TempDir,
}

impl Cli {
    fn new(api: &MockAuthApi) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("purrview.toml");
        let session_path = dir.path().join("session.json");
        let toml = format!(
            "[auth]\nbase_url = \"{uri}\"\n\n[catalog]\nbase_url = \"{uri}\"\n\n[storage]\nsession_path = \"{session}\"\n",
            uri = api.uri(),
            session = session_path.display(),
        );
        std::fs::write(&config_path, toml).unwrap();
        Self {
            config_path,
            _dir: dir,
        }
    }

    async fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_purrview"))
            .env_clear()
            .env("PURRVIEW_PASSWORD", purrview_test_utils::mock_auth::MOCK_PASSWORD)
            .env("RUST_LOG", "off")
            .arg("--config")
            .arg(&self.config_path)
            .args(args)
            .output()
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn binary_guards_commands_by_session() {
    let api = MockAuthApi::start().await;
    let cli = Cli::new(&api);

    let denied = cli.run(&["profile"]).await;
    assert_eq!(denied.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&denied.stderr).contains("/login"));

    let login = cli
        .run(&["login", purrview_test_utils::mock_auth::MOCK_EMAIL])
        .await;
    assert!(login.status.success(), "{login:?}");

    let profile = cli.run(&["profile", "--json"]).await;
    assert!(profile.status.success(), "{profile:?}");
    let user: serde_json::Value = serde_json::from_slice(&profile.stdout).unwrap();
    assert_eq!(user["email"], purrview_test_utils::mock_auth::MOCK_EMAIL);

    let again = cli
        .run(&["login", purrview_test_utils::mock_auth::MOCK_EMAIL])
        .await;
    assert_eq!(again.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&again.stderr).contains("/profile"));

    assert!(cli.run(&["logout"]).await.status.success());
    assert_eq!(cli.run(&["profile"]).await.status.code(), Some(2));
}

#[tokio::test]
async fn binary_reports_wrong_password() {
    let api = MockAuthApi::start().await;
    let cli = Cli::new(&api);

    let output = Command::new(env!("CARGO_BIN_EXE_purrview"))
        .env_clear()
        .env("PURRVIEW_PASSWORD", "wrong")
        .env("RUST_LOG", "off")
        .arg("--config")
        .arg(&cli.config_path)
        .args(["login", purrview_test_utils::mock_auth::MOCK_EMAIL])
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid credentials"));
}

#[tokio::test]
async fn status_json_lists_both_adapters() {
    let api = MockAuthApi::start().await;
    let cli = Cli::new(&api);

    let output = cli.run(&["status", "--json"]).await;
    assert!(output.status.success(), "{output:?}");
    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["authenticated"], false);
    let kinds: Vec<&str> = status["adapters"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|a| a["kind"].as_str())
        .collect();
    assert_eq!(kinds, vec!["Auth", "Catalog"]);
}
