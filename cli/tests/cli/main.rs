#![allow(clippy::unwrap_used)]

use predicates::prelude::{
    predicate::str::{contains, is_empty},
    PredicateBooleanExt,
};

mod task_operations;
pub mod test_context;

use test_context::TestContext;

#[test]
fn test_profile_env() {
    let ctx = TestContext::new();

    ctx.command()
        .arg("config")
        .assert()
        .success()
        .stdout(
            contains(format!(r#""profile_name": "{}""#, ctx.profile_name))
                .and(contains(r#""api_url": "http://localhost:5000/api""#))
                .and(contains(r#""profile_exists": false"#)),
        )
        .stderr(is_empty());
}

#[test]
fn test_api_url_flag_overrides_profile() {
    let ctx = TestContext::with_api("http://profile.example/api");

    ctx.command()
        .args(["--api-url", "http://flag.example/api/", "config"])
        .assert()
        .success()
        .stdout(
            contains(r#""api_url": "http://flag.example/api""#)
                .and(contains(r#""profile_exists": true"#)),
        );
}

#[test]
fn test_list_requires_login() {
    let ctx = TestContext::new();

    ctx.command()
        .arg("list")
        .assert()
        .failure()
        .stderr(contains("Not logged in"));
}

#[test]
fn test_login_and_logout() {
    let ctx = TestContext::new();

    ctx.login("secret");
    assert_eq!(std::fs::read_to_string(ctx.token_path()).unwrap(), "secret");

    ctx.command()
        .arg("logout")
        .assert()
        .success()
        .stdout(contains("Logged out."));
    assert!(!ctx.token_path().exists());

    ctx.command()
        .arg("logout")
        .assert()
        .success()
        .stdout(contains("Not logged in."));
}

#[test]
fn test_theme_toggle_persists() {
    let ctx = TestContext::new();

    ctx.command()
        .arg("theme")
        .assert()
        .success()
        .stdout("light\n");

    ctx.command()
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout(contains("Theme set to dark"));

    assert_eq!(std::fs::read_to_string(ctx.theme_path()).unwrap(), "dark");

    ctx.command()
        .arg("theme")
        .assert()
        .success()
        .stdout("dark\n");
}

#[test]
fn test_invalid_page_size() {
    let ctx = TestContext::new();

    ctx.command()
        .args(["list", "--per-page", "7"])
        .assert()
        .failure();
}

#[test]
fn test_completions() {
    let ctx = TestContext::new();

    ctx.command()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(contains("taskdeck"));
}
