mod common;

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use common::{Recorded, github_ok, spawn_github};
use predicates::str::contains;
use tempfile::tempdir;

fn action_cmd(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kodegen_release_action").expect("binary");
    cmd.current_dir(workdir)
        .env_remove("GH_TOKEN")
        .env_remove("GITHUB_TOKEN")
        .env("NO_COLOR", "1");
    cmd
}

fn repo_args(host: &str) -> Vec<String> {
    [
        "--token", "T", "--host", host, "--upload-host", host, "--secure", "false", "--owner",
        "acme", "--repository", "app",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[test]
fn options_command_lists_schema() {
    let td = tempdir().expect("tempdir");
    action_cmd(td.path())
        .arg("options")
        .assert()
        .success()
        .stdout(contains("Git Hub Release (github-release)"))
        .stdout(contains("api-host <text>"))
        .stdout(contains("asset <list>"));
}

#[test]
fn rollback_without_saved_context_is_noop() {
    let td = tempdir().expect("tempdir");
    action_cmd(td.path())
        .args(["rollback", "--owner", "acme", "--repository", "app"])
        .assert()
        .success()
        .stdout(contains("nothing to roll back"));
}

#[test]
fn release_without_token_fails_before_any_request() {
    let td = tempdir().expect("tempdir");
    action_cmd(td.path())
        .args(["release", "--owner", "acme", "--repository", "app", "--name", "v1"])
        .assert()
        .failure()
        .stderr(contains("Missing required option 'token'"))
        .stdout(contains("Re-running with the same inputs will fail the same way"));
    assert!(!td.path().join(".github_release_context.json").exists());
}

#[test]
fn release_reads_config_file() {
    let td = tempdir().expect("tempdir");
    let server = spawn_github(1, github_ok);
    fs::write(
        td.path().join("release.toml"),
        format!(
            "token = \"T\"\nhost = \"{host}\"\nupload-host = \"{host}\"\nsecure = false\n\
             owner = \"acme\"\nrepository = \"app\"\nname = \"Release {{{{version}}}}\"\n",
            host = server.host
        ),
    )
    .expect("write config");

    action_cmd(td.path())
        .args(["--config", "release.toml", "release", "--var", "version=2.0"])
        .assert()
        .success()
        .stdout(contains("Created release 42"));

    let requests = server.finish();
    assert_eq!(requests[0].json()["name"], "Release 2.0");
}

#[test]
fn release_then_rollback_across_processes() {
    let td = tempdir().expect("tempdir");
    fs::write(td.path().join("app.bin"), b"payload").expect("write asset");
    let state_file = td.path().join("ctx.json");
    let server = spawn_github(3, github_ok);

    action_cmd(td.path())
        .arg("release")
        .args(repo_args(&server.host))
        .args(["--name", "v1", "--asset", "app.bin", "--state-file"])
        .arg(&state_file)
        .assert()
        .success()
        .stdout(contains("Uploaded 1 asset(s)"));
    assert!(state_file.exists());

    action_cmd(td.path())
        .arg("rollback")
        .args(repo_args(&server.host))
        .arg("--state-file")
        .arg(&state_file)
        .assert()
        .success()
        .stdout(contains("Deleted release 42"));
    assert!(!state_file.exists());

    let requests = server.finish();
    assert_eq!(requests[1].url, "/repos/acme/app/releases/42/assets?name=app.bin");
    assert_eq!(requests[2].method, "DELETE");
    assert_eq!(requests[2].url, "/repos/acme/app/releases/42");
}

fn failing_uploads(req: &Recorded) -> (u16, String) {
    if req.url.contains("/assets") {
        (500, String::new())
    } else {
        github_ok(req)
    }
}

#[test]
fn failed_upload_saves_context_for_rollback() {
    let td = tempdir().expect("tempdir");
    fs::write(td.path().join("app.bin"), b"payload").expect("write asset");
    let state_file = td.path().join("ctx.json");
    let server = spawn_github(3, failing_uploads);

    action_cmd(td.path())
        .arg("release")
        .args(repo_args(&server.host))
        .args(["--name", "v1", "--asset", "app.bin", "--state-file"])
        .arg(&state_file)
        .assert()
        .failure()
        .stdout(contains("Release 42 was created and kept"))
        .stderr(contains("HTTP status 500"));
    assert!(state_file.exists());

    action_cmd(td.path())
        .arg("rollback")
        .args(repo_args(&server.host))
        .arg("--state-file")
        .arg(&state_file)
        .assert()
        .success()
        .stdout(contains("Deleted release 42"));
    assert!(!state_file.exists());

    let requests = server.finish();
    assert_eq!(requests[1].url, "/repos/acme/app/releases/42/assets?name=app.bin");
    assert_eq!(requests[2].method, "DELETE");
    assert_eq!(requests[2].url, "/repos/acme/app/releases/42");
}

#[test]
fn unsaved_context_reports_release_and_original_error() {
    let td = tempdir().expect("tempdir");
    fs::write(td.path().join("app.bin"), b"payload").expect("write asset");
    let state_file = td.path().join("no-such-dir").join("ctx.json");
    let server = spawn_github(2, failing_uploads);

    action_cmd(td.path())
        .arg("release")
        .args(repo_args(&server.host))
        .args(["--name", "v1", "--asset", "app.bin", "--state-file"])
        .arg(&state_file)
        .assert()
        .failure()
        .stderr(contains("Release 42 exists on GitHub but its context could not be saved"))
        .stderr(contains("Release run failed: GitHub error:"))
        .stderr(contains("Failed to save state"));
    assert!(!state_file.exists());

    server.finish();
}

#[test]
fn rollback_refuses_context_of_another_repository() {
    let td = tempdir().expect("tempdir");
    let state_file = td.path().join("ctx.json");
    fs::write(
        &state_file,
        r#"{
  "format_version": 1,
  "saved_at": "2026-01-01T00:00:00Z",
  "owner": "acme",
  "repository": "other",
  "context": { "release_id": 7, "phase": "Created" }
}"#,
    )
    .expect("write state");

    action_cmd(td.path())
        .args(["rollback", "--token", "T", "--owner", "acme", "--repository", "app"])
        .arg("--state-file")
        .arg(&state_file)
        .assert()
        .failure()
        .stderr(contains("belongs to acme/other"));
    assert!(state_file.exists());
}
