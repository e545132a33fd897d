use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources/bookmarks.json")
        .display()
        .to_string()
}

/// bmtree with an empty HOME and no BMTREE_* variables, so only the
/// command line decides what is loaded.
fn bmtree(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bmtree").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("BMTREE_SOURCE")
        .env_remove("BMTREE_SORT")
        .env_remove("BMTREE_HTTP_TIMEOUT_MS")
        .env_remove("NO_COLOR")
        .arg("--no-color");
    cmd
}

fn with_fixture(home: &TempDir) -> Command {
    let mut cmd = bmtree(home);
    cmd.args(["-s", &fixture()]);
    cmd
}

/// Writes `json` into the temp dir and points bmtree at it.
fn with_payload(home: &TempDir, json: &str) -> Command {
    let path = home.path().join("payload.json");
    fs::write(&path, json).unwrap();
    let mut cmd = bmtree(home);
    cmd.arg("-s").arg(&path);
    cmd
}

#[test]
fn given_fixture_when_ls_then_top_level_listed() {
    let home = TempDir::new().unwrap();
    with_fixture(&home)
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("Work/"))
        .stdout(predicate::str::contains("Personal/"))
        .stdout(predicate::str::contains("Hacker News"))
        .stdout(predicate::str::contains("Rust Book").not());
}

#[test]
fn given_folder_id_when_ls_then_children_only() {
    let home = TempDir::new().unwrap();
    with_fixture(&home)
        .args(["ls", "41"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust Book"))
        .stdout(predicate::str::contains("Tokio Tutorial"))
        .stdout(predicate::str::contains("Tracker").not());
}

#[test]
fn given_link_id_when_ls_then_fails() {
    let home = TempDir::new().unwrap();
    with_fixture(&home)
        .args(["ls", "411"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("is a link"));
}

#[test]
fn given_unknown_id_when_ls_then_usage_error() {
    let home = TempDir::new().unwrap();
    with_fixture(&home)
        .args(["ls", "999"])
        .assert()
        .code(64)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No folder with id '999'"));
}

#[test]
fn given_link_when_show_json_then_record_with_path() {
    let home = TempDir::new().unwrap();
    let output = with_fixture(&home)
        .args(["show", "411", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["name"], "Rust Book");
    assert_eq!(value["url"], "https://doc.rust-lang.org/book/");
    assert_eq!(value["path"], serde_json::json!(["Work", "Docs"]));
    assert_eq!(value["tags"], serde_json::json!(["rust", "learning"]));
}

#[test]
fn given_unknown_id_when_show_then_usage_error() {
    let home = TempDir::new().unwrap();
    with_fixture(&home)
        .args(["show", "999"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("999"));
}

#[test]
fn given_nested_link_when_path_then_breadcrumb() {
    let home = TempDir::new().unwrap();
    with_fixture(&home)
        .args(["path", "411"])
        .assert()
        .success()
        .stdout("Work > Docs\n");
}

const LEGACY_ROOT_PAYLOAD: &str = r#"[
    {"id": "1", "name": "Bookmarks bar", "parentId": "0", "isFolder": true},
    {"id": "7", "name": "Legacy", "parentId": "1", "isFolder": true},
    {"id": "71", "name": "Rust", "url": "https://www.rust-lang.org/", "parentId": "7", "isFolder": false}
]"#;

#[test]
fn given_legacy_root_when_path_then_walks_past_it() {
    let home = TempDir::new().unwrap();
    with_payload(&home, LEGACY_ROOT_PAYLOAD)
        .args(["path", "71"])
        .assert()
        .success()
        .stdout("Bookmarks bar > Legacy\n");
}

#[test]
fn given_any_root_flag_when_path_then_stops_at_legacy_root() {
    let home = TempDir::new().unwrap();
    with_payload(&home, LEGACY_ROOT_PAYLOAD)
        .args(["path", "71", "--any-root"])
        .assert()
        .success()
        .stdout("Legacy\n");
}

#[test]
fn given_query_when_search_then_ids_on_stdout_and_listing_on_stderr() {
    let home = TempDir::new().unwrap();
    with_fixture(&home)
        .args(["search", "example"])
        .assert()
        .success()
        .stdout("42,21\n")
        .stderr(predicate::str::contains("Found 2 records"))
        .stderr(predicate::str::contains("Work"));
}

#[test]
fn given_tag_filter_when_search_then_only_tagged_links() {
    let home = TempDir::new().unwrap();
    with_fixture(&home)
        .args(["search", "https", "--tags", "rust"])
        .assert()
        .success()
        .stdout("411,412\n");
}

#[test]
fn given_blank_query_when_search_then_usage_error() {
    let home = TempDir::new().unwrap();
    with_fixture(&home)
        .args(["search", "  "])
        .assert()
        .code(64)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("must not be empty"));
}

#[test]
fn given_partial_query_when_suggest_then_names_and_urls() {
    let home = TempDir::new().unwrap();
    with_fixture(&home)
        .args(["suggest", "tok"])
        .assert()
        .success()
        .stdout("Tokio Tutorial\nhttps://tokio.rs/tokio/tutorial\n");
}

#[test]
fn given_fixture_when_stats_json_then_computed_totals() {
    let home = TempDir::new().unwrap();
    let output = with_fixture(&home)
        .args(["stats", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["totalBookmarks"], 5);
    assert_eq!(value["totalFolders"], 3);
    assert_eq!(value["maxDepth"], 3);
}

const PRESET_STATS_PAYLOAD: &str = r#"{
    "bookmarks": [
        {"id": "5", "name": "Work", "parentId": "0", "isFolder": true},
        {"id": "51", "name": "Rust", "url": "https://www.rust-lang.org/", "parentId": "5", "isFolder": false}
    ],
    "stats": {"totalBookmarks": 12, "totalFolders": 7, "maxDepth": 4}
}"#;

#[test]
fn given_preset_stats_when_stats_then_shipped_numbers() {
    let home = TempDir::new().unwrap();
    let output = with_payload(&home, PRESET_STATS_PAYLOAD)
        .args(["stats", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["totalBookmarks"], 12);
    assert_eq!(value["totalFolders"], 7);
}

#[test]
fn given_preset_stats_when_stats_computed_then_recounted() {
    let home = TempDir::new().unwrap();
    let output = with_payload(&home, PRESET_STATS_PAYLOAD)
        .args(["stats", "--computed", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["totalBookmarks"], 1);
    assert_eq!(value["totalFolders"], 1);
    assert_eq!(value["maxDepth"], 2);
}

#[test]
fn given_fixture_when_tree_then_indented_hierarchy() {
    let home = TempDir::new().unwrap();
    with_fixture(&home)
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::contains("Work/\n  Docs/\n    Rust Book\n"));
}

#[test]
fn given_max_depth_when_tree_then_top_level_only() {
    let home = TempDir::new().unwrap();
    with_fixture(&home)
        .args(["tree", "--max-depth", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Docs").not());
}

#[test]
fn given_missing_source_when_ls_then_built_in_data_with_notice() {
    let home = TempDir::new().unwrap();
    bmtree(&home)
        .args(["-s", "/nonexistent/bookmarks.json", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Developer Docs/"))
        .stderr(predicate::str::contains("showing built-in sample bookmarks"));
}

#[test]
fn given_no_source_when_ls_then_built_in_data_without_notice() {
    let home = TempDir::new().unwrap();
    bmtree(&home)
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("Work/"))
        .stderr(predicate::str::contains("Could not load").not());
}

#[test]
fn given_env_source_when_ls_then_used() {
    let home = TempDir::new().unwrap();
    bmtree(&home)
        .env("BMTREE_SOURCE", fixture())
        .args(["ls", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recipes"));
}

#[test]
fn given_bad_timeout_env_when_run_then_usage_error() {
    let home = TempDir::new().unwrap();
    bmtree(&home)
        .env("BMTREE_HTTP_TIMEOUT_MS", "soon")
        .arg("ls")
        .assert()
        .code(64)
        .stderr(predicate::str::contains("BMTREE_HTTP_TIMEOUT_MS"));
}

#[test]
fn given_generate_config_flag_when_run_then_toml_printed() {
    let home = TempDir::new().unwrap();
    bmtree(&home)
        .arg("--generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("http_timeout_ms = 5000"))
        .stdout(predicate::str::contains("[display]"));
}

#[test]
fn given_bash_when_completion_then_script_on_stdout() {
    let home = TempDir::new().unwrap();
    bmtree(&home)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bmtree"));
}

#[test]
fn given_unknown_shell_when_completion_then_fails() {
    let home = TempDir::new().unwrap();
    bmtree(&home)
        .args(["completion", "tcsh"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("Unsupported shell"));
}
