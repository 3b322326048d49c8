use predicates::prelude::*;
use serde_json::Value;
use std::process::Command;
use tempfile::TempDir;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Command reading the fixture dictionary with an isolated cache directory.
fn cmd(cache: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_areadict")));
    cmd.env_remove("RUST_LOG")
        .env_remove("AREADICT_SOURCE")
        .env_remove("AREADICT_CACHE_DIR")
        .args(["--source", &fixture_path("area.json")])
        .args(["--cache-dir", cache.path().to_str().unwrap()]);
    cmd
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> Value {
    serde_json::from_slice(&assert.get_output().stdout).unwrap()
}

// -- search --

#[test]
fn search_by_name() {
    let cache = TempDir::new().unwrap();
    cmd(&cache)
        .args(["search", "tokyo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("130000  Tokyo  [offices]"))
        .stdout(predicate::str::contains("Tokyo 23 Wards"))
        .stdout(predicate::str::contains("Kanagawa").not());
}

#[test]
fn search_by_code_as_json() {
    let cache = TempDir::new().unwrap();
    let assert = cmd(&cache)
        .args(["search", "1400", "-f", "json"])
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(value["total"], 2);
    assert_eq!(value["items"][0]["code"], "140000");
    assert_eq!(value["items"][1]["code"], "140010");
}

#[test]
fn search_limit() {
    let cache = TempDir::new().unwrap();
    cmd(&cache)
        .args(["search", "--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("... 2 of 14 matches shown"));
}

// -- show --

#[test]
fn show_resolves_through_children_lists() {
    let cache = TempDir::new().unwrap();
    cmd(&cache)
        .args(["show", "1310100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("office:   130000"))
        .stdout(predicate::str::contains(
            "path:     1310100 Chiyoda -> 130011 Tokyo 23 Wards -> 130010 Tokyo Area -> 130000 Tokyo",
        ))
        .stdout(predicate::str::contains(
            "forecast: https://www.jma.go.jp/bosai/forecast/data/forecast/130000.json",
        ))
        .stdout(predicate::str::contains(
            "overview: https://www.jma.go.jp/bosai/forecast/data/overview_forecast/130000.json",
        ));
}

#[test]
fn show_unknown_code_fails() {
    let cache = TempDir::new().unwrap();
    cmd(&cache)
        .args(["show", "ZZZ"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("area code not found: ZZZ"));
}

#[test]
fn show_html_is_escaped_page() {
    let cache = TempDir::new().unwrap();
    cmd(&cache)
        .args(["show", "140010", "-f", "html"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("<title>East Kanagawa (140010)</title>"))
        .stdout(predicate::str::contains("&quot;enName&quot;"));
}

// -- resolve --

#[test]
fn resolve_via_parent_code_synonym() {
    let cache = TempDir::new().unwrap();
    let assert = cmd(&cache)
        .args(["resolve", "460041", "-f", "json"])
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(value["office"], "460040");
    assert_eq!(value["path"], serde_json::json!(["460041", "460040"]));
    assert_eq!(value["reason"], "ok");
}

#[test]
fn resolve_office_is_itself() {
    let cache = TempDir::new().unwrap();
    let assert = cmd(&cache)
        .args(["resolve", "130000", "-f", "json"])
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(value["office"], "130000");
    assert_eq!(value["path"], serde_json::json!(["130000"]));
}

#[test]
fn resolve_failures_exit_nonzero_with_reason() {
    let cases = [
        ("990010", "loop"),
        ("990030", "not_found"),
        ("990040", "no_parent"),
        ("ZZZ", "not_found"),
        ("", "unknown"),
    ];
    let cache = TempDir::new().unwrap();
    for (code, reason) in cases {
        let assert = cmd(&cache)
            .args(["resolve", code, "-f", "json"])
            .assert()
            .code(1);
        let value = stdout_json(&assert);
        assert_eq!(value["reason"], reason, "code {code:?}");
        assert_eq!(value["office"], "", "code {code:?}");
    }
}

#[test]
fn resolve_loop_text_message() {
    let cache = TempDir::new().unwrap();
    cmd(&cache)
        .args(["resolve", "990010"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("status:   loop (Parent chain loops back on itself)"))
        .stdout(predicate::str::contains("path:     990010 Loop A -> 990020 Loop B\n"));
}

// -- stats --

#[test]
fn stats_counts_categories() {
    let cache = TempDir::new().unwrap();
    cmd(&cache)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("offices      3"))
        .stdout(predicate::str::contains("class10s     8"))
        .stdout(predicate::str::contains("records      14"))
        .stdout(predicate::str::contains("notes").not());
}

// -- cache --

#[test]
fn first_load_populates_cache_and_offline_reuses_it() {
    let cache = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let source = work.path().join("area.json");
    std::fs::copy(fixture_path("area.json"), &source).unwrap();

    let run = |args: &[&str]| {
        let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_areadict")));
        cmd.env_remove("RUST_LOG")
            .args(["--source", source.to_str().unwrap()])
            .args(["--cache-dir", cache.path().to_str().unwrap()])
            .args(args)
            .assert()
    };

    run(&["resolve", "130010"]).success();
    run(&["cache", "status"])
        .success()
        .stdout(predicate::str::contains("state:    fresh"));

    std::fs::remove_file(&source).unwrap();
    run(&["--offline", "resolve", "130010"]).success();
    run(&["--ttl", "0", "resolve", "130010"])
        .success()
        .stderr(predicate::str::contains("falling back to cached dictionary"));

    run(&["cache", "clear"]).success();
    run(&["cache", "status"])
        .success()
        .stdout(predicate::str::contains("state:    empty"));
    run(&["resolve", "130010"])
        .failure()
        .stderr(predicate::str::contains("failed to load area dictionary"));
}

#[test]
fn no_cache_leaves_directory_empty() {
    let cache = TempDir::new().unwrap();
    cmd(&cache).args(["--no-cache", "stats"]).assert().success();
    assert_eq!(std::fs::read_dir(cache.path()).unwrap().count(), 0);
}

#[test]
fn missing_source_without_cache_fails() {
    let cache = TempDir::new().unwrap();
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_areadict")));
    cmd.env_remove("RUST_LOG")
        .args(["--source", "/nonexistent/area.json"])
        .args(["--cache-dir", cache.path().to_str().unwrap()])
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no dictionary available"));
}

#[test]
fn unknown_format_rejected() {
    let cache = TempDir::new().unwrap();
    cmd(&cache)
        .args(["search", "x", "-f", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: yaml"));
}
