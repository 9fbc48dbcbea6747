//! Integration tests for `tmplcycle order`.
#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Path to the compiled `tmplcycle` binary.
fn tmplcycle_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("tmplcycle");
    path
}

/// Path to a shared fixture file.
fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../../tests/fixtures");
    path.push(name);
    path
}

fn order(args: &[&str], name: &str) -> Output {
    Command::new(tmplcycle_bin())
        .arg("order")
        .arg(fixture(name).to_str().expect("path"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run tmplcycle order")
}

fn lines(out: &Output) -> Vec<String> {
    String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn chain_resolves_parents_first() {
    let out = order(&[], "acyclic.json");
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(lines(&out), ["base", "layout", "page"]);
}

#[test]
fn diamond_lists_shared_base_once() {
    let out = order(&[], "diamond.json");
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        lines(&out),
        ["base", "with_sidebar", "with_header", "article"]
    );
}

#[test]
fn dangling_parent_is_left_out() {
    let out = order(&[], "dangling.json");
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(lines(&out), ["base", "page"]);
}

#[test]
fn json_order_document() {
    let out = order(&["--format", "json"], "acyclic.json");
    assert_eq!(out.status.code(), Some(0));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid JSON");
    assert_eq!(v["order"], serde_json::json!(["base", "layout", "page"]));
    assert_eq!(v["template_count"], 3);
}

#[test]
fn cyclic_input_exits_1_naming_the_cycle() {
    let out = order(&[], "simple-cycle.json");
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("A -> B -> C -> A"), "stderr: {err}");
}

#[test]
fn strict_rejects_duplicates() {
    let out = order(&["--strict"], "duplicate.json");
    assert_eq!(out.status.code(), Some(2));
}
