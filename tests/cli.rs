//! CLI integration tests using assert_cmd.
//!
//! Each test writes a catalog fixture into a tempdir and points the
//! binary at it with `--catalog`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

const CATALOG: &str = r#"[
    {"id": "1", "name": "Claw Hammer", "category": "Hand Tools",
     "brand": "Stanley", "description": "16oz forged steel claw hammer"},
    {"id": "2", "name": "Sledge Hammer", "category": "Hand Tools",
     "description": "Heavy demolition hammer"},
    {"id": "3", "name": "Safety Goggles", "category": "Safety Gear",
     "brand": "3M", "description": "Clear anti-fog lens eye protection"},
    {"id": "4", "name": "Work Gloves", "category": "Safety Gear",
     "description": "Leather palm gloves"},
    {"id": "5", "name": "Cordless Drill", "category": "Power Tools",
     "brand": "DeWalt", "description": "18V cordless drill driver", "price": 129.0}
]"#;

fn write_catalog() -> (TempDir, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("catalog.json");
    std::fs::write(&path, CATALOG).unwrap();
    (tmp, path)
}

fn shoprec() -> Command {
    Command::cargo_bin("shoprec").expect("binary exists")
}

// ── Search ───────────────────────────────────────────────────────────

#[test]
fn search_by_keyword() {
    let (_tmp, catalog) = write_catalog();
    shoprec()
        .args(["search", "hammer", "--catalog"])
        .arg(&catalog)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Claw Hammer").and(predicate::str::contains("Sledge Hammer")),
        );
}

#[test]
fn search_no_results() {
    let (_tmp, catalog) = write_catalog();
    shoprec()
        .args(["search", "kayak", "--catalog"])
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 products"));
}

#[test]
fn search_respects_limit() {
    let (_tmp, catalog) = write_catalog();
    shoprec()
        .args(["search", "hammer", "--limit", "1", "--catalog"])
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 products"));
}

#[test]
fn search_json_output() {
    let (_tmp, catalog) = write_catalog();
    let output = shoprec()
        .args(["search", "goggles", "--json", "--catalog"])
        .arg(&catalog)
        .output()
        .unwrap();

    assert!(output.status.success());
    let products: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(products.as_array().unwrap().len(), 1);
    assert_eq!(products[0]["id"], "3");
}

// ── Related ──────────────────────────────────────────────────────────

#[test]
fn related_excludes_reference() {
    let (_tmp, catalog) = write_catalog();
    shoprec()
        .args(["related", "1", "--catalog"])
        .arg(&catalog)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Sledge Hammer")
                .and(predicate::str::contains("Claw Hammer").not()),
        );
}

#[test]
fn related_unknown_id_is_empty() {
    let (_tmp, catalog) = write_catalog();
    shoprec()
        .args(["related", "999", "--catalog"])
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 products"));
}

// ── Cart ─────────────────────────────────────────────────────────────

#[test]
fn empty_cart_gets_fallback_recommendations() {
    let (_tmp, catalog) = write_catalog();
    shoprec()
        .args(["cart", "--catalog"])
        .arg(&catalog)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("recommended for cart")
                .and(predicate::str::contains("Safety Goggles")),
        );
}

#[test]
fn cart_recommends_related_to_last_item() {
    let (_tmp, catalog) = write_catalog();
    shoprec()
        .args(["cart", "--item", "3", "--item", "1", "--catalog"])
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sledge Hammer"));
}

// ── Failure modes ────────────────────────────────────────────────────

#[test]
fn missing_catalog_fails() {
    shoprec()
        .args(["search", "hammer", "--catalog", "/nonexistent/catalog.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read catalog"));
}

#[test]
fn malformed_catalog_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("catalog.json");
    std::fs::write(&path, "not json {{{").unwrap();

    shoprec()
        .args(["search", "hammer", "--catalog"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse catalog"));
}

#[test]
fn config_overrides_fallback_query() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = tmp.path().join("catalog.json");
    std::fs::write(&catalog, CATALOG).unwrap();
    let config = tmp.path().join("config.toml");
    std::fs::write(&config, r#"default_query = "cordless drill""#).unwrap();

    shoprec()
        .args(["cart", "--catalog"])
        .arg(&catalog)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cordless Drill"));
}
