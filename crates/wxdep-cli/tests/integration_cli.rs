//! End-to-end tests for the `wxdep` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Mini-program with one page and an app script.
fn write_project(root: &Path) {
    let src = root.join("src");
    fs::create_dir_all(src.join("pages/index")).unwrap();
    fs::write(src.join("app.json"), r#"{ "pages": ["pages/index/index"] }"#).unwrap();
    fs::write(src.join("app.js"), "App({})").unwrap();
    fs::write(src.join("pages/index/index.json"), "{}").unwrap();
    fs::write(
        src.join("pages/index/index.js"),
        "import { format } from '../../utils/format';\nPage({})",
    )
    .unwrap();
    fs::write(src.join("pages/index/index.wxss"), "").unwrap();
    fs::write(src.join("pages/index/index.wxml"), "<view/>").unwrap();
    fs::create_dir_all(src.join("utils")).unwrap();
    fs::write(src.join("utils/format.js"), "export const format = (v) => v;").unwrap();
}

fn wxdep(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("wxdep").unwrap();
    cmd.current_dir(root).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn build_writes_fake_importer_and_manifests() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());

    wxdep(temp.path())
        .args(["build", "--no-color"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Build completed"));

    let importer = fs::read_to_string(temp.path().join(".wxdep/fake_importer.js")).unwrap();
    // app.json, app.js, four page files, utils/format.js
    assert_eq!(importer.matches("require(").count(), 7);
    assert!(importer.contains("require('../src/utils/format')"));
    assert!(importer.contains("require('../src/app.json')"));

    assert!(temp.path().join("dist/app.json").is_file());
    assert!(temp.path().join("dist/pages/index/index.json").is_file());
}

#[test]
fn build_honors_root_and_out_dir_flags() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());
    let elsewhere = TempDir::new().unwrap();

    wxdep(elsewhere.path())
        .arg("build")
        .arg("--root")
        .arg(temp.path())
        .args(["--out-dir", "build"])
        .assert()
        .success();

    assert!(temp.path().join("build/app.json").is_file());
    assert!(!temp.path().join("dist").exists());
}

#[test]
fn build_reads_config_file() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());
    fs::write(
        temp.path().join("src/pages/index/index.js"),
        "import { format } from '@/utils/format';\nPage({})",
    )
    .unwrap();
    fs::write(
        temp.path().join("wxdep.toml"),
        "output_dir = \"out\"\n\n[[alias]]\nsymbol = \"@\"\npath = \"src\"\n",
    )
    .unwrap();

    wxdep(temp.path()).arg("build").assert().success();

    let importer = fs::read_to_string(temp.path().join(".wxdep/fake_importer.js")).unwrap();
    assert!(importer.contains("require('../src/utils/format')"));
    assert!(temp.path().join("out/app.json").is_file());
}

#[test]
fn build_fails_on_incomplete_page() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());
    fs::remove_file(temp.path().join("src/pages/index/index.wxml")).unwrap();

    wxdep(temp.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("incomplete"));
}

#[test]
fn build_fails_without_source_directory() {
    let temp = TempDir::new().unwrap();

    wxdep(temp.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("source directory not found"));
}

#[test]
fn graph_json_lists_live_files() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());

    let output = wxdep(temp.path())
        .args(["graph", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let paths: Vec<&str> = lines
        .as_array()
        .unwrap()
        .iter()
        .map(|line| line["path"].as_str().unwrap())
        .collect();

    assert_eq!(
        paths,
        vec![
            "app.js",
            "app.json",
            "pages/index/index.js",
            "pages/index/index.json",
            "pages/index/index.wxml",
            "pages/index/index.wxss",
            "utils/format.js",
        ]
    );
}

#[test]
fn graph_plain_output_shows_dependencies() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());

    wxdep(temp.path())
        .arg("graph")
        .assert()
        .success()
        .stdout(predicate::str::contains("pages/index/index.js"))
        .stdout(predicate::str::contains("└─ utils/format.js"));
}
