#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;
use xmeta::XML_DECLARATION;

const DOG_XML: &str = concat!(
    r#"<dog type="animal" name="Gapa">"#,
    "<owner><first>John</first><last>Smith</last></owner>",
    "<says>hau</says><collar/>",
    "</dog>"
);

fn xmeta() -> Command {
    Command::cargo_bin("xmeta").unwrap()
}

#[test]
fn test_renders_with_meta() {
    xmeta()
        .args(["tests/input/dog.json", "--meta", "tests/input/dog_meta.json"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{XML_DECLARATION}{DOG_XML}\n")));
}

#[test]
fn test_without_declaration() {
    xmeta()
        .args([
            "tests/input/dog.json",
            "--meta",
            "tests/input/dog_meta.json",
            "--no-declaration",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{DOG_XML}\n")));
}

#[test]
fn test_automatic_description_from_stdin() {
    xmeta()
        .args(["--root", "dog", "--no-declaration"])
        .write_stdin(r#"{"name": "Gapa", "tricks": ["sit"]}"#)
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "<dog><name>Gapa</name><tricks><sit/></tricks></dog>\n",
        ));
}

#[test]
fn test_writes_output_file() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("dog.xml");
    xmeta()
        .args(["tests/input/dog.json", "--meta", "tests/input/dog_meta.json", "--output"])
        .arg(&output)
        .assert()
        .success();
    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, format!("{XML_DECLARATION}{DOG_XML}"));
}

#[test]
fn test_invalid_description_fails() {
    let dir = tempdir().unwrap();
    let meta = dir.path().join("meta.json");
    std::fs::write(&meta, r#"{"a": null, "b": null}"#).unwrap();
    xmeta()
        .arg("tests/input/dog.json")
        .arg("--meta")
        .arg(&meta)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly one entry"));
}

#[test]
fn test_depth_limit_flag() {
    xmeta()
        .args(["--max-depth", "1"])
        .write_stdin(r#"{"a": {"b": {"c": 1}}}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("max depth exceeded"));
}

#[test]
fn test_empty_stdin_fails() {
    xmeta()
        .write_stdin("  \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no input"));
}
