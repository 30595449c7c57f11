use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn srcview() -> Command {
    Command::cargo_bin("srcview").unwrap()
}

fn sources_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

const CONTRACT: &str = r#"{
    "file_path": "contracts/Token.sol",
    "source_code": "pragma solidity ^0.8.0;\nimport \"./lib/Math.sol\";\nimport \"@oz/ERC20.sol\";\ncontract Token {}",
    "additional_sources": [
        { "file_path": "contracts/lib/Math.sol", "source_code": "import \"../Token.sol\";\nlibrary Math {}" }
    ]
}"#;

#[test]
fn test_help_flag() {
    srcview()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Browse verified smart-contract sources",
        ));
}

#[test]
fn test_version_flag() {
    srcview()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("srcview 0.1.0"));
}

#[test]
fn test_help_subcommand() {
    srcview()
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_debug_subcommand() {
    srcview()
        .arg("debug")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Config directory")
                .and(predicate::str::contains("Color mode"))
                .and(predicate::str::contains("srcview.log")),
        );
}

#[test]
fn test_imports_subcommand() {
    let file = sources_file(CONTRACT);
    srcview()
        .arg("imports")
        .arg(file.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains(
                "contracts/Token.sol -> ./lib/Math.sol => contracts/lib/Math.sol",
            )
            .and(predicate::str::contains(
                "contracts/Token.sol -> @oz/ERC20.sol => not found",
            ))
            .and(predicate::str::contains(
                "contracts/lib/Math.sol -> ../Token.sol => contracts/Token.sol",
            )),
        );
}

#[test]
fn test_imports_accepts_file_array() {
    let file = sources_file(
        r#"[{"file_path": "A.sol", "source_code": "import \"./B.sol\";"},
            {"file_path": "B.sol", "source_code": ""}]"#,
    );
    srcview()
        .arg("imports")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("A.sol -> ./B.sol => B.sol"));
}

#[test]
fn test_malformed_sources_file_fails() {
    let file = sources_file("{ not json");
    srcview()
        .arg("imports")
        .arg(file.path())
        .assert()
        .failure();
}

#[test]
fn test_missing_sources_file_fails() {
    srcview()
        .arg("imports")
        .arg("/nonexistent/sources.json")
        .assert()
        .failure();
}

#[test]
fn test_no_sources_argument_fails() {
    srcview()
        .assert()
        .failure()
        .stderr(predicate::str::contains("no sources file given"));
}

#[test]
fn test_invalid_theme_fails() {
    srcview()
        .args(["sources.json", "--theme", "sepia"])
        .assert()
        .failure();
}

#[test]
fn test_unknown_subcommand() {
    srcview().arg("nonexistent").assert().failure();
}
