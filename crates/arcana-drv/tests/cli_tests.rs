//! End-to-end coverage through the built `arcana` binary, per SPEC_FULL.md
//! §8's scenario list: missing main, wrong main return type, break outside
//! a loop, and four-deep loop nesting.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn source_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".arkhe").tempfile().expect("create temp file");
    write!(file, "{contents}").expect("write temp file");
    file
}

#[test]
fn missing_main_fails_with_p0010() {
    let file = source_file("<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA></DOCTRINA>");
    Command::cargo_bin("arcana")
        .unwrap()
        .args(["exsecutio", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("P0010"));
}

#[test]
fn wrong_main_return_type_fails_with_p0011() {
    let file = source_file(
        "<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>FCON subjecto: inte () -> { REDITUS 0; };</DOCTRINA>",
    );
    Command::cargo_bin("arcana")
        .unwrap()
        .args(["exsecutio", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("P0011"));
}

#[test]
fn break_outside_loop_fails_with_e0101() {
    let file = source_file(
        "<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> { effigium; };</DOCTRINA>",
    );
    Command::cargo_bin("arcana")
        .unwrap()
        .args(["exsecutio", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E0101"));
}

#[test]
fn four_deep_nested_loops_fails_with_e0103() {
    let inner = "RECURSIO(propositio:(1 < 2)) { effigium; }";
    let l3 = format!("RECURSIO(propositio:(1 < 2)) {{ {inner} }}");
    let l2 = format!("RECURSIO(propositio:(1 < 2)) {{ {l3} }}");
    let l1 = format!("RECURSIO(propositio:(1 < 2)) {{ {l2} }}");
    let body = format!(
        "<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> {{ {l1} }};</DOCTRINA>"
    );
    let file = source_file(&body);
    Command::cargo_bin("arcana")
        .unwrap()
        .args(["exsecutio", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E0103"));
}

#[test]
fn perscribere_prints_transpiled_banners_on_success() {
    let file = source_file(
        "<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> { };</DOCTRINA>",
    );
    Command::cargo_bin("arcana")
        .unwrap()
        .args(["exsecutio", file.path().to_str().unwrap(), "--perscribere"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== [arcana perscribere] transpiled python ==="))
        .stdout(predicate::str::contains("=== [arcana perscribere] end ==="));
}

#[test]
fn inspectio_reports_reserved_mode_on_valid_input() {
    let file = source_file(
        "<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> { };</DOCTRINA>",
    );
    Command::cargo_bin("arcana")
        .unwrap()
        .args(["inspectio", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("reserved"));
}

#[test]
fn aedificatio_is_a_no_op() {
    let file = source_file(
        "<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> { };</DOCTRINA>",
    );
    Command::cargo_bin("arcana")
        .unwrap()
        .args(["aedificatio", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("reserved"));
}
