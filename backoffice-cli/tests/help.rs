use assert_cmd::cargo::{self};
use predicates::str::contains;

#[test]
fn prints_help() {
    let mut cmd = cargo::cargo_bin_cmd!("backoffice");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("backoffice"));
}

#[test]
fn help_lists_the_backend_flag() {
    let mut cmd = cargo::cargo_bin_cmd!("backoffice");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("--base-url"));
}

#[test]
fn unknown_flags_are_rejected() {
    let mut cmd = cargo::cargo_bin_cmd!("backoffice");
    cmd.arg("--does-not-exist").assert().failure();
}
