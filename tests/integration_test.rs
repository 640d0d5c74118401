use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    write!(file, "{}", contents).unwrap();
    file
}

fn ledger_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_custody_ledger"))
}

#[test]
fn end_to_end_outputs_expected_balances() {
    // A: 30 in, 10 out. B's deposit overflows capacity by 10, A's 15 breaks
    // the threshold; neither leaves a trace.
    let file = csv(
        "type, account, amount\n\
    deposit, A, 30\n\
    deposit, B, 80\n\
    withdrawal, A, 15\n\
    withdrawal, A, 10\n",
    );

    ledger_cmd()
        .arg(file.path())
        .args(["--threshold", "10", "--capacity", "100"])
        .assert()
        .success()
        .stdout("account,balance\nA,20\n")
        .stderr(predicate::str::contains("over capacity by 10"))
        .stderr(predicate::str::contains("Withdrawal of 15 exceeds"));
}

#[test]
fn reentrant_and_rejecting_recipients() {
    let file = csv(
        "type,account,amount\n\
    deposit,mallory,100\n\
    receive,bob,50\n\
    withdrawal,mallory,100\n\
    withdrawal,bob,50\n",
    );
    let events = NamedTempFile::new().unwrap();

    ledger_cmd()
        .arg(file.path())
        .args(["--threshold", "100", "--capacity", "1000"])
        .args(["--reentrant", "mallory", "--reject", "bob"])
        .arg("--events-out")
        .arg(events.path())
        .assert()
        .success()
        .stdout("account,balance\nbob,50\nmallory,0\n")
        .stderr(predicate::str::contains("Transfer of 50 to bob failed"));

    let log = std::fs::read_to_string(events.path()).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"{"event":"deposit","account":"mallory","amount":"100"}"#,
            r#"{"event":"deposit","account":"bob","amount":"50"}"#,
            r#"{"event":"withdrawal","account":"mallory","amount":"100"}"#,
        ]
    );
}

#[test]
fn plain_transfers_can_be_turned_off() {
    let file = csv(
        "type,account,amount\n\
    receive,carol,5\n\
    deposit,carol,7\n",
    );

    ledger_cmd()
        .arg(file.path())
        .args(["--threshold", "10", "--capacity", "100", "--no-plain-transfers"])
        .assert()
        .success()
        .stdout("account,balance\ncarol,7\n")
        .stderr(predicate::str::contains("Plain value transfers are not accepted"));
}

#[test]
fn amounts_accept_denominations() {
    let file = csv(
        "type,account,amount\n\
    deposit,dave,2 gwei\n\
    withdrawal,dave,0.5 gwei\n",
    );

    ledger_cmd()
        .arg(file.path())
        .args(["--threshold", "1 gwei", "--capacity", "1 ether"])
        .assert()
        .success()
        .stdout("account,balance\ndave,1500000000\n");
}

#[test]
fn zero_threshold_is_refused() {
    let file = csv("type,account,amount\n");

    ledger_cmd()
        .arg(file.path())
        .args(["--threshold", "0", "--capacity", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold must be greater than zero"));
}

#[test]
fn missing_input_file_fails() {
    ledger_cmd()
        .arg("/definitely/not/here.csv")
        .args(["--threshold", "1", "--capacity", "1"])
        .assert()
        .failure();
}
