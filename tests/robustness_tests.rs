use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_malformed_csv_handling() {
    let file = common::commands_file(&[
        "create, p1, 1.0, cash, svc-1,",
        "explode, p2, 1.0, cash, svc-2,",   // Invalid command
        "create, p3, abc, cash, svc-3,",    // Amount is not a number
        "create, p4, 2.0, cheque, svc-4,",  // Unknown method
        "create, p5, 2.0, cash, svc-5,",
    ]);

    let output = Command::new(cargo_bin!("gym-payments"))
        .arg(file.path())
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Error reading command").count(), 3);

    let rows = common::data_rows(&output.stdout);
    assert_eq!(rows.len(), 2);
    assert!(rows[0].contains("svc-1"));
    assert!(rows[1].contains("svc-5"));
}

#[test]
fn test_missing_required_columns() {
    let file = common::commands_file(&[
        "create, p1, , cash, svc-1,", // No amount
        "create, p2, 3.0, cash, svc-2,",
        "transition, p2",             // No target status
    ]);

    let mut cmd = Command::new(cargo_bin!("gym-payments"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("requires the amount column"))
        .stderr(predicate::str::contains("requires the status column"))
        .stdout(predicate::str::contains(",cash,pending,svc-2,"))
        .stdout(predicate::str::contains("svc-1").not());
}

#[test]
fn test_extreme_decimal_precision() {
    let file = common::commands_file(&[
        "create, tiny, 0.0001, cash, svc,",
        "create, huge, 1000000.0000, cash, svc,",
    ]);

    let mut cmd = Command::new(cargo_bin!("gym-payments"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(",0.0001,"))
        .stdout(predicate::str::contains(",1000000,"));
}
