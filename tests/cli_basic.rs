#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli(data: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("planif-cli").unwrap();
    cmd.arg("--data").arg(data);
    cmd
}

fn stdout_line(data: &std::path::Path, args: &[&str]) -> String {
    let assert = cli(data).args(args).assert().success();
    String::from_utf8(assert.get_output().stdout.clone())
        .unwrap()
        .trim()
        .to_string()
}

#[test]
fn end_to_end_auto_assign() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("plan.json");

    let schedule = stdout_line(
        &data,
        &[
            "create-schedule",
            "--org",
            "org-1",
            "--from",
            "2025-01-01",
            "--to",
            "2025-01-07",
        ],
    );
    let role = stdout_line(&data, &["add-role", "--org", "org-1", "--name", "cashier"]);

    let employees = dir.path().join("employees.csv");
    fs::write(&employees, "display_name,id\nAlice,emp-a\nBob,emp-b\nCarol,emp-c\n").unwrap();
    cli(&data)
        .args(["import-employees", "--org", "org-1", "--csv"])
        .arg(&employees)
        .assert()
        .success();

    let shifts = dir.path().join("shifts.csv");
    fs::write(
        &shifts,
        format!(
            "schedule_id,role_id,start,end,required_staff_count\n\
             {schedule},{role},2025-01-02T09:00:00Z,2025-01-02T17:00:00Z,2\n"
        ),
    )
    .unwrap();
    cli(&data)
        .args(["import-shifts", "--csv"])
        .arg(&shifts)
        .assert()
        .success();

    // Prévisualisation : le bilan annonce 2 postes, rien n'est écrit
    cli(&data)
        .args([
            "auto-assign",
            "--schedule",
            &schedule,
            "--from",
            "2025-01-01",
            "--to",
            "2025-01-07",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"assigned\": 2"));
    let raw = fs::read_to_string(&data).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["assignments"].as_array().unwrap().len(), 0);

    // Passe réelle
    cli(&data)
        .args([
            "auto-assign",
            "--schedule",
            &schedule,
            "--from",
            "2025-01-01",
            "--to",
            "2025-01-07",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"assigned\": 2"));
    let raw = fs::read_to_string(&data).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["assignments"].as_array().unwrap().len(), 2);

    cli(&data)
        .args(["check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no conflicts"));

    cli(&data)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2/2"));
}

#[test]
fn auto_assign_warns_when_uncovered() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("plan.json");

    let schedule = stdout_line(
        &data,
        &[
            "create-schedule",
            "--org",
            "org-1",
            "--from",
            "2025-01-01",
            "--to",
            "2025-01-07",
        ],
    );
    let role = stdout_line(&data, &["add-role", "--org", "org-1", "--name", "cashier"]);

    // Un shift mais aucun employé : aucune couverture possible
    let shifts = dir.path().join("shifts.csv");
    fs::write(
        &shifts,
        format!(
            "schedule_id,role_id,start,end,required_staff_count\n\
             {schedule},{role},2025-01-02T09:00:00Z,2025-01-02T17:00:00Z,1\n"
        ),
    )
    .unwrap();
    cli(&data)
        .args(["import-shifts", "--csv"])
        .arg(&shifts)
        .assert()
        .success();

    cli(&data)
        .args([
            "auto-assign",
            "--schedule",
            &schedule,
            "--from",
            "2025-01-01",
            "--to",
            "2025-01-07",
        ])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"skipped_no_candidates\": 1"));
}

#[test]
fn unknown_policy_is_rejected() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("plan.json");
    let schedule = stdout_line(
        &data,
        &[
            "create-schedule",
            "--org",
            "org-1",
            "--from",
            "2025-01-01",
            "--to",
            "2025-01-07",
        ],
    );

    cli(&data)
        .args([
            "auto-assign",
            "--schedule",
            &schedule,
            "--from",
            "2025-01-01",
            "--to",
            "2025-01-07",
            "--policy",
            "wipe_everything",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown policy"));
}
