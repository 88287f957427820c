use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// `ofb --no-color --database-file <db>`
fn ofb_cmd(temp_dir: &TempDir) -> Command {
    let db_path = temp_dir.path().join("cli_test.db");
    let mut cmd = Command::cargo_bin("ofb").expect("Failed to find ofb binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path.to_str().unwrap());
    cmd
}

fn seed(temp_dir: &TempDir) {
    ofb_cmd(temp_dir).arg("seed").assert().success();
}

fn add_employee(temp_dir: &TempDir, first: &str, department: &str) {
    ofb_cmd(temp_dir)
        .args([
            "person",
            "add",
            first,
            "Walker",
            &format!("{}@example.com", first.to_lowercase()),
            "--department",
            department,
            "--position",
            "Analyst",
            "--employee",
            "active",
        ])
        .assert()
        .success();
}

#[test]
fn test_cli_help_and_version() {
    Command::cargo_bin("ofb")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("template"));

    Command::cargo_bin("ofb")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ofb"));
}

#[test]
fn test_cli_empty_database_lists_nothing() {
    let temp_dir = create_cli_test_environment();

    ofb_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No processes found."));
}

#[test]
fn test_cli_seed_is_idempotent() {
    let temp_dir = create_cli_test_environment();

    ofb_cmd(&temp_dir)
        .args(["seed", "--people", "4", "--rng-seed", "11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded 3 templates (0 already present) and 4 people"));

    ofb_cmd(&temp_dir)
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded 0 templates (3 already present)"));

    ofb_cmd(&temp_dir)
        .args(["template", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Standard Company-Wide Offboarding"))
        .stdout(predicate::str::contains("Executive Departure"));
}

#[test]
fn test_cli_applicable_templates_most_specific_first() {
    let temp_dir = create_cli_test_environment();
    seed(&temp_dir);

    let output = ofb_cmd(&temp_dir)
        .args(["template", "applicable", "Engineering"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let engineering = stdout.find("Engineering Offboarding").unwrap();
    let standard = stdout.find("Standard Company-Wide Offboarding").unwrap();
    assert!(engineering < standard);
    assert!(!stdout.contains("Executive Departure"));
}

#[test]
fn test_cli_person_add_and_list() {
    let temp_dir = create_cli_test_environment();
    add_employee(&temp_dir, "Morgan", "Finance");

    ofb_cmd(&temp_dir)
        .args([
            "person",
            "add",
            "Robin",
            "Hale",
            "robin@advisors.example.com",
            "--associate",
            "board-member",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added person with ID: 2"));

    ofb_cmd(&temp_dir)
        .args(["person", "list", "--type", "associate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Robin Hale"))
        .stdout(predicate::str::contains("Morgan").not());

    ofb_cmd(&temp_dir)
        .args(["person", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("employee (active)"));
}

#[test]
fn test_cli_person_requires_one_status() {
    let temp_dir = create_cli_test_environment();

    ofb_cmd(&temp_dir)
        .args(["person", "add", "Kim", "Park", "kim@example.com"])
        .assert()
        .failure();
}

#[test]
fn test_cli_process_workflow() {
    let temp_dir = create_cli_test_environment();
    seed(&temp_dir);
    add_employee(&temp_dir, "Jordan", "Sales");

    ofb_cmd(&temp_dir)
        .args(["process", "start", "1", "1", "--priority", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Started process with ID: 1 (5 tasks)"));

    // One open process per person.
    ofb_cmd(&temp_dir)
        .args(["process", "start", "1", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already has open offboarding process"));

    ofb_cmd(&temp_dir)
        .args(["process", "list", "--priority", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Standard Company-Wide Offboarding - Jordan Walker"))
        .stdout(predicate::str::contains("0%"));

    ofb_cmd(&temp_dir)
        .args(["task", "update", "1", "--status", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated task with ID: 1"));

    ofb_cmd(&temp_dir)
        .args(["process", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20% (1/5 tasks"));
}

#[test]
fn test_cli_task_blocked_needs_reason() {
    let temp_dir = create_cli_test_environment();
    seed(&temp_dir);
    add_employee(&temp_dir, "Casey", "Sales");
    ofb_cmd(&temp_dir)
        .args(["process", "start", "1", "1"])
        .assert()
        .success();

    ofb_cmd(&temp_dir)
        .args(["task", "update", "2", "--status", "blocked"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("blocked_reason"));

    ofb_cmd(&temp_dir)
        .args([
            "task",
            "update",
            "2",
            "--status",
            "blocked",
            "--reason",
            "waiting on laptop return",
        ])
        .assert()
        .success();

    ofb_cmd(&temp_dir)
        .args(["task", "show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("waiting on laptop return"));
}

#[test]
fn test_cli_delete_requires_confirm() {
    let temp_dir = create_cli_test_environment();
    seed(&temp_dir);
    add_employee(&temp_dir, "Avery", "Sales");
    ofb_cmd(&temp_dir)
        .args(["process", "start", "1", "1"])
        .assert()
        .success();

    ofb_cmd(&temp_dir)
        .args(["process", "delete", "1"])
        .assert()
        .failure();

    ofb_cmd(&temp_dir)
        .args(["process", "delete", "1", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted process"))
        .stdout(predicate::str::contains("and its 5 tasks"));

    ofb_cmd(&temp_dir)
        .args(["process", "show", "1"])
        .assert()
        .failure();
}

#[test]
fn test_cli_invalid_ids() {
    let temp_dir = create_cli_test_environment();

    for args in [
        ["process", "show", "99"],
        ["task", "show", "99"],
        ["template", "show", "99"],
        ["person", "show", "99"],
    ] {
        ofb_cmd(&temp_dir).args(args).assert().failure();
    }

    ofb_cmd(&temp_dir)
        .args(["process", "show", "not-a-number"])
        .assert()
        .failure();
}

#[test]
fn test_cli_template_validate() {
    let temp_dir = create_cli_test_environment();
    seed(&temp_dir);

    ofb_cmd(&temp_dir)
        .args(["template", "validate", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Success: Template 'Standard Company-Wide Offboarding' is valid",
        ))
        .stdout(predicate::str::contains("5 tasks, 3 with dependencies"));

    ofb_cmd(&temp_dir)
        .args(["template", "validate", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template with ID 42 not found"));
}

#[test]
fn test_cli_template_delete() {
    let temp_dir = create_cli_test_environment();
    seed(&temp_dir);
    add_employee(&temp_dir, "Blake", "Sales");
    ofb_cmd(&temp_dir)
        .args(["process", "start", "1", "1"])
        .assert()
        .success();

    ofb_cmd(&temp_dir)
        .args(["template", "delete", "3"])
        .assert()
        .failure();

    ofb_cmd(&temp_dir)
        .args(["template", "delete", "1", "--confirm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be deleted"));

    ofb_cmd(&temp_dir)
        .args(["template", "delete", "3", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted template"));

    ofb_cmd(&temp_dir)
        .args(["template", "show", "3"])
        .assert()
        .failure();
}
