#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// A command pinned to a scratch data dir, with no user config leaking in.
fn catalog_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("catalog"));
    cmd.env_remove("CATALOG_DATA_DIR")
        .env_remove("CATALOG_MAX_ID_ATTEMPTS")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(temp.path().join("data"))
        .arg("--config")
        .arg(temp.path().join("catalog.toml"));
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_add_list_get_set_rm_workflow() {
    let temp = TempDir::new().unwrap();

    let output = catalog_cmd(&temp)
        .args(["products", "add", "--field", "name=Laptop", "--field", "price=1500"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let created = stdout_json(&output);
    assert_eq!(created["message"], "Data successfully written");
    let id = created["ids"][0].as_u64().unwrap();
    assert_eq!(id.to_string().len(), 10);

    assert!(temp.path().join("data").join("product.data.json").exists());

    catalog_cmd(&temp)
        .args(["products", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 products"))
        .stdout(predicate::str::contains("Laptop"));

    catalog_cmd(&temp)
        .args(["products", "set", &id.to_string(), "price", "1299.99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1299.99"));

    catalog_cmd(&temp)
        .args(["products", "get", &id.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1299.99"));

    catalog_cmd(&temp)
        .args(["products", "rm", &id.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("successfully removed"));

    catalog_cmd(&temp)
        .args(["products", "get", &id.to_string()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("not_found"));
}

#[test]
fn test_invalid_id_fails() {
    let temp = TempDir::new().unwrap();

    catalog_cmd(&temp)
        .args(["users", "get", "42"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("invalid_identifier"))
        .stdout(predicate::str::contains("ID must be a 10-digit number"));
}

#[test]
fn test_import_keeps_ids_and_rejects_duplicates() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("categories.json");
    fs::write(
        &file,
        r#"[{"id": 1000000001, "name": "Books"}, {"name": "Games"}]"#,
    )
    .unwrap();

    let output = catalog_cmd(&temp)
        .args(["categories", "import"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());
    let imported = stdout_json(&output);
    assert_eq!(imported["ids"][0], 1000000001u64);
    assert_eq!(imported["ids"].as_array().unwrap().len(), 2);

    catalog_cmd(&temp)
        .args(["categories", "import"])
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("duplicate_identifier"));

    catalog_cmd(&temp)
        .args(["categories", "get", "1000000001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Books"));
}

#[test]
fn test_add_rejects_caller_supplied_id() {
    let temp = TempDir::new().unwrap();

    catalog_cmd(&temp)
        .args(["users", "add", "--json", r#"{"id": 1000000001, "name": "Ada"}"#])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("invalid_input"));
    assert!(!temp.path().join("data").join("user.data.json").exists());
}

#[test]
fn test_rm_many_reports_each_id() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("users.json");
    fs::write(&file, r#"[{"id": 1000000001}, {"id": 1000000002}]"#).unwrap();
    catalog_cmd(&temp)
        .args(["users", "import"])
        .arg(&file)
        .assert()
        .success();

    let output = catalog_cmd(&temp)
        .args(["users", "rm", "1000000001", "1000000003", "abc"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let outcome = stdout_json(&output);
    assert_eq!(outcome["message"], "Attempted to delete 3 users");
    let statuses: Vec<_> = outcome["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["result"]["status"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(statuses, vec!["success", "not_found", "not_found"]);
}

#[test]
fn test_rm_removes_records_with_short_ids() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("product.data.json"), r#"[{"id": 1}, {"id": 3}]"#).unwrap();

    let output = catalog_cmd(&temp)
        .args(["products", "rm", "1", "2", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let outcome = stdout_json(&output);
    let statuses: Vec<_> = outcome["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["result"]["status"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(statuses, vec!["success", "not_found", "success"]);
    assert_eq!(
        fs::read_to_string(data.join("product.data.json")).unwrap(),
        "[]"
    );
}

#[test]
fn test_import_missing_file_reports_the_cause() {
    let temp = TempDir::new().unwrap();

    catalog_cmd(&temp)
        .args(["users", "import"])
        .arg(temp.path().join("missing.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::is_match(r"Error: reading .*missing\.json: \S").unwrap());
}

#[test]
fn test_rm_on_missing_file_is_not_found() {
    let temp = TempDir::new().unwrap();

    catalog_cmd(&temp)
        .args(["categories", "rm", "1000000001"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("File not found"));
}
