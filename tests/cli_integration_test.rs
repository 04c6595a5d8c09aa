use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

fn ormsig(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ormsig"));
    cmd.current_dir(dir.path()).env_remove("ORMSIG_FRAMEWORK_VERSION");
    cmd
}

#[test]
fn test_generate_writes_both_files() {
    let temp_dir = TempDir::new().unwrap();
    ormsig(&temp_dir)
        .args(["generate", "--framework-version", "6.0.3", "--output", "out"])
        .assert()
        .success();

    let base = fs::read_to_string(temp_dir.path().join("out/active_record_base.rbi")).unwrap();
    let relation =
        fs::read_to_string(temp_dir.path().join("out/active_record_relation.rbi")).unwrap();
    assert!(base.starts_with("# typed: strong\n"));
    assert!(base.contains("def self.find_by(attributes = nil); end"));
    assert!(relation.contains("class ActiveRecord::Associations::CollectionProxy"));
}

#[test]
fn test_generate_reads_config_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".ormsig.toml"),
        "[framework]\nversion = \"5.0.1\"\n\n[output]\nformat = \"json\"\nheader = []\n",
    )
    .unwrap();

    let output = ormsig(&temp_dir)
        .args(["generate", "--target", "base", "--stdout"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["group"], "base");
    let find_by = value["classes"][0]["methods"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["name"] == "find_by")
        .unwrap();
    assert_eq!(find_by["params"][0]["kind"], "splat");
}

#[test]
fn test_generate_rejects_old_versions() {
    let temp_dir = TempDir::new().unwrap();
    let output = ormsig(&temp_dir)
        .args(["generate", "--framework-version", "4.2.0", "--stdout"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported framework version"));
}

#[test]
fn test_project_prints_records() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("schema.json"),
        r#"{"name": "WidgetRow", "kind": "record", "fields": [
            {"name": "id", "type": "integer"},
            {"name": "owner_name", "type": "string"}
        ]}"#,
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("rows.json"),
        r#"{"columns": ["id", "owners.name"], "rows": [["5", "Alice"]]}"#,
    )
    .unwrap();

    let output = ormsig(&temp_dir)
        .args([
            "project",
            "--schema",
            "schema.json",
            "--rows",
            "rows.json",
            "--assoc",
            "owner_name=owners.name",
            "--coerce",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, serde_json::json!([{"id": 5, "owner_name": "Alice"}]));
}

#[test]
fn test_init_creates_config_once() {
    let temp_dir = TempDir::new().unwrap();
    ormsig(&temp_dir).arg("init").assert().success();
    assert!(temp_dir.path().join(".ormsig.toml").exists());
    ormsig(&temp_dir).arg("init").assert().failure();
    ormsig(&temp_dir).args(["init", "--force"]).assert().success();
}
