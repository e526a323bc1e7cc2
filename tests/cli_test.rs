//! Integration tests for the svcgen binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CATALOG_JSON: &str = r#"{
    "version": "1.44.0",
    "services": [
        {
            "id": "s3",
            "name": "S3",
            "methods": [
                {
                    "name": "GetObject",
                    "input": { "namespace": "s3", "name": "GetObjectInput" },
                    "output": { "namespace": "s3", "name": "GetObjectOutput" }
                }
            ]
        },
        { "id": "sqs", "name": "SQS", "methods": [] }
    ]
}"#;

const SERVICE_TEMPLATE: &str = r#"{% for service in services -%}
{{ SetFileName(name=service.id ~ "/service.txt") -}}
{{ service.name }} {{ version }}
{% endfor -%}
"#;

fn setup(root: &Path) {
    fs::create_dir(root.join("templates")).unwrap();
    fs::write(root.join("templates/service.tmpl"), SERVICE_TEMPLATE).unwrap();
    fs::write(root.join("catalog.json"), CATALOG_JSON).unwrap();
}

#[test]
fn test_generates_all_services() {
    let temp_dir = TempDir::new().unwrap();
    setup(temp_dir.path());

    Command::cargo_bin("svcgen")
        .unwrap()
        .arg("--template-dir")
        .arg(temp_dir.path().join("templates"))
        .arg("--output-dir")
        .arg(temp_dir.path().join("out"))
        .arg("--definitions")
        .arg(temp_dir.path().join("catalog.json"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Code generation complete"));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("out/s3/service.txt")).unwrap(),
        "S3 1.44.0\n"
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("out/sqs/service.txt")).unwrap(),
        "SQS 1.44.0\n"
    );
}

#[test]
fn test_service_flag_restricts_generation() {
    let temp_dir = TempDir::new().unwrap();
    setup(temp_dir.path());

    Command::cargo_bin("svcgen")
        .unwrap()
        .arg("--template-dir")
        .arg(temp_dir.path().join("templates"))
        .arg("--output-dir")
        .arg(temp_dir.path().join("out"))
        .arg("--definitions")
        .arg(temp_dir.path().join("catalog.json"))
        .arg("--service")
        .arg("SQS")
        .assert()
        .success();

    assert!(temp_dir.path().join("out/sqs/service.txt").exists());
    assert!(!temp_dir.path().join("out/s3").exists());
}

#[test]
fn test_config_file_supplies_settings() {
    let temp_dir = TempDir::new().unwrap();
    setup(temp_dir.path());
    let config = format!(
        "template_dir = {:?}\noutput_dir = {:?}\ndefinitions = {:?}\n",
        temp_dir.path().join("templates").display().to_string(),
        temp_dir.path().join("generated").display().to_string(),
        temp_dir.path().join("catalog.json").display().to_string(),
    );
    fs::write(temp_dir.path().join("svcgen.toml"), config).unwrap();

    Command::cargo_bin("svcgen")
        .unwrap()
        .arg("--config")
        .arg(temp_dir.path().join("svcgen.toml"))
        .assert()
        .success();

    assert!(temp_dir.path().join("generated/s3/service.txt").exists());
}

#[test]
fn test_unknown_service_fails() {
    let temp_dir = TempDir::new().unwrap();
    setup(temp_dir.path());

    Command::cargo_bin("svcgen")
        .unwrap()
        .arg("--template-dir")
        .arg(temp_dir.path().join("templates"))
        .arg("--output-dir")
        .arg(temp_dir.path().join("out"))
        .arg("--definitions")
        .arg(temp_dir.path().join("catalog.json"))
        .arg("--service")
        .arg("ec2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No service with id 'ec2'"));
}

#[test]
fn test_missing_template_dir_fails() {
    let temp_dir = TempDir::new().unwrap();
    setup(temp_dir.path());

    Command::cargo_bin("svcgen")
        .unwrap()
        .arg("--template-dir")
        .arg(temp_dir.path().join("no-templates"))
        .arg("--output-dir")
        .arg(temp_dir.path().join("out"))
        .arg("--definitions")
        .arg(temp_dir.path().join("catalog.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to generate code"))
        .stderr(predicate::str::contains("Template discovery error"));
}

#[test]
fn test_missing_settings_fail() {
    Command::cargo_bin("svcgen")
        .unwrap()
        .arg("--output-dir")
        .arg("out")
        .assert()
        .failure()
        .stderr(predicate::str::contains("template_dir is required"));
}
