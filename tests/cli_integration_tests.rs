use std::process::Command;

#[test]
fn test_cli_help_command() {
    let output = Command::new("cargo")
        .args(["run", "--", "--help"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("gmh"));
    assert!(stdout.contains("token"));
    assert!(stdout.contains("nbn"));
}

#[test]
fn test_write_without_nbn_or_input_file_is_a_usage_error() {
    let output = Command::new("cargo")
        .args(["run", "--", "nbn", "write"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("Failed to execute command");

    // clap reports missing required arguments with exit code 2
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_write_rejects_mixing_single_and_batch_form() {
    let output = Command::new("cargo")
        .args([
            "run",
            "--",
            "nbn",
            "write",
            "urn:nbn:nl:ui:13-abc",
            "http://a",
            "--input-file",
            "records.csv",
        ])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unloadable_config_is_a_caller_error() {
    let output = Command::new("cargo")
        .args(["run", "--", "nbn", "find", "http://a"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env("GMH_CLI_CONFIG", "/nonexistent/gmh-config.yaml")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error"));
}
