use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};

use tempfile::NamedTempFile;

#[test]
fn serve_command_logs_loaded_configuration() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(
        config,
        "host: 127.0.0.1\nport: 0\nmax_workers: 1\nlog_level: info"
    )
    .unwrap();

    let mut child = Command::new(env!("CARGO_BIN_EXE_edi"))
        .args(["serve", "--config", config.path().to_string_lossy().as_ref()])
        .env_remove("RUST_LOG")
        .env_remove("EDI_SERVICE_HOST")
        .env_remove("EDI_SERVICE_PORT")
        .env_remove("EDI_MAX_WORKERS")
        .env_remove("EDI_LOG_LEVEL")
        .env("NO_COLOR", "1")
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn edi serve");

    let stderr = child.stderr.take().expect("piped stderr");
    let mut seen = Vec::new();
    for line in BufReader::new(stderr).lines() {
        let line = line.unwrap();
        let started = line.contains("Starting EDI service");
        seen.push(line);
        if started {
            break;
        }
    }

    child.kill().unwrap();
    child.wait().unwrap();

    let loaded = seen
        .iter()
        .find(|line| line.contains("Loaded service configuration"))
        .unwrap_or_else(|| panic!("no configuration log in {seen:?}"));
    assert!(loaded.contains("127.0.0.1:0"), "log line: {loaded}");
    assert!(loaded.contains("max_workers=1"), "log line: {loaded}");
}

#[test]
fn serve_command_rejects_invalid_configuration() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "max_workers: 0").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_edi"))
        .args(["serve", "--config", config.path().to_string_lossy().as_ref()])
        .env_remove("EDI_MAX_WORKERS")
        .output()
        .expect("run edi serve");

    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("Failed to load service configuration"),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}
