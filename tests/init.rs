use std::process::Command;

#[test]
fn init_creates_valid_toml() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_galton"))
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "galton init failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let config_path = dir.path().join(".galton.toml");
    assert!(config_path.exists(), ".galton.toml should exist");

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[generate]"));
    assert!(content.contains("[analysis]"));
    assert!(content.contains("[report]"));

    // Verify it's valid TOML that galton-core can parse
    let _config: galton_core::GaltonConfig = toml::from_str(&content).unwrap();
}

#[test]
fn init_refuses_if_exists() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".galton.toml"), "# existing").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_galton"))
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
}

#[test]
fn no_subcommand_prints_welcome() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_galton"))
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Quick start"));
    assert!(stdout.contains("galton init"));
}

#[test]
fn config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".galton.toml"),
        "[generate]\nrows = 25\nseed = 3\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_galton"))
        .args(["generate", "--out", "data/small.csv"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "generate failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // 25 configured rows plus the header line
    let content = std::fs::read_to_string(dir.path().join("data/small.csv")).unwrap();
    assert_eq!(content.lines().count(), 26);
}

#[test]
fn invalid_alpha_in_config_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".galton.toml"), "[analysis]\nalpha = 1.5\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_galton"))
        .args(["generate", "--rows", "5"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("significance threshold"), "stderr: {stderr}");
}
