use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn drawboard_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("drawboard").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path());
    cmd
}

const ARROW_SCRIPT: &str = r#"[
    {"tool": "arrow"},
    {"style": {"stroke": "blue", "fill": "blue", "stroke_width": 2}},
    {"down": [20, 50]}, {"move": [80, 50]}, {"move": [140, 50]}, {"up": [140, 50]},
    {"tool": "rectangle"},
    {"down": [10, 10]}, {"move": [60, 40]}, {"up": [60, 40]}
]"#;

#[test]
fn help_prints_about() {
    let home = TempDir::new().unwrap();
    drawboard_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("drag-to-shape"));
}

#[test]
fn no_arguments_prints_usage() {
    let home = TempDir::new().unwrap();
    drawboard_cmd(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn script_without_destination_fails() {
    let home = TempDir::new().unwrap();
    let script = home.path().join("script.json");
    fs::write(&script, ARROW_SCRIPT).unwrap();

    drawboard_cmd(&home)
        .arg("--script")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to write"));
}

#[test]
fn script_renders_png() {
    let home = TempDir::new().unwrap();
    let script = home.path().join("script.json");
    let output = home.path().join("board.png");
    fs::write(&script, ARROW_SCRIPT).unwrap();

    drawboard_cmd(&home)
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .args(["--width", "200", "--height", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 2 objects"));

    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn export_then_load_round_trips_scene() {
    let home = TempDir::new().unwrap();
    let script = home.path().join("script.json");
    let scene = home.path().join("scene.json");
    let output = home.path().join("board.png");
    fs::write(&script, ARROW_SCRIPT).unwrap();

    drawboard_cmd(&home)
        .arg("--script")
        .arg(&script)
        .arg("--export")
        .arg(&scene)
        .arg("--compress")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 objects").and(predicate::str::contains("gzip")));

    let bytes = fs::read(&scene).unwrap();
    assert_eq!(&bytes[..2], &[0x1f, 0x8b]);

    drawboard_cmd(&home)
        .arg("--load")
        .arg(&scene)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 2 objects"));
}

#[test]
fn compress_requires_export() {
    let home = TempDir::new().unwrap();
    drawboard_cmd(&home)
        .arg("--compress")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--export"));
}

#[test]
fn invalid_script_reports_path() {
    let home = TempDir::new().unwrap();
    let script = home.path().join("broken.json");
    fs::write(&script, r#"[{"teleport": [1, 2]}]"#).unwrap();

    drawboard_cmd(&home)
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(home.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.json"));
}

#[test]
fn conflicting_keybindings_in_config_fail() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("drawboard");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[keybindings]\ncopy = [\"Ctrl+X\"]\npaste = [\"Ctrl+X\"]\n",
    )
    .unwrap();
    let script = home.path().join("script.json");
    fs::write(&script, "[]").unwrap();

    drawboard_cmd(&home)
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(home.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate keybinding"));
}

#[test]
fn schema_dump_lists_sections() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("keybindings").and(predicate::str::contains("export")));
}
