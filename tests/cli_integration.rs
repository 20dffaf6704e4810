//! CLI integration tests
//!
//! Drives the compiled binary against temporary directories.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn pairset() -> Command {
    Command::cargo_bin("pairset").expect("binary builds")
}

fn write_file(dir: &Path, name: &str, content: &[u8]) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn pair_happy_path() {
    let root = tempdir().unwrap();
    let clean = root.path().join("clean");
    let noisy = root.path().join("noisy");
    fs::create_dir_all(&clean).unwrap();
    fs::create_dir_all(&noisy).unwrap();
    write_file(&clean, "a_gt.png", b"clean-a");
    write_file(&noisy, "a_1.png", b"noisy-a");

    pairset()
        .current_dir(root.path())
        .args(["pair", "clean", "noisy", "clean_out", "noisy_out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pairing Summary"))
        .stdout(predicate::str::contains("Pairs created:   1"));

    assert_eq!(
        fs::read(root.path().join("clean_out/1.jpg")).unwrap(),
        b"clean-a"
    );
    assert_eq!(
        fs::read(root.path().join("noisy_out/1.jpg")).unwrap(),
        b"noisy-a"
    );
    assert!(!clean.exists());
    assert!(!noisy.exists());
}

#[test]
fn pair_quiet_suppresses_output() {
    let root = tempdir().unwrap();
    fs::create_dir_all(root.path().join("clean")).unwrap();
    fs::create_dir_all(root.path().join("noisy")).unwrap();

    pairset()
        .current_dir(root.path())
        .args(["pair", "clean", "noisy", "clean_out", "noisy_out", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn pair_missing_source_exits_with_input_not_found() {
    let root = tempdir().unwrap();

    pairset()
        .current_dir(root.path())
        .args(["pair", "absent", "also-absent", "clean_out", "noisy_out"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn pair_dry_run_touches_nothing() {
    let root = tempdir().unwrap();
    let clean = root.path().join("clean");
    let noisy = root.path().join("noisy");
    fs::create_dir_all(&clean).unwrap();
    fs::create_dir_all(&noisy).unwrap();
    write_file(&clean, "a_gt.png", b"c");
    write_file(&noisy, "a_1.png", b"n");

    pairset()
        .current_dir(root.path())
        .args(["pair", "clean", "noisy", "clean_out", "noisy_out", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Execution Plan"))
        .stdout(predicate::str::contains("Clean: 1"));

    assert!(clean.join("a_gt.png").exists());
    assert!(noisy.join("a_1.png").exists());
    assert!(!root.path().join("clean_out").exists());
    assert!(!root.path().join("noisy_out").exists());
}

#[test]
fn rename_prefixes_numbered_files() {
    let root = tempdir().unwrap();
    let target = root.path().join("target");
    fs::create_dir_all(&target).unwrap();
    write_file(&target, "1.jpg", b"one");
    write_file(&target, "2.jpg", b"two");
    write_file(&target, "keep.txt", b"x");

    pairset()
        .current_dir(root.path())
        .args(["rename", "target"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 file(s) renamed"));

    assert!(target.join("image1.jpg").exists());
    assert!(target.join("image2.jpg").exists());
    assert!(target.join("keep.txt").exists());
    assert!(!target.join("1.jpg").exists());
}

#[test]
fn rename_custom_prefix_dry_run() {
    let root = tempdir().unwrap();
    let target = root.path().join("target");
    fs::create_dir_all(&target).unwrap();
    write_file(&target, "7.jpg", b"seven");

    pairset()
        .current_dir(root.path())
        .args(["rename", "target", "--prefix", "img", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("img7.jpg"));

    assert!(target.join("7.jpg").exists());
    assert!(!target.join("img7.jpg").exists());
}

#[test]
fn info_reports_version() {
    pairset()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stdout(predicate::str::contains("Config File Locations"));
}

#[test]
fn config_file_drives_collision_policy() {
    let root = tempdir().unwrap();
    let clean = root.path().join("clean");
    let noisy = root.path().join("noisy");
    fs::create_dir_all(&clean).unwrap();
    fs::create_dir_all(&noisy).unwrap();
    // Two clean files collide on the same identifier.
    write_file(&clean, "a_v1.png", b"first");
    write_file(&clean, "a_v2.png", b"second");
    write_file(&noisy, "a_blur.png", b"n");
    fs::write(
        root.path().join("reject.toml"),
        "[pairing]\ncollision = \"reject\"\n",
    )
    .unwrap();

    pairset()
        .current_dir(root.path())
        .args([
            "pair",
            "clean",
            "noisy",
            "clean_out",
            "noisy_out",
            "--config",
            "reject.toml",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Duplicate identifier"));
}
