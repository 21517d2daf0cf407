use assert_cmd::Command;
use predicates::prelude::*;

fn package() -> Command {
    let mut cmd = Command::cargo_bin("charm_package").unwrap();
    cmd.env_remove("CHARM_BUILD_TYPE");
    cmd
}

#[test]
fn missing_source_dir_fails() {
    package()
        .args(["--source", "/no/such/charm/source"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Source directory does not exist"));
}

#[test]
fn source_without_cmake_lists_fails() {
    let src = tempfile::tempdir().unwrap();
    package()
        .arg("--source")
        .arg(src.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("CMakeLists.txt not found"));
}

#[test]
fn bad_update_url_fails_before_building() {
    let work = tempfile::tempdir().unwrap();
    std::fs::write(work.path().join("CMakeLists.txt"), "project(Charm)").unwrap();
    package()
        .current_dir(work.path())
        .args(["--update-check-url", "ftp://example.com/updates.xml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("http or https"));
    assert!(!work.path().join("build").exists());
}

#[test]
fn help_mentions_recipe() {
    package()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--recipe"));
}
