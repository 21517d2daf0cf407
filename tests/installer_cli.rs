use assert_cmd::Command;
use predicates::prelude::*;

fn installer() -> Command {
    let mut cmd = Command::cargo_bin("charm_installer").unwrap();
    cmd.env_remove("CHARM_SIGN").env_remove("CHARM_BUILD_TYPE");
    cmd
}

#[test]
fn help_lists_deploy_flags() {
    installer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--deploy-vc-redist"))
        .stdout(predicate::str::contains("--plugin-folders"));
}

#[test]
fn missing_build_dir_fails() {
    let work = tempfile::tempdir().unwrap();
    installer()
        .current_dir(work.path())
        .args([
            "--build-dir",
            "no-such-build",
            "--application-file-name",
            "Charm.exe",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
    assert!(!work.path().join("deployImage").exists());
}

#[test]
fn application_file_name_is_required() {
    let work = tempfile::tempdir().unwrap();
    installer()
        .current_dir(work.path())
        .args(["--buildDir", "."])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--application-file-name is required"));
}

#[test]
fn invalid_architecture_is_rejected() {
    installer()
        .args(["--architecture", "sparc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sparc"));
}
