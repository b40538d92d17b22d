use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::io::Write;

fn cmd() -> Command {
    Command::cargo_bin("kube-scorecard").unwrap()
}

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

#[test]
fn list_checks() {
    cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("container-security-context"))
        .stdout(contains("workload/StatefulSet"))
        .stdout(contains("container-seccomp-profile"));
}

#[test]
fn score_clean_manifests_exits_zero() {
    cmd()
        .args(["score", "--output-format", "ci"])
        .arg(fixture("good-deployment.yaml"))
        .assert()
        .success()
        .stdout(contains("[OK] web Deployment: Deployment has PodDisruptionBudget"))
        .stdout(contains("[CRITICAL]").not());
}

#[test]
fn score_critical_exits_one() {
    cmd()
        .args(["score", "-o", "ci"])
        .arg(fixture("insecure-pod.yaml"))
        .assert()
        .code(1)
        .stdout(contains(
            "[CRITICAL] no-context Pod: (app) Container has no configured security context",
        ));
}

#[test]
fn warning_only_fails_with_flag() {
    let args = [
        "score",
        "-o",
        "ci",
        "--ignore-test",
        "container-resources",
        "--ignore-test",
        "container-image-pull-policy",
        "--ignore-test",
        "container-security-context",
    ];

    cmd()
        .args(args)
        .arg(fixture("ingress-only-policy.yaml"))
        .assert()
        .success()
        .stdout(contains("[WARNING] api Pod: The pod does not have a matching egress network policy"));

    cmd()
        .args(args)
        .arg("--exit-one-on-warning")
        .arg(fixture("ingress-only-policy.yaml"))
        .assert()
        .code(1);
}

#[test]
fn score_reads_stdin() {
    let manifest = std::fs::read_to_string(fixture("external-name-service.yaml")).unwrap();
    cmd()
        .args(["score", "-o", "json", "-"])
        .write_stdin(manifest)
        .assert()
        .success()
        .stdout(contains("\"service-targets-pod\""))
        .stdout(contains("\"kube-system\""));
}

#[test]
fn invalid_document_fails_run() {
    cmd()
        .args(["score"])
        .arg(fixture("invalid-pod.yaml"))
        .assert()
        .code(2)
        .stderr(contains("failed to decode v1/Pod"));
}

#[test]
fn skip_invalid_continues() {
    cmd()
        .args(["score", "--skip-invalid", "-o", "ci"])
        .arg(fixture("invalid-pod.yaml"))
        .assert()
        .success()
        .stdout(contains("settings ConfigMap"));
}

#[test]
fn config_file_is_applied() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "ignoredNamespaces:\n  - backend").unwrap();

    cmd()
        .arg("--config")
        .arg(config.path())
        .args(["score", "-o", "ci"])
        .arg(fixture("ingress-only-policy.yaml"))
        .assert()
        .success()
        .stdout(contains("[SKIPPED] api Pod: Pod NetworkPolicy"));
}

#[test]
fn scores_directories() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(
        fixture("external-name-service.yaml"),
        dir.path().join("service.yaml"),
    )
    .unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a manifest").unwrap();

    cmd()
        .args(["score", "-o", "ci"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("upstream Service"));
}

#[test]
fn missing_file_fails_run() {
    cmd()
        .args(["score", "does-not-exist.yaml"])
        .assert()
        .code(2)
        .stderr(contains("does-not-exist.yaml"));
}
