use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cogcore(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cogcore").unwrap();
    cmd.current_dir(dir.path()).env("COGCORE_ROOT", dir.path());
    cmd
}

fn write_pack(dir: &TempDir, name: &str, defaults: &str) -> std::path::PathBuf {
    let root = dir.path().join(name);
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("defaults.conf"), defaults).unwrap();
    root
}

// ---------------------------------------------------------------------------
// cogcore install
// ---------------------------------------------------------------------------

#[test]
fn install_aider_creates_artifacts() {
    let dir = TempDir::new().unwrap();
    cogcore(&dir)
        .args(["install", "--adapter", "aider"])
        .assert()
        .success()
        .stdout(predicate::str::contains("degraded: hook 'validate-bash'"));

    assert!(dir.path().join(".aider.conf.yml").exists());
    assert!(dir.path().join("CONVENTIONS.md").exists());
    assert!(dir.path().join(".aiderignore").exists());
    assert!(dir.path().join("cc-aider-start.sh").exists());
    assert!(dir
        .path()
        .join(".cognitive-core/skills/commit-discipline.md")
        .exists());
    assert!(dir
        .path()
        .join(".cognitive-core/advisories/validate-bash.md")
        .exists());
}

#[test]
fn install_claude_creates_artifacts() {
    let dir = TempDir::new().unwrap();
    cogcore(&dir)
        .args(["install", "--adapter", "claude-code"])
        .assert()
        .success();

    assert!(dir.path().join(".claude/settings.json").exists());
    assert!(dir.path().join(".claude/hooks/validate-bash.sh").exists());
    assert!(dir
        .path()
        .join(".claude/skills/commit-discipline/SKILL.md")
        .exists());
    assert!(dir.path().join("CLAUDE.md").exists());
}

#[test]
fn install_is_idempotent() {
    let dir = TempDir::new().unwrap();
    cogcore(&dir)
        .args(["install", "--adapter", "claude-code"])
        .assert()
        .success();
    cogcore(&dir)
        .args(["install", "--adapter", "claude-code"])
        .assert()
        .success();
}

#[test]
fn install_preserves_edited_guide() {
    let dir = TempDir::new().unwrap();
    cogcore(&dir)
        .args(["install", "--adapter", "aider"])
        .assert()
        .success();

    std::fs::write(dir.path().join("CONVENTIONS.md"), "my own rules\n").unwrap();

    cogcore(&dir)
        .args(["install", "--adapter", "aider"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped: CONVENTIONS.md"));

    let content = std::fs::read_to_string(dir.path().join("CONVENTIONS.md")).unwrap();
    assert_eq!(content, "my own rules\n");
}

#[test]
fn install_force_regenerates_guide() {
    let dir = TempDir::new().unwrap();
    cogcore(&dir)
        .args(["install", "--adapter", "aider"])
        .assert()
        .success();

    std::fs::write(dir.path().join("CONVENTIONS.md"), "my own rules\n").unwrap();

    cogcore(&dir)
        .args(["install", "--adapter", "aider", "--force"])
        .assert()
        .success();

    let content = std::fs::read_to_string(dir.path().join("CONVENTIONS.md")).unwrap();
    assert!(content.contains("# Project Conventions"));
}

#[test]
fn install_reads_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("cognitive-core.conf"),
        "project_name=billing\nlanguage=rust\n",
    )
    .unwrap();

    cogcore(&dir)
        .args(["install", "--adapter", "aider"])
        .assert()
        .success();

    let guide = std::fs::read_to_string(dir.path().join("CONVENTIONS.md")).unwrap();
    assert!(guide.contains("# Project Conventions — billing"));
    assert!(guide.contains("**Language**: rust"));
}

#[test]
fn install_unknown_adapter_fails() {
    let dir = TempDir::new().unwrap();
    cogcore(&dir)
        .args(["install", "--adapter", "emacs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown adapter"));
}

// ---------------------------------------------------------------------------
// packs
// ---------------------------------------------------------------------------

#[test]
fn pack_blocked_patterns_union_into_settings() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("cognitive-core.conf"),
        "blocked_patterns=rm -rf /\n",
    )
    .unwrap();
    let pack = write_pack(&dir, "postgres-pack", "blocked_patterns=db.drop\n");

    cogcore(&dir)
        .args([
            "install",
            "--adapter",
            "claude-code",
            "--pack",
            pack.to_str().unwrap(),
        ])
        .assert()
        .success();

    let settings = std::fs::read_to_string(dir.path().join(".claude/settings.json")).unwrap();
    assert!(settings.contains("Bash(rm -rf /)"));
    assert!(settings.contains("Bash(db.drop)"));
}

#[test]
fn broken_pack_aborts_unless_partial_allowed() {
    let dir = TempDir::new().unwrap();
    let pack = write_pack(&dir, "broken-pack", "not a key value pair\n");

    cogcore(&dir)
        .args([
            "install",
            "--adapter",
            "aider",
            "--pack",
            pack.to_str().unwrap(),
        ])
        .assert()
        .failure();
    // Strict failure happens before any artifact generation.
    assert!(!dir.path().join(".aider.conf.yml").exists());

    cogcore(&dir)
        .args([
            "install",
            "--adapter",
            "aider",
            "--pack",
            pack.to_str().unwrap(),
            "--allow-partial-packs",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("pack skipped"));
    assert!(dir.path().join(".aider.conf.yml").exists());
}

#[cfg(unix)]
#[test]
fn pack_score_parses_verdict() {
    let dir = TempDir::new().unwrap();
    let pack = write_pack(&dir, "scored-pack", "");
    std::fs::write(pack.join("fitness.sh"), "echo '88 schema healthy'\n").unwrap();

    cogcore(&dir)
        .args(["pack", "score", pack.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("88 schema healthy"));
}

// ---------------------------------------------------------------------------
// validate / generate / skills
// ---------------------------------------------------------------------------

#[test]
fn validate_known_adapters() {
    let dir = TempDir::new().unwrap();
    for adapter in ["claude-code", "aider"] {
        cogcore(&dir)
            .args(["validate", adapter])
            .assert()
            .success()
            .stdout(predicate::str::contains("is valid"));
    }
}

#[test]
fn generate_settings_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let first = cogcore(&dir)
        .args(["generate", "settings", "--adapter", "claude-code"])
        .output()
        .unwrap();
    let second = cogcore(&dir)
        .args(["generate", "settings", "--adapter", "claude-code"])
        .output()
        .unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn generate_guide_marks_advisory_rules() {
    let dir = TempDir::new().unwrap();
    cogcore(&dir)
        .args(["generate", "guide", "--adapter", "aider"])
        .assert()
        .success()
        .stdout(predicate::str::contains("advisory — not enforced"))
        .stdout(predicate::str::contains(
            "Blocked: rm targeting system-critical path",
        ));
}

#[test]
fn skills_list_shows_bundled_set() {
    let dir = TempDir::new().unwrap();
    cogcore(&dir)
        .args(["skills"])
        .assert()
        .success()
        .stdout(predicate::str::contains("commit-discipline"))
        .stdout(predicate::str::contains("dependency-audit"))
        .stdout(predicate::str::contains("test-first"));
}
