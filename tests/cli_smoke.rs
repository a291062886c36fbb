use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

const FIXTURE: &str = r#"[
  {
    "sha": "a1a1a1a1a1a1a1a1",
    "commit": {"author": {"name": "Alice", "email": "a@example.com", "date": "2024-01-01T09:00:00Z"}, "message": "Add parser\n\nInitial version"},
    "author": {"login": "a", "avatar_url": "https://avatars.example/a"}
  },
  {
    "sha": "a2a2a2a2a2a2a2a2",
    "commit": {"author": {"name": "Alice", "email": "a@example.com", "date": "2024-01-01T17:30:00Z"}, "message": "Fix parser"},
    "author": {"login": "a", "avatar_url": "https://avatars.example/a"}
  },
  {
    "sha": "b1b1b1b1b1b1b1b1",
    "commit": {"author": {"name": "Bob", "email": "b@example.com", "date": "2024-01-02T11:00:00Z"}, "message": "Document parser"},
    "author": {"login": "b", "avatar_url": null}
  },
  {
    "sha": "c1c1c1c1c1c1c1c1",
    "commit": {"author": {"name": "Imported", "email": "old@example.com", "date": "2024-01-02T12:00:00Z"}, "message": "Legacy import"},
    "author": null
  }
]"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(commits_json: &str) -> Self {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("commits.json"), commits_json).unwrap();
        Self { dir }
    }

    fn input(&self) -> PathBuf {
        self.dir.path().join("commits.json")
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("commitpulse").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("GITHUB_TOKEN")
            .env_remove("GEMINI_API_KEY")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.config());
        cmd
    }
}

fn input_args(path: &Path) -> [String; 2] {
    ["--input".to_string(), path.display().to_string()]
}

fn stderr_of(cmd: &mut Command) -> String {
    let out = cmd.assert().failure().get_output().stderr.clone();
    String::from_utf8_lossy(&out).to_string()
}

#[test]
fn activity_json_outputs_series_and_contributors() {
    let fx = Fixture::new(FIXTURE);
    let out = fx
        .cmd()
        .args(["activity", "octo/widgets", "--window", "all", "--now", "2024-01-03", "--json"])
        .args(input_args(&fx.input()))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(v["repository"], "octo/widgets");
    assert_eq!(v["window"], "all");
    assert_eq!(v["total_commits"], 4);

    let days: Vec<(String, u64)> = v["daily_series"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| (d["date"].as_str().unwrap().to_string(), d["count"].as_u64().unwrap()))
        .collect();
    assert_eq!(
        days,
        vec![
            ("2024-01-01".to_string(), 2),
            ("2024-01-02".to_string(), 2),
            ("2024-01-03".to_string(), 0),
        ]
    );

    let contributors = v["contributors"].as_array().unwrap();
    assert_eq!(contributors.len(), 2);
    assert_eq!(contributors[0]["login"], "a");
    assert_eq!(contributors[0]["total_commits"], 2);
    assert_eq!(contributors[1]["login"], "b");
    assert_eq!(contributors[1]["avatar_url"], serde_json::Value::Null);
}

#[test]
fn activity_ndjson_tags_each_line() {
    let fx = Fixture::new(FIXTURE);
    let out = fx
        .cmd()
        .args(["activity", "https://github.com/octo/widgets", "-w", "week", "--now", "2024-01-03T10:00:00Z", "--ndjson"])
        .args(input_args(&fx.input()))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let lines: Vec<serde_json::Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    // 2024-01-03 is a Wednesday: Monday 1st through Wednesday 3rd
    let days = lines.iter().filter(|l| l["kind"] == "day").count();
    let contributors = lines.iter().filter(|l| l["kind"] == "contributor").count();
    assert_eq!(days, 3);
    assert_eq!(contributors, 2);
}

#[test]
fn activity_text_summary_mentions_top_contributor() {
    let fx = Fixture::new(FIXTURE);
    let out = fx
        .cmd()
        .args(["activity", "octo/widgets", "--window", "all", "--now", "2024-01-03"])
        .args(input_args(&fx.input()))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("Top contributors"));
    assert!(text.contains("2024-01-02"));
}

#[test]
fn unknown_window_is_rejected() {
    let fx = Fixture::new(FIXTURE);
    let stderr = stderr_of(
        fx.cmd()
            .args(["activity", "octo/widgets", "--window", "fortnight", "--json"])
            .args(input_args(&fx.input())),
    );
    assert!(stderr.contains("Unknown time window 'fortnight'"), "{stderr}");
}

#[test]
fn malformed_record_fails_the_fetch() {
    let fx = Fixture::new(
        r#"[{"sha": "bad0001", "commit": {"author": {"name": "X"}, "message": "no date"}, "author": null}]"#,
    );
    let stderr = stderr_of(
        fx.cmd()
            .args(["activity", "octo/widgets", "--json"])
            .args(input_args(&fx.input())),
    );
    assert!(stderr.contains("Malformed commit record bad0001"), "{stderr}");
}

#[test]
fn non_github_url_is_rejected() {
    let fx = Fixture::new(FIXTURE);
    let stderr = stderr_of(
        fx.cmd()
            .args(["commits", "https://gitlab.com/octo/widgets", "--json"])
            .args(input_args(&fx.input())),
    );
    assert!(stderr.contains("Not a GitHub repository"), "{stderr}");
}

#[test]
fn commits_filter_by_author() {
    let fx = Fixture::new(FIXTURE);
    let out = fx
        .cmd()
        .args(["commits", "octo/widgets", "--author", "B", "--json"])
        .args(input_args(&fx.input()))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let entries = v["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["sha"], "b1b1b1b1b1b1b1b1");
    assert_eq!(entries[0]["author_display_name"], "Bob");
}

#[test]
fn rewrite_requires_an_api_key() {
    let fx = Fixture::new(FIXTURE);
    let stderr = stderr_of(
        fx.cmd()
            .args(["rewrite", "octo/widgets", "a1a1a1a"])
            .args(input_args(&fx.input())),
    );
    assert!(stderr.contains("Missing credential"), "{stderr}");
}

#[test]
fn config_init_refuses_to_overwrite() {
    let fx = Fixture::new(FIXTURE);
    fx.cmd().args(["config", "init"]).assert().success();
    assert!(fx.config().exists());

    let stderr = stderr_of(fx.cmd().args(["config", "init"]));
    assert!(stderr.contains("already exists"), "{stderr}");

    fx.cmd().args(["config", "init", "--force"]).assert().success();
}

#[test]
fn config_show_masks_tokens() {
    let fx = Fixture::new(FIXTURE);
    fs::write(fx.config(), "[github]\ntoken = \"ghp_supersecret1234\"\n").unwrap();
    let out = fx
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("****1234"), "{text}");
    assert!(!text.contains("supersecret"), "{text}");
}
