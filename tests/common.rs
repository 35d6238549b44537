#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use serde_json::Value;
use tempfile::TempDir;

/// Isolated configuration directory and database for one test.
pub struct TestEnv {
    pub dir: TempDir,
    pub db: String,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let db = dir
            .path()
            .join("punchclock.sqlite")
            .to_string_lossy()
            .to_string();
        Self { dir, db }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("punchclock");
        cmd.env("PUNCHCLOCK_CONFIG_DIR", self.dir.path())
            .env_remove("RUST_LOG")
            .args(["--db", &self.db]);
        cmd
    }

    pub fn punch(&self, at: &str) {
        self.cmd().args(["punch", "--at", at]).assert().success();
    }

    pub fn json(&self, args: &[&str]) -> Value {
        let out = self.cmd().args(args).output().expect("run punchclock");
        assert!(
            out.status.success(),
            "command {args:?} failed: {}",
            String::from_utf8_lossy(&out.stderr)
        );
        serde_json::from_slice(&out.stdout).expect("valid JSON on stdout")
    }

    pub fn overtime(&self) -> Value {
        self.json(&["overtime", "--json"])
    }

    pub fn days(&self) -> Vec<Value> {
        match self.json(&["list", "--json"]) {
            Value::Array(days) => days,
            other => panic!("expected an array, got {other}"),
        }
    }
}
