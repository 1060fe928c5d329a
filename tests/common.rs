#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use hoflow::models::OfficerRecord;
use hoflow::store::{LocalCache, SlotCache};
use tempfile::TempDir;

/// Isolated environment: private HOME (no user config) + private database.
pub struct Sandbox {
    pub dir: TempDir,
    pub db: String,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = dir.path().join("hoflow_test.sqlite").to_string_lossy().to_string();
        Self { dir, db }
    }

    /// `hoflow --db <db> --test ...` with HOME pointing inside the sandbox.
    pub fn ho(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("hoflow");
        cmd.env("HOME", self.dir.path())
            .env_remove("HOFLOW_LOG")
            .args(["--db", &self.db, "--test"]);
        cmd
    }

    /// Sandbox with an initialized database.
    pub fn initialized() -> Self {
        let sb = Self::new();
        sb.ho().arg("init").assert().success();
        sb
    }

    pub fn add(&self, name: &str, gender: &str, unit: &str, signed_in: &str) {
        self.ho()
            .args([
                "add",
                "--name",
                name,
                "--gender",
                gender,
                "--unit",
                unit,
                "--signed-in",
                signed_in,
            ])
            .assert()
            .success();
    }

    /// Read the local cache directly.
    pub fn records(&self) -> Vec<OfficerRecord> {
        SlotCache::open(&self.db)
            .expect("open cache")
            .read()
            .expect("read cache")
    }

    pub fn id_of(&self, name: &str) -> String {
        self.records()
            .into_iter()
            .find(|r| r.full_name == name)
            .map(|r| r.id)
            .expect("officer in cache")
    }

    pub fn out_path(&self, file: &str) -> std::path::PathBuf {
        self.dir.path().join(file)
    }
}
