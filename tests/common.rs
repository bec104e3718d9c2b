#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway home plus data directory, so no test ever sees a real `~/.rsal`.
pub struct TestRoom {
    pub home: TempDir,
    pub data: TempDir,
}

impl TestRoom {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("temp home"),
            data: tempfile::tempdir().expect("temp data dir"),
        }
    }

    pub fn data_dir(&self) -> String {
        self.data.path().to_string_lossy().to_string()
    }

    /// `rsal --data-dir <tmp>` with HOME pointed at a temp dir.
    pub fn rsal(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("rsal");
        cmd.env("HOME", self.home.path())
            .env_remove("EDITOR")
            .args(["--data-dir", &self.data_dir()]);
        cmd
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data.path().join("logs")
    }

    pub fn write_log(&self, name: &str, body: &str) {
        fs::create_dir_all(self.logs_dir()).expect("create logs dir");
        fs::write(self.logs_dir().join(name), body).expect("write log file");
    }

    pub fn table(&self, id: &str) -> PathBuf {
        self.data.path().join("attendance").join(format!("{id}.csv"))
    }

    pub fn out(&self, name: &str) -> PathBuf {
        self.home.path().join(name)
    }
}

/// Two cards over a Friday and the following Monday.
pub fn seed_week(room: &TestRoom) {
    room.write_log(
        "20240301.log",
        "2024-03-01T07:00:00+00:00,1234567890\n\
         2024-03-01T07:10:00+00:00,9999999999\n\
         2024-03-01T15:00:00+00:00,1234567890\n",
    );
    room.write_log(
        "20240304.log",
        "2024-03-04T07:30:00+00:00,1234567890\n\
         2024-03-04T12:30:00+00:00,1234567890\n",
    );
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("read file")
}
