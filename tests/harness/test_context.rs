//! Shared testing harness for `sls-pkl` integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::fake_pkl::FakePkl;

/// Isolated working directory with a service file and a fake `pkl`.
pub(crate) struct TestContext {
    _root: TempDir,
    work_dir: PathBuf,
    pub(crate) pkl: FakePkl,
}

impl TestContext {
    pub(crate) fn new() -> Self {
        Self::with_pkl(FakePkl::new())
    }

    pub(crate) fn with_pkl(pkl: FakePkl) -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { _root: root, work_dir, pkl }
    }

    pub(crate) fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Write `serverless.yml` in the work directory.
    pub(crate) fn write_service(&self, yaml: &str) {
        fs::write(self.work_dir.join("serverless.yml"), yaml).expect("Failed to write service");
    }

    /// Directory used as the object storage account.
    pub(crate) fn storage_dir(&self) -> PathBuf {
        self.work_dir.join(".pkl-storage")
    }

    pub(crate) fn create_bucket(&self, bucket: &str) {
        fs::create_dir_all(self.storage_dir().join(bucket)).expect("Failed to create bucket");
    }

    pub(crate) fn object_path(&self, bucket: &str, key: &str) -> PathBuf {
        self.storage_dir().join(bucket).join(key)
    }

    /// Build a command for invoking the compiled `sls-pkl` binary in the work directory.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("sls-pkl").expect("Failed to locate sls-pkl binary");
        cmd.current_dir(&self.work_dir)
            .env_remove("RUST_LOG")
            .env_remove("SLS_DEBUG")
            .arg("--pkl-bin")
            .arg(&self.pkl.bin);
        cmd
    }
}
