#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Canonical sales export used across the suite. Three rows survive
/// cleaning (Juice 10 and Smoothie 20 on Jan 1, Juice 5 on Jan 2); the
/// satisfaction column independently yields ratings [5, 5, 3, 5].
pub const SALES_CSV: &str = "\
Category,Sales,Date Ordered,Service Satisfaction Rating
Juice,10,2024-01-01,5
Smoothie,20,2024-01-01,5
Juice,5,2024-01-02,bad
Smoothie,oops,2024-01-02,3
,8,2024-01-03,5
Juice,7,not-a-date,
";

/// Scratch directory that cleans up after itself; CSV fixtures are
/// written per test case.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Writes the canonical sales fixture under `name`.
    pub fn write_sales_csv(&self, name: &str) -> PathBuf {
        self.write(name, SALES_CSV)
    }
}
