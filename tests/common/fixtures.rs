//! Test fixtures and sample traces.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use xtsttopng::models::AppConfig;
use xtsttopng::rendering::RasterFormat;
use xtsttopng::services::{Batch, BatchSummary};

/// Sample trace contents
pub mod traces {
    /// 2x1 frame with two distinct pixel values
    pub const TWO_PIXELS: &str = "2 1 8\n0\n1\n";

    /// 1x1 frame followed by a stray record that is not a header
    pub const REPEATED_KEY: &str = "1 1 8\n5\n5\n";

    /// Header promises 3 pixels, records cover 2
    pub const SHORT_FRAME: &str = "3 1 8\n0\n1\n";

    /// Two frames back to back
    pub const TWO_FRAMES: &str = "2 1 8\n2,a\n1 1 8\nb\n";

    /// 4x2 frame using runs and four distinct values
    pub const RUNS: &str = "4 2 8\n3,10\n1,20\n2,30\n2,40\n";
}

/// Scratch directory holding inputs and an `out/` directory for results
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn out_dir(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    /// Write a trace file and return its path
    pub fn input(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write input");
        path
    }

    /// Path of an output file inside `out/`
    pub fn output(&self, name: &str) -> PathBuf {
        self.out_dir().join(name)
    }

    /// Config writing into `out/` with a fixed seed
    pub fn config(&self, format: RasterFormat) -> AppConfig {
        AppConfig {
            format,
            output_dir: Some(self.out_dir()),
            seed: Some(7),
            ..AppConfig::default()
        }
    }

    /// Run a batch and expect it to finish
    pub fn run(&self, config: AppConfig, inputs: &[PathBuf]) -> BatchSummary {
        Batch::new(config)
            .run(inputs)
            .expect("Batch should complete")
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
