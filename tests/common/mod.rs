// Shared test helpers for integration tests
#![allow(dead_code)]

use build_matrix::core::config::AxisSet;
use build_matrix::core::execution::{BuildInvoker, Invocation};
use build_matrix::core::models::Combination;
use build_matrix::core::planner::{Selection, plan_matrix};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

/// An invoker that never spawns anything; `decide` picks the outcome.
pub struct StubInvoker<F: Fn(&Combination) -> Invocation> {
    decide: F,
    pub calls: RefCell<Vec<PathBuf>>,
}

impl<F: Fn(&Combination) -> Invocation> StubInvoker<F> {
    pub fn new(decide: F) -> Self {
        Self {
            decide,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl<F: Fn(&Combination) -> Invocation> BuildInvoker for StubInvoker<F> {
    async fn invoke(
        &self,
        combination: &Combination,
        build_dir: &Path,
        _deadline: Option<tokio::time::Instant>,
        _cancel: &CancellationToken,
    ) -> Invocation {
        assert!(build_dir.is_dir(), "build dir must exist before invoking");
        self.calls.borrow_mut().push(build_dir.to_path_buf());
        (self.decide)(combination)
    }
}

/// The 32 combinations of the reference axes, in enumeration order.
pub fn reference_plan() -> Vec<Combination> {
    plan_matrix(&AxisSet::default(), &Selection::default())
        .unwrap()
        .combinations
}

pub fn log_lines(log: &[u8]) -> Vec<String> {
    String::from_utf8(log.to_vec())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Writes a BuildMatrix.toml whose tools are the given commands, so the CLI
/// can be driven without cmake.
pub fn write_stub_config(dir: &TempDir, configure: &str, build: &str) -> PathBuf {
    let path = dir.path().join("BuildMatrix.toml");
    let content = format!(
        r#"
language = "en"
log = "{log}"
output_dir = "{out}"

[tool]
configure = "{configure}"
build = "{build}"
"#,
        log = dir.path().join("buildlog").display(),
        out = dir.path().join("builds").display(),
    );
    fs::write(&path, content).unwrap();
    path
}

/// A configure script that fails only for g++.
pub fn write_gxx_failing_script(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("configure.sh");
    fs::write(&path, "#!/bin/sh\n[ \"$CXX\" != \"g++\" ]\n").unwrap();
    path
}
