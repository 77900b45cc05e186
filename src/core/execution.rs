//! # Matrix Execution Engine Module / 矩阵执行引擎模块
//!
//! This module runs the build matrix. Each combination gets its own working
//! directory, one configure step and one build step, and exactly one line in
//! the build log, written before the next combination starts.
//!
//! 此模块运行构建矩阵。每个组合拥有自己的工作目录、一个配置步骤和一个构建步骤，
//! 并在构建日志中恰好占一行，该行在下一个组合开始之前写入。

use anyhow::{Context, Result};
use colored::*;
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::ToolSettings,
        models::{BuildResult, Combination, FailureReason, Outcome},
    },
    infra::{
        command::{self, Step, StepStatus},
        fs::{self, DirStatus},
        t,
    },
    reporting::buildlog::BuildLog,
};

/// How an external build invocation ended.
/// 外部构建调用的结束方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    Succeeded,
    Failed(FailureReason),
    /// The run was cancelled while the build was in progress.
    /// 构建进行期间运行被取消。
    Cancelled,
}

/// Runs the external build of one combination inside its working directory.
///
/// The default implementation is [`CmakeInvoker`]; tests drive the runner
/// with stub invokers.
///
/// 在组合的工作目录中运行该组合的外部构建。
/// 默认实现是 [`CmakeInvoker`]；测试使用桩调用器驱动运行器。
pub trait BuildInvoker {
    fn invoke(
        &self,
        combination: &Combination,
        build_dir: &Path,
        deadline: Option<tokio::time::Instant>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Invocation>;
}

/// Configures with `cmake` and builds with `make` (both configurable).
///
/// The configure step gets the compiler as `CXX` and the flag set as a single
/// `CXXFLAGS` value, plus `-DCMAKE_BUILD_TYPE=<type> <source dir>`. The build
/// step gets `-j<jobs>` and only runs after a successful configure.
///
/// 使用 `cmake` 配置并使用 `make` 构建（两者均可配置）。
#[derive(Debug, Clone)]
pub struct CmakeInvoker {
    configure: Step,
    build: Step,
    source_dir: String,
    base_flags: Vec<String>,
    jobs: usize,
}

impl CmakeInvoker {
    pub fn from_settings(tool: &ToolSettings) -> Result<Self> {
        Ok(Self {
            configure: Step::from_command_line(&tool.configure)
                .context("Invalid configure command")?,
            build: Step::from_command_line(&tool.build).context("Invalid build command")?,
            source_dir: tool.source_dir.clone(),
            base_flags: tool.base_flags.clone(),
            jobs: tool.jobs.max(1),
        })
    }

    /// The `CXXFLAGS` value: base flags, then the combination's non-empty
    /// flag tokens, separated by single spaces.
    pub fn cxx_flags(&self, combination: &Combination) -> String {
        self.base_flags
            .iter()
            .map(String::as_str)
            .chain(combination.flag_tokens())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn configure_step(&self, combination: &Combination) -> Step {
        self.configure
            .clone()
            .env("CXX", combination.compiler.as_str())
            .env("CXXFLAGS", self.cxx_flags(combination))
            .arg(format!("-DCMAKE_BUILD_TYPE={}", combination.build_type))
            .arg(self.source_dir.as_str())
    }

    pub fn build_step(&self) -> Step {
        self.build.clone().arg(format!("-j{}", self.jobs))
    }
}

impl BuildInvoker for CmakeInvoker {
    async fn invoke(
        &self,
        combination: &Combination,
        build_dir: &Path,
        deadline: Option<tokio::time::Instant>,
        cancel: &CancellationToken,
    ) -> Invocation {
        let steps = [
            (self.configure_step(combination), FailureReason::Configure),
            (self.build_step(), FailureReason::Build),
        ];

        for (step, reason) in &steps {
            println!("{} {}", t!("run.command_prefix").blue(), step.display());

            match command::run_step(step, build_dir, deadline, cancel).await {
                Ok(StepStatus::Success) => {}
                Ok(StepStatus::Failed(_)) => return Invocation::Failed(*reason),
                Ok(StepStatus::TimedOut) => return Invocation::Failed(FailureReason::Timeout),
                Ok(StepStatus::Cancelled) => return Invocation::Cancelled,
                Err(e) => {
                    eprintln!(
                        "{}",
                        t!("run.launch_failed", program = &step.program, error = e).red()
                    );
                    return Invocation::Failed(FailureReason::Launch);
                }
            }
        }
        Invocation::Succeeded
    }
}

/// Results of a matrix run.
/// 矩阵运行的结果。
#[derive(Debug, Default)]
pub struct MatrixReport {
    /// One result per completed combination, in enumeration order.
    /// 每个已完成组合一个结果，按枚举顺序排列。
    pub results: Vec<BuildResult>,
    /// `true` if the run stopped early because it was cancelled.
    /// 如果运行因被取消而提前停止，则为 `true`。
    pub cancelled: bool,
}

impl MatrixReport {
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }
}

/// Executes one build attempt per combination and records each outcome.
/// 为每个组合执行一次构建尝试并记录每个结果。
pub struct MatrixRunner<B: BuildInvoker, W: Write> {
    invoker: B,
    log: BuildLog<W>,
    output_dir: PathBuf,
    timeout: Option<Duration>,
    cancel: CancellationToken,
}

impl<B: BuildInvoker, W: Write> MatrixRunner<B, W> {
    pub fn new(invoker: B, log: BuildLog<W>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            invoker,
            log,
            output_dir: output_dir.into(),
            timeout: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Limits the wall-clock time of each combination.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Builds a single combination and appends its log line.
    ///
    /// Returns `Ok(None)` when the run was cancelled before the combination
    /// finished; no log line is written in that case. Only a failure to write
    /// the log is returned as an error.
    ///
    /// 构建单个组合并追加其日志行。
    /// 当运行在组合完成前被取消时返回 `Ok(None)`，此时不写入日志行。
    /// 只有写入日志失败才会作为错误返回。
    pub async fn run_one(&mut self, combination: &Combination) -> Result<Option<BuildResult>> {
        let dir_name = combination.dir_name();
        let build_dir = self.output_dir.join(&dir_name);
        let start_time = Instant::now();

        println!("{}", t!("run.building", name = &dir_name).blue());

        let outcome = match fs::prepare_build_dir(&build_dir) {
            Ok(status) => {
                if status == DirStatus::Reused {
                    println!(
                        "{}",
                        t!("run.reusing_dir", path = build_dir.display()).dimmed()
                    );
                }
                let deadline = self.timeout.map(|t| tokio::time::Instant::now() + t);
                match self
                    .invoker
                    .invoke(combination, &build_dir, deadline, &self.cancel)
                    .await
                {
                    Invocation::Succeeded => Outcome::Succeeded,
                    // A terminal Ctrl-C also reaches the child, which may exit
                    // before the token is cancelled.
                    Invocation::Failed(_) if self.cancel.is_cancelled() => return Ok(None),
                    Invocation::Failed(reason) => Outcome::Failed(reason),
                    Invocation::Cancelled => return Ok(None),
                }
            }
            Err(e) => {
                eprintln!(
                    "{}",
                    t!("run.dir_failed", path = build_dir.display(), error = e).yellow()
                );
                Outcome::Failed(FailureReason::Directory)
            }
        };

        let result = BuildResult::new(combination.clone(), outcome, start_time.elapsed());
        self.log
            .record(&result)
            .with_context(|| format!("Failed to write build log entry for {}", dir_name))?;

        let seconds = format!("{:.2}", result.duration.as_secs_f64());
        match outcome {
            Outcome::Succeeded => println!(
                "{}",
                t!("run.build_ok", name = &dir_name, duration = &seconds).green()
            ),
            Outcome::Failed(FailureReason::Timeout) => println!(
                "{}",
                t!("run.build_timeout", name = &dir_name, duration = &seconds).red()
            ),
            Outcome::Failed(_) => println!(
                "{}",
                t!("run.build_failed", name = &dir_name, duration = &seconds).red()
            ),
        }

        Ok(Some(result))
    }

    /// Builds every combination sequentially, in the given order.
    ///
    /// Build failures never stop the run; a log write failure does, and a
    /// cancellation stops it before the next combination.
    ///
    /// 按给定顺序依次构建每个组合。构建失败不会停止运行；日志写入失败会停止运行，
    /// 取消会在下一个组合开始之前停止运行。
    pub async fn run_matrix(&mut self, combinations: &[Combination]) -> Result<MatrixReport> {
        let mut report = MatrixReport::default();
        for (index, combination) in combinations.iter().enumerate() {
            if self.cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }
            println!(
                "\n{}",
                t!(
                    "run.progress",
                    current = index + 1,
                    total = combinations.len()
                )
                .bold()
            );
            match self.run_one(combination).await? {
                Some(result) => report.results.push(result),
                None => {
                    report.cancelled = true;
                    break;
                }
            }
        }
        Ok(report)
    }

    pub fn log(&self) -> &BuildLog<W> {
        &self.log
    }

    pub fn into_log(self) -> BuildLog<W> {
        self.log
    }
}
