//! # Command Execution Module / 命令执行模块
//!
//! Describes an external step (program, arguments, environment) and runs it
//! inside a working directory while honoring a deadline and a cancellation
//! token. Output streams are inherited from the runner; only the exit status
//! is observed.
//!
//! 描述一个外部步骤（程序、参数、环境变量），并在工作目录中运行它，
//! 同时遵守截止时间和取消令牌。输出流继承自运行器；只观察退出状态。

use anyhow::{Context, Result, anyhow, bail};
use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Child;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// An external command, built as an explicit argument list.
/// 一个外部命令，以显式参数列表的形式构建。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl Step {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Parses a configured command line such as `cmake -G Ninja`.
    /// `~` and environment variables are expanded before splitting.
    ///
    /// 解析配置的命令行，例如 `cmake -G Ninja`。拆分前会展开 `~` 和环境变量。
    pub fn from_command_line(command: &str) -> Result<Self> {
        let expanded = shellexpand::full(command)
            .with_context(|| format!("Failed to expand command: {command}"))?
            .to_string();

        let parts = shlex::split(&expanded)
            .ok_or_else(|| anyhow!("Failed to parse command: {}", expanded))?;

        let mut parts = parts.into_iter();
        let Some(program) = parts.next() else {
            bail!("Empty command after parsing: '{}'", command);
        };

        Ok(Self {
            program,
            args: parts.collect(),
            env: Vec::new(),
        })
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Renders the step as a shell-quoted line for display.
    /// 将步骤渲染为带 shell 引号的行，用于显示。
    pub fn display(&self) -> String {
        let env = self.env.iter().map(|(k, v)| format!("{k}={v}"));
        let words: Vec<String> = env
            .chain(std::iter::once(self.program.clone()))
            .chain(self.args.iter().cloned())
            .collect();
        shlex::try_join(words.iter().map(String::as_str)).unwrap_or_else(|_| words.join(" "))
    }
}

/// The observed end of a step.
/// 步骤的观察结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Exit status zero / 退出状态为零
    Success,
    /// Non-zero exit; `None` when terminated by a signal.
    /// 非零退出；被信号终止时为 `None`。
    Failed(Option<i32>),
    /// Still running at the deadline, killed.
    /// 到达截止时间时仍在运行，已被终止。
    TimedOut,
    /// Killed because the run was cancelled.
    /// 因运行被取消而被终止。
    Cancelled,
}

impl From<ExitStatus> for StepStatus {
    fn from(status: ExitStatus) -> Self {
        if status.success() {
            StepStatus::Success
        } else {
            StepStatus::Failed(status.code())
        }
    }
}

/// Spawns `step` in `cwd` and waits for it.
///
/// Returns an error only when the process could not be spawned or waited on.
///
/// 在 `cwd` 中派生 `step` 并等待它。仅当进程无法派生或等待时才返回错误。
pub async fn run_step(
    step: &Step,
    cwd: &Path,
    deadline: Option<Instant>,
    cancel: &CancellationToken,
) -> io::Result<StepStatus> {
    if cancel.is_cancelled() {
        return Ok(StepStatus::Cancelled);
    }

    let mut cmd = tokio::process::Command::new(&step.program);
    cmd.args(&step.args)
        .envs(step.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .current_dir(cwd)
        .stdin(Stdio::null())
        .kill_on_drop(true);

    let mut child = cmd.spawn()?;

    let waited = tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        res = wait_with_deadline(&mut child, deadline) => Some(res),
    };

    match waited {
        None => {
            kill(&mut child).await;
            Ok(StepStatus::Cancelled)
        }
        Some(Ok(Some(status))) => Ok(status.into()),
        Some(Ok(None)) => {
            kill(&mut child).await;
            Ok(StepStatus::TimedOut)
        }
        Some(Err(e)) => Err(e),
    }
}

async fn wait_with_deadline(
    child: &mut Child,
    deadline: Option<Instant>,
) -> io::Result<Option<ExitStatus>> {
    match deadline {
        Some(deadline) => match tokio::time::timeout_at(deadline, child.wait()).await {
            Ok(status) => status.map(Some),
            Err(_) => Ok(None),
        },
        None => child.wait().await.map(Some),
    }
}

async fn kill(child: &mut Child) {
    if let Err(e) = child.kill().await {
        eprintln!("Failed to kill child process: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_is_split_like_a_shell() {
        let step = Step::from_command_line("cmake -G 'Unix Makefiles'").unwrap();
        assert_eq!(step.program, "cmake");
        assert_eq!(step.args, vec!["-G", "Unix Makefiles"]);
    }

    #[test]
    fn empty_command_line_is_rejected() {
        assert!(Step::from_command_line("   ").is_err());
        assert!(Step::from_command_line("cmake 'unterminated").is_err());
    }

    #[test]
    fn display_quotes_flag_set_as_one_word() {
        let step = Step::new("cmake")
            .env("CXX", "g++")
            .env("CXXFLAGS", "-Wall -Werror -O2")
            .arg("-DCMAKE_BUILD_TYPE=Debug")
            .arg("../..");
        let words = shlex::split(&step.display()).unwrap();
        assert_eq!(
            words,
            vec![
                "CXX=g++",
                "CXXFLAGS=-Wall -Werror -O2",
                "cmake",
                "-DCMAKE_BUILD_TYPE=Debug",
                "../..",
            ]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exit_codes_are_observed() {
        let cwd = std::env::temp_dir();
        let token = CancellationToken::new();

        let ok = run_step(&Step::new("true"), &cwd, None, &token).await.unwrap();
        assert_eq!(ok, StepStatus::Success);

        let failed = run_step(&Step::new("sh").arg("-c").arg("exit 3"), &cwd, None, &token)
            .await
            .unwrap();
        assert_eq!(failed, StepStatus::Failed(Some(3)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn deadline_kills_long_running_step() {
        let cwd = std::env::temp_dir();
        let token = CancellationToken::new();
        let deadline = Instant::now() + std::time::Duration::from_millis(100);

        let status = run_step(&Step::new("sleep").arg("5"), &cwd, Some(deadline), &token)
            .await
            .unwrap();
        assert_eq!(status, StepStatus::TimedOut);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn cancellation_kills_running_step() {
        let cwd = std::env::temp_dir();
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            canceller.cancel();
        });

        let started = std::time::Instant::now();
        let status = run_step(&Step::new("sleep").arg("5"), &cwd, None, &token)
            .await
            .unwrap();
        assert_eq!(status, StepStatus::Cancelled);
        assert!(started.elapsed() < std::time::Duration::from_secs(3));
    }

    #[tokio::test]
    async fn cancelled_token_skips_spawning() {
        let token = CancellationToken::new();
        token.cancel();
        let status = run_step(
            &Step::new("this_command_definitely_does_not_exist_12345"),
            &std::env::temp_dir(),
            None,
            &token,
        )
        .await
        .unwrap();
        assert_eq!(status, StepStatus::Cancelled);
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let token = CancellationToken::new();
        let result = run_step(
            &Step::new("this_command_definitely_does_not_exist_12345"),
            &std::env::temp_dir(),
            None,
            &token,
        )
        .await;
        assert!(result.is_err());
    }
}
