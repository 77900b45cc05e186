//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the build matrix:
//! a single axis combination, the reason a combination failed, and the final
//! result recorded for it.
//!
//! 此模块定义了整个构建矩阵中使用的核心数据结构：
//! 单个轴组合、组合失败的原因以及为其记录的最终结果。

use crate::infra::t;
use std::fmt;
use std::time::Duration;

/// One selected value per axis, defining a single build attempt.
/// 每个轴选定一个值，定义一次构建尝试。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Combination {
    /// The compiler identifier, e.g. "g++".
    /// 编译器标识符，例如 "g++"。
    pub compiler: String,
    /// One token per flag axis, in axis order. Tokens may be empty.
    /// 每个标志轴一个标记，按轴顺序排列。标记可以为空。
    pub flags: Vec<String>,
    /// The build-configuration label, e.g. "Release".
    /// 构建配置标签，例如 "Release"。
    pub build_type: String,
}

impl Combination {
    pub fn new(
        compiler: impl Into<String>,
        flags: Vec<String>,
        build_type: impl Into<String>,
    ) -> Self {
        Self {
            compiler: compiler.into(),
            flags,
            build_type: build_type.into(),
        }
    }

    /// The working directory name of this combination:
    /// `<compiler>_<flag tokens concatenated>_<build type>`.
    ///
    /// Plain concatenation is only injective while flag tokens don't collide
    /// after joining, so the planner checks every plan for duplicates.
    ///
    /// 此组合的工作目录名称：`<编译器>_<拼接的标志标记>_<构建类型>`。
    pub fn dir_name(&self) -> String {
        format!(
            "{}_{}_{}",
            self.compiler,
            self.flags.concat(),
            self.build_type
        )
    }

    /// The non-empty flag tokens, order preserved.
    /// 非空的标志标记，保持顺序。
    pub fn flag_tokens(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .map(String::as_str)
            .filter(|flag| !flag.is_empty())
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dir_name())
    }
}

/// Enumerates the possible reasons for a combination failure.
/// 枚举组合失败的可能原因。
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FailureReason {
    /// The working directory could not be created for a reason other than
    /// already existing.
    /// 由于已存在以外的原因，无法创建工作目录。
    Directory,
    /// An external step could not be launched.
    /// 无法启动外部步骤。
    Launch,
    /// The configure step exited with a non-zero status.
    /// 配置步骤以非零状态退出。
    Configure,
    /// The build step exited with a non-zero status.
    /// 构建步骤以非零状态退出。
    Build,
    /// The combination exceeded its configured timeout.
    /// 组合超出了其配置的超时时间。
    Timeout,
}

/// The outcome of running the external build for one combination.
/// 为一个组合运行外部构建的结果。
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Outcome {
    Succeeded,
    Failed(FailureReason),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded)
    }
}

/// Represents the final result of a single combination.
/// 表示单个组合的最终结果。
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// The combination that was built / 已构建的组合
    pub combination: Combination,
    /// The working directory name used for it / 为其使用的工作目录名称
    pub dir_name: String,
    /// Succeeded, or failed with a reason / 成功，或带原因的失败
    pub outcome: Outcome,
    /// Wall-clock time spent on the combination / 在该组合上花费的时间
    pub duration: Duration,
}

impl BuildResult {
    pub fn new(combination: Combination, outcome: Outcome, duration: Duration) -> Self {
        let dir_name = combination.dir_name();
        Self {
            combination,
            dir_name,
            outcome,
            duration,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Gets the appropriate CSS class for the result status.
    pub fn get_status_class(&self) -> &'static str {
        match self.outcome {
            Outcome::Succeeded => "status-Passed",
            Outcome::Failed(FailureReason::Timeout) => "status-Timeout",
            Outcome::Failed(_) => "status-Failed",
        }
    }

    /// Gets the status of the result as a localized string for display.
    /// 以本地化字符串形式获取结果的状态以供显示。
    pub fn get_status_str(&self, locale: &str) -> String {
        match self.outcome {
            Outcome::Succeeded => t!("report.status_ok", locale = locale).to_string(),
            Outcome::Failed(reason) => reason_str(reason, locale),
        }
    }
}

/// Localized, human-readable description of a failure reason.
/// 失败原因的本地化可读描述。
pub fn reason_str(reason: FailureReason, locale: &str) -> String {
    match reason {
        FailureReason::Directory => t!("report.reason_directory", locale = locale),
        FailureReason::Launch => t!("report.reason_launch", locale = locale),
        FailureReason::Configure => t!("report.reason_configure", locale = locale),
        FailureReason::Build => t!("report.reason_build", locale = locale),
        FailureReason::Timeout => t!("report.reason_timeout", locale = locale),
    }
    .to_string()
}
