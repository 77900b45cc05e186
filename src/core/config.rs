//! # Configuration Module / 配置模块
//!
//! Defines the `BuildMatrix.toml` configuration: the axes that are combined,
//! the external tools that are invoked for each combination, and where the
//! per-combination directories and the build log live.
//!
//! 定义 `BuildMatrix.toml` 配置：要组合的轴、每个组合调用的外部工具，
//! 以及每个组合的目录和构建日志所在的位置。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The file name looked up when no `--config` is given.
/// 未指定 `--config` 时查找的文件名。
pub const DEFAULT_CONFIG_FILE: &str = "BuildMatrix.toml";

/// The fixed, ordered collections of values to combine.
/// Enumeration order is compiler, then each flag axis in declaration order,
/// then build type.
///
/// 要组合的固定有序值集合。
/// 枚举顺序为编译器、按声明顺序的每个标志轴，最后是构建类型。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AxisSet {
    /// Compiler identifiers, passed to the configure step as `CXX`.
    /// 编译器标识符，作为 `CXX` 传递给配置步骤。
    #[serde(default = "default_compilers")]
    pub compilers: Vec<String>,
    /// Flag axes. Each inner list is one axis; a combination picks one token
    /// from every axis. An empty string stands for "no flag".
    /// 标志轴。每个内部列表是一个轴；一个组合从每个轴中选取一个标记。
    /// 空字符串表示“无标志”。
    #[serde(default = "default_flag_axes")]
    pub flags: Vec<Vec<String>>,
    /// Build-configuration labels, passed as `CMAKE_BUILD_TYPE`.
    /// 构建配置标签，作为 `CMAKE_BUILD_TYPE` 传递。
    #[serde(default = "default_build_types")]
    pub build_types: Vec<String>,
}

impl Default for AxisSet {
    fn default() -> Self {
        Self {
            compilers: default_compilers(),
            flags: default_flag_axes(),
            build_types: default_build_types(),
        }
    }
}

impl AxisSet {
    /// The size of the full Cartesian product.
    /// 完整笛卡尔积的大小。
    pub fn combination_count(&self) -> usize {
        self.flags
            .iter()
            .map(Vec::len)
            .product::<usize>()
            * self.compilers.len()
            * self.build_types.len()
    }
}

/// Settings of the external configure/build tools.
/// 外部配置/构建工具的设置。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ToolSettings {
    /// The configure command. Split with shell-like rules, so extra
    /// arguments such as a generator may be given here.
    /// 配置命令。按类 shell 规则拆分，因此可以在此处提供生成器等额外参数。
    #[serde(default = "default_configure")]
    pub configure: String,
    /// The build command, run after a successful configure step.
    /// 构建命令，在配置步骤成功后运行。
    #[serde(default = "default_build")]
    pub build: String,
    /// Path of the project source, relative to each combination directory.
    /// 项目源码路径，相对于每个组合目录。
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    /// Flags placed in front of the combination's own flags in `CXXFLAGS`.
    /// 在 `CXXFLAGS` 中放在组合自身标志前面的标志。
    #[serde(default = "default_base_flags")]
    pub base_flags: Vec<String>,
    /// Parallelism hint passed to the build step as `-j<jobs>`.
    /// 以 `-j<jobs>` 形式传递给构建步骤的并行度提示。
    #[serde(default = "default_jobs")]
    pub jobs: usize,
    /// Optional per-combination timeout in seconds. A build that runs longer
    /// is killed and recorded as failed.
    /// 可选的每个组合超时时间（秒）。运行时间更长的构建会被终止并记录为失败。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            configure: default_configure(),
            build: default_build(),
            source_dir: default_source_dir(),
            base_flags: default_base_flags(),
            jobs: default_jobs(),
            timeout_secs: None,
        }
    }
}

/// Represents the entire build matrix configuration, loaded from a TOML file.
/// 代表从 TOML 文件加载的整个构建矩阵配置。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BuildMatrix {
    /// The language for console messages (e.g., "en", "zh-CN").
    /// Detected from the system when not specified.
    ///
    /// 控制台消息的语言（例如 "en", "zh-CN"）。
    /// 如果未指定，则从系统检测。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Path of the result log.
    /// 结果日志的路径。
    #[serde(default = "default_log")]
    pub log: PathBuf,

    /// Directory under which the per-combination directories are created.
    /// 创建每个组合目录的父目录。
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Keep the existing log content instead of truncating it at start.
    /// 保留现有日志内容，而不是在开始时将其清空。
    #[serde(default)]
    pub append: bool,

    /// Exit with a non-zero status when any combination failed.
    /// 当任何组合失败时以非零状态退出。
    #[serde(default)]
    pub fail_on_error: bool,

    #[serde(default)]
    pub axes: AxisSet,

    #[serde(default)]
    pub tool: ToolSettings,
}

impl Default for BuildMatrix {
    fn default() -> Self {
        Self {
            language: None,
            log: default_log(),
            output_dir: default_output_dir(),
            append: false,
            fail_on_error: false,
            axes: AxisSet::default(),
            tool: ToolSettings::default(),
        }
    }
}

fn default_compilers() -> Vec<String> {
    vec!["clang++".to_string(), "g++".to_string()]
}

fn default_flag_axes() -> Vec<Vec<String>> {
    vec![
        vec![
            "-O0".to_string(),
            "-O1".to_string(),
            "-O2".to_string(),
            "-O3".to_string(),
        ],
        vec!["".to_string(), "-m32".to_string()],
    ]
}

fn default_build_types() -> Vec<String> {
    vec!["Debug".to_string(), "Release".to_string()]
}

fn default_configure() -> String {
    "cmake".to_string()
}

fn default_build() -> String {
    "make".to_string()
}

fn default_source_dir() -> String {
    "../..".to_string()
}

fn default_base_flags() -> Vec<String> {
    vec!["-Wall".to_string(), "-Werror".to_string()]
}

fn default_jobs() -> usize {
    2
}

fn default_log() -> PathBuf {
    PathBuf::from("buildlog")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Reads and parses a build matrix configuration file.
/// 读取并解析构建矩阵配置文件。
pub fn load_build_matrix(path: &Path) -> Result<BuildMatrix> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let matrix: BuildMatrix = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(matrix)
}

/// Loads the configuration at `path`, or the built-in reference matrix when
/// `path` is the default file name and no such file exists.
///
/// Returns the loaded matrix and the path it came from, if any.
///
/// 加载 `path` 处的配置；当 `path` 为默认文件名且文件不存在时，使用内置的参考矩阵。
pub fn load_or_default(path: &Path) -> Result<(BuildMatrix, Option<PathBuf>)> {
    if !path.exists() && path == Path::new(DEFAULT_CONFIG_FILE) {
        return Ok((BuildMatrix::default(), None));
    }
    let matrix = load_build_matrix(path)?;
    Ok((matrix, Some(path.to_path_buf())))
}
