//! # Commands / 命令
//!
//! - `run` - Build every planned combination and write the build log
//! - `list` - Print the planned combinations without building
//! - `init` - Create a `BuildMatrix.toml` configuration file
//!
//! - `run` - 构建每个计划的组合并写入构建日志
//! - `list` - 打印计划的组合而不进行构建
//! - `init` - 创建 `BuildMatrix.toml` 配置文件

pub mod init;
pub mod list;
pub mod run;
