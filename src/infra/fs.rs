//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides the directory handling of a matrix run: creating
//! (or reusing) the working directory of each combination and expanding
//! user-supplied paths.
//!
//! 此模块提供矩阵运行的目录处理：创建（或复用）每个组合的工作目录，
//! 以及展开用户提供的路径。

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// How a combination's working directory became available.
/// 组合的工作目录是如何变得可用的。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStatus {
    /// The directory did not exist and was created.
    /// 目录不存在，已被创建。
    Created,
    /// The directory already existed and is reused as-is.
    /// 目录已存在，按原样复用。
    Reused,
}

/// Makes sure `path` exists as a directory.
///
/// An existing directory is reused, which lets an interrupted matrix be
/// resumed. A missing output root is created along the way. Every other
/// failure is returned, including a non-directory entry occupying the path.
///
/// 确保 `path` 作为目录存在。已存在的目录会被复用，以便恢复中断的矩阵；
/// 缺失的输出根目录会一并创建；其他所有失败都会被返回，包括该路径被非目录条目占用的情况。
pub fn prepare_build_dir(path: &Path) -> io::Result<DirStatus> {
    match fs::create_dir(path) {
        Ok(()) => Ok(DirStatus::Created),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            if path.is_dir() {
                Ok(DirStatus::Reused)
            } else {
                Err(not_a_directory(path))
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(path)?;
            Ok(DirStatus::Created)
        }
        Err(e) => Err(e),
    }
}

fn not_a_directory(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("{} exists but is not a directory", path.display()),
    )
}

/// Expands `~` and environment variables in a user-supplied path.
/// 展开用户提供的路径中的 `~` 和环境变量。
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .with_context(|| format!("Failed to expand path: {}", path.display()))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
