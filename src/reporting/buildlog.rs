//! # Build Log Module / 构建日志模块
//!
//! The build log is the one output other tools scrape, so its line format is
//! fixed: `"[  ok  ] <dirname>\n"` or `"[failed] <dirname>\n"`, one line per
//! combination in enumeration order, flushed as soon as it is written.
//!
//! 构建日志是其他工具抓取的唯一输出，因此其行格式是固定的：
//! `"[  ok  ] <dirname>\n"` 或 `"[failed] <dirname>\n"`，每个组合一行，
//! 按枚举顺序排列，写入后立即刷新。

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::core::models::BuildResult;

pub const OK_TAG: &str = "[  ok  ]";
pub const FAILED_TAG: &str = "[failed]";

/// Formats the log line of one result, trailing newline included.
/// 格式化一个结果的日志行，包含结尾换行符。
pub fn format_log_line(result: &BuildResult) -> String {
    let tag = if result.is_success() {
        OK_TAG
    } else {
        FAILED_TAG
    };
    format!("{} {}\n", tag, result.dir_name)
}

/// Append-only writer of result lines.
/// 结果行的只追加写入器。
#[derive(Debug)]
pub struct BuildLog<W: Write> {
    writer: W,
}

impl BuildLog<File> {
    /// Opens the log file. The file is truncated unless `append` is set.
    /// 打开日志文件。除非设置了 `append`，否则文件会被清空。
    pub fn open(path: &Path, append: bool) -> Result<Self> {
        let file = if append {
            OpenOptions::new().create(true).append(true).open(path)
        } else {
            File::create(path)
        }
        .with_context(|| format!("Failed to open build log: {}", path.display()))?;
        Ok(Self::new(file))
    }
}

impl<W: Write> BuildLog<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes the result line and flushes it before returning.
    /// 写入结果行并在返回前刷新。
    pub fn record(&mut self, result: &BuildResult) -> io::Result<()> {
        self.writer.write_all(format_log_line(result).as_bytes())?;
        self.writer.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
