//! # Reporting Module / 报告模块
//!
//! This module handles every output of a matrix run: the append-only
//! `buildlog` with its fixed line format, a colorful console summary and
//! an optional HTML report.
//!
//! 此模块处理矩阵运行的所有输出：格式固定的只追加 `buildlog`、
//! 彩色的控制台摘要以及可选的 HTML 报告。

pub mod buildlog;
pub mod console;
pub mod html;

// Re-export common reporting functions
pub use buildlog::BuildLog;
pub use console::{print_failed_combinations, print_summary};
pub use html::generate_html_report;
