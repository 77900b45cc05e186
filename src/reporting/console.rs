//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints the end-of-run summary to the console, with colors and
//! internationalization support. The console output is for humans only; the
//! build log stays the authoritative record.
//!
//! 此模块在控制台打印运行结束时的摘要，支持颜色和国际化。
//! 控制台输出仅供人阅读；构建日志仍是权威记录。

use colored::*;

use crate::core::models::{BuildResult, Outcome};
use crate::infra::t;

/// Prints a formatted summary of the results of a matrix run.
///
/// 在控制台打印矩阵运行结果的格式化摘要。
///
/// # Output Format / 输出格式
/// ```text
/// --- Build Matrix Summary ---
///   - OK                 | clang++_-O0_Debug                        |      3.21s
///   - Build failed       | g++_-O3-m32_Release                      |      1.02s
/// ```
pub fn print_summary(results: &[BuildResult], locale: &str) {
    println!("\n{}", t!("summary.banner", locale = locale).bold());

    for result in results {
        let status_str = result.get_status_str(locale);
        let status_colored = match result.outcome {
            Outcome::Succeeded => status_str.green(),
            Outcome::Failed(_) => status_str.red(),
        };
        let duration_str = format!("{:.2?}", result.duration);

        println!(
            "  - {:<18} | {:<40} | {:>10}",
            status_colored, result.dir_name, duration_str
        );
    }

    let failed = results.iter().filter(|r| r.is_failure()).count();
    println!(
        "\n{}",
        t!(
            "summary.totals",
            locale = locale,
            total = results.len(),
            ok = results.len() - failed,
            failed = failed
        )
    );
}

/// Prints the directory names of the failed combinations, so they can be
/// inspected or re-run with `--compiler`/`--build-type`.
///
/// 打印失败组合的目录名称，以便检查或使用 `--compiler`/`--build-type` 重新运行。
pub fn print_failed_combinations(results: &[BuildResult], locale: &str) {
    let failed: Vec<_> = results.iter().filter(|r| r.is_failure()).collect();
    if failed.is_empty() {
        return;
    }

    println!("\n{}", t!("summary.failed_banner", locale = locale).red().bold());
    println!("{}", "-".repeat(80));
    for (i, result) in failed.iter().enumerate() {
        println!(
            "[{}/{}] {} ({})",
            i + 1,
            failed.len(),
            result.dir_name.cyan(),
            result.get_status_str(locale)
        );
    }
    println!("{}", "-".repeat(80));
}
