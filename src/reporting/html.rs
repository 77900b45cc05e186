//! # HTML Reporting Module / HTML 报告模块
//!
//! Renders the results of a matrix run as a self-contained HTML page with
//! summary counts and one row per combination.
//!
//! 将矩阵运行的结果渲染为独立的 HTML 页面，包含汇总计数和每个组合一行。

use anyhow::{Context, Result};
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::Path;

use crate::core::models::BuildResult;
use crate::infra::t;

const HTML_STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 2em; color: #24292e; }
h1 { font-size: 1.6em; }
.generated { color: #6a737d; font-size: 0.9em; }
.summary-container { display: flex; gap: 2em; margin: 1.5em 0; }
.summary-item { display: flex; flex-direction: column; align-items: center; }
.summary-item .count { font-size: 2em; font-weight: bold; }
.passed-text { color: #22863a; }
.failed-text { color: #cb2431; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #e1e4e8; padding: 0.5em 0.75em; text-align: left; }
td.name { font-family: monospace; }
.duration-cell { text-align: right; }
.status-cell { display: inline-block; padding: 0.15em 0.6em; border-radius: 1em; color: #fff; }
.status-Passed { background: #28a745; }
.status-Failed { background: #d73a49; }
.status-Timeout { background: #e36209; }
"#;

/// Renders the report markup.
/// 渲染报告标记。
pub fn render_html_report(results: &[BuildResult], locale: &str) -> Markup {
    let total = results.len();
    let failed = results.iter().filter(|r| r.is_failure()).count();
    let passed = total - failed;
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (t!("html_report.title", locale = locale)) }
                style { (maud::PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { (t!("html_report.main_header", locale = locale)) }
                p.generated { (t!("html_report.generated_at", locale = locale, time = &generated)) }
                div.summary-container {
                    div.summary-item {
                        span.count { (total) }
                        span.label { (t!("html_report.summary.total", locale = locale)) }
                    }
                    div.summary-item {
                        span.count.passed-text { (passed) }
                        span.label { (t!("html_report.summary.passed", locale = locale)) }
                    }
                    div.summary-item {
                        span.count.failed-text { (failed) }
                        span.label { (t!("html_report.summary.failed", locale = locale)) }
                    }
                }
                table {
                    thead {
                        tr {
                            th { "#" }
                            th { (t!("html_report.table.header.directory", locale = locale)) }
                            th { (t!("html_report.table.header.compiler", locale = locale)) }
                            th { (t!("html_report.table.header.flags", locale = locale)) }
                            th { (t!("html_report.table.header.build_type", locale = locale)) }
                            th { (t!("html_report.table.header.status", locale = locale)) }
                            th.duration-cell { (t!("html_report.table.header.duration", locale = locale)) }
                        }
                    }
                    tbody {
                        @for (i, result) in results.iter().enumerate() {
                            tr {
                                td { (i + 1) }
                                td.name { (result.dir_name) }
                                td { (result.combination.compiler) }
                                td.name { (result.combination.flag_tokens().collect::<Vec<_>>().join(" ")) }
                                td { (result.combination.build_type) }
                                td {
                                    div class={ "status-cell " (result.get_status_class()) } {
                                        (result.get_status_str(locale))
                                    }
                                }
                                td.duration-cell { (format!("{:.2}s", result.duration.as_secs_f64())) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Writes the HTML report to `output_path`.
/// 将 HTML 报告写入 `output_path`。
pub fn generate_html_report(
    results: &[BuildResult],
    output_path: &Path,
    locale: &str,
) -> Result<()> {
    let markup = render_html_report(results, locale);
    fs::write(output_path, markup.into_string())
        .with_context(|| format!("Failed to write HTML report: {}", output_path.display()))?;
    Ok(())
}
