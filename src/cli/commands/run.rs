//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command for the Build Matrix CLI,
//! which builds every planned combination and writes the build log.
//!
//! 此模块实现了 Build Matrix CLI 的 `run` 命令，
//! 构建每个计划的组合并写入构建日志。

use anyhow::{Result, bail};
use colored::*;
use std::path::PathBuf;
use std::time::Duration;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::{self, BuildMatrix},
        execution::{CmakeInvoker, MatrixRunner},
        planner::{self, Selection},
    },
    infra::{fs, t},
    reporting::{
        buildlog::BuildLog,
        console::{print_failed_combinations, print_summary},
        html::generate_html_report,
    },
};

/// Command-line options of `run`; set values override the config file.
/// `run` 的命令行选项；设置的值会覆盖配置文件。
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    pub config: PathBuf,
    pub selection: Selection,
    pub log: Option<PathBuf>,
    pub append: bool,
    pub output_dir: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub html: Option<PathBuf>,
    pub fail_on_error: bool,
}

impl RunOptions {
    fn apply_to(&self, matrix: &mut BuildMatrix) {
        if let Some(log) = &self.log {
            matrix.log = log.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            matrix.output_dir = output_dir.clone();
        }
        if let Some(jobs) = self.jobs {
            matrix.tool.jobs = jobs;
        }
        if self.timeout_secs.is_some() {
            matrix.tool.timeout_secs = self.timeout_secs;
        }
        matrix.append |= self.append;
        matrix.fail_on_error |= self.fail_on_error;
    }
}

/// Executes the run command with the provided options.
///
/// # Arguments
/// * `options` - Parsed command-line options
/// * `requested_lang` - The `--lang` value, if one was given
///
/// # Returns
/// An error if setup fails, the log cannot be written, the run is
/// interrupted, or (with `--fail-on-error`) any combination failed.
pub async fn execute(options: RunOptions, requested_lang: Option<String>) -> Result<()> {
    let (mut matrix, config_path) = config::load_or_default(&options.config)?;
    options.apply_to(&mut matrix);

    let locale = crate::resolve_locale(requested_lang.or(matrix.language.clone()).as_deref());
    rust_i18n::set_locale(&locale);

    match &config_path {
        Some(path) => println!(
            "{}",
            t!("loading_build_matrix", locale = locale, path = path.display())
        ),
        None => println!("{}", t!("using_default_matrix", locale = locale).cyan()),
    }

    let plan = planner::plan_matrix(&matrix.axes, &options.selection)?;
    if plan.filtered_count > 0 {
        println!(
            "{}",
            t!(
                "filtered_combinations",
                locale = locale,
                filtered = plan.filtered_count,
                total = plan.combinations.len()
            )
            .cyan()
        );
    }

    let invoker = CmakeInvoker::from_settings(&matrix.tool)?;
    let output_dir = fs::expand_path(&matrix.output_dir)?;
    let log_path = fs::expand_path(&matrix.log)?;
    let log = BuildLog::open(&log_path, matrix.append)?;

    println!(
        "{}",
        t!(
            "matrix_start",
            locale = locale,
            count = plan.combinations.len(),
            log = log_path.display()
        )
        .bold()
    );

    let stop_token = setup_signal_handler(&locale);
    let mut runner = MatrixRunner::new(invoker, log, output_dir)
        .with_timeout(matrix.tool.timeout_secs.map(Duration::from_secs))
        .with_cancellation(stop_token);

    let report = runner.run_matrix(&plan.combinations).await;
    // Close the log before reporting, also when the run failed.
    drop(runner);
    let report = report?;

    print_summary(&report.results, &locale);
    print_failed_combinations(&report.results, &locale);

    if let Some(report_path) = &options.html {
        println!(
            "\n{}",
            t!("html_report_generating", locale = locale, path = report_path.display())
        );
        if let Err(e) = generate_html_report(&report.results, report_path, &locale) {
            eprintln!("{} {:#}", t!("html_report_failed", locale = locale).red(), e);
        }
    }

    println!(
        "\n{}",
        t!("log_written", locale = locale, path = log_path.display())
    );

    if report.cancelled {
        bail!(t!("run_interrupted", locale = locale).to_string());
    }

    let failed = report.failed_count();
    if failed > 0 && matrix.fail_on_error {
        bail!(t!("matrix_failed", locale = locale, count = failed).to_string());
    }

    if failed == 0 {
        println!("{}", t!("all_builds_passed", locale = locale).green().bold());
    }
    Ok(())
}

/// Sets up a signal handler for graceful shutdown.
fn setup_signal_handler(locale: &str) -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n{}", t!("shutdown_signal", locale = &locale).yellow());
            token_clone.cancel();
        }
    });

    token
}
