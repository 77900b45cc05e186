//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command for the Build Matrix CLI,
//! which creates a new `BuildMatrix.toml` configuration file, either from
//! the reference matrix or through an interactive wizard.
//!
//! 此模块实现了 Build Matrix CLI 的 `init` 命令，
//! 用于根据参考矩阵或通过交互式向导创建新的 `BuildMatrix.toml` 配置文件。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::{fs, path::Path};

use crate::core::config::BuildMatrix;
use crate::infra::t;

pub const DEFAULT_CONFIG: &str = r#"# Build Matrix Configuration / 构建矩阵配置

# Result log, one line per combination / 结果日志，每个组合一行
log = "buildlog"
# Where the per-combination directories are created / 每个组合目录的创建位置
output_dir = "."
# Keep previous log content / 保留之前的日志内容
append = false
# Exit non-zero when any combination fails / 任何组合失败时以非零状态退出
fail_on_error = false

[axes]
compilers = ["clang++", "g++"]
# One list per flag axis; "" means no flag / 每个标志轴一个列表；"" 表示无标志
flags = [
    ["-O0", "-O1", "-O2", "-O3"],
    ["", "-m32"],
]
build_types = ["Debug", "Release"]

[tool]
configure = "cmake"
build = "make"
# Relative to each combination directory / 相对于每个组合目录
source_dir = "../.."
base_flags = ["-Wall", "-Werror"]
jobs = 2
# Optional timeout per combination in seconds / 可选的每个组合超时时间（秒）
# timeout_secs = 1800
"#;

/// Executes the init command.
///
/// # Arguments
/// * `output` - Path for the new configuration file
/// * `force` - Whether to overwrite an existing file
/// * `non_interactive` - Write the reference matrix without prompting
/// * `locale` - Language for messages
pub fn execute(output: &Path, force: bool, non_interactive: bool, locale: &str) -> Result<()> {
    let theme = ColorfulTheme::default();

    if output.exists() && !force {
        if non_interactive {
            println!(
                "{}",
                t!("init.file_exists", locale = locale, path = output.display()).red()
            );
            println!("{}", t!("init.use_force", locale = locale).yellow());
            return Ok(());
        }
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!("init.overwrite_prompt", locale = locale, path = output.display()))
            .default(false)
            .interact()
            .context(t!("init.user_confirmation_failed", locale = locale).to_string())?;
        if !confirmation {
            println!("{}", t!("init.aborted", locale = locale));
            return Ok(());
        }
    }

    let content = if non_interactive {
        DEFAULT_CONFIG.to_string()
    } else {
        println!("\n{}", t!("init.wizard_welcome", locale = locale).cyan().bold());
        let matrix = run_wizard(&theme, locale)?;
        toml::to_string(&matrix).context("Failed to serialize the configuration")?
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                t!("init.create_parent_dir_failed", locale = locale, path = parent.display())
                    .to_string()
            })?;
        }
    }

    fs::write(output, content).with_context(|| {
        t!("init.write_failed", locale = locale, path = output.display()).to_string()
    })?;

    println!(
        "{}",
        t!("init.success", locale = locale, path = output.display()).green()
    );
    println!("{}", t!("init.next_steps", locale = locale));
    Ok(())
}

/// Asks for each axis, starting from the reference values.
fn run_wizard(theme: &ColorfulTheme, locale: &str) -> Result<BuildMatrix> {
    let mut matrix = BuildMatrix::default();

    matrix.axes.compilers = ask_list(
        theme,
        &t!("init.compilers_prompt", locale = locale),
        &matrix.axes.compilers,
    )?;

    let mut flag_axes = Vec::with_capacity(matrix.axes.flags.len());
    for (i, axis) in matrix.axes.flags.iter().enumerate() {
        let prompt = t!("init.flag_axis_prompt", locale = locale, index = i + 1);
        let values = ask_list(theme, &prompt, axis)?;
        if !values.is_empty() {
            flag_axes.push(values);
        }
    }
    matrix.axes.flags = flag_axes;

    matrix.axes.build_types = ask_list(
        theme,
        &t!("init.build_types_prompt", locale = locale),
        &matrix.axes.build_types,
    )?;

    matrix.tool.source_dir = Input::with_theme(theme)
        .with_prompt(t!("init.source_dir_prompt", locale = locale))
        .default(matrix.tool.source_dir.clone())
        .interact_text()?;

    Ok(matrix)
}

/// Comma-separated input. A flag axis keeps an empty entry written as `""`.
fn ask_list(theme: &ColorfulTheme, prompt: &str, defaults: &[String]) -> Result<Vec<String>> {
    let default = defaults
        .iter()
        .map(|v| if v.is_empty() { "\"\"" } else { v.as_str() })
        .collect::<Vec<_>>()
        .join(",");
    let answer: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact_text()?;
    Ok(parse_list(&answer))
}

fn parse_list(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| if v == "\"\"" { String::new() } else { v.to_string() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_the_reference_matrix() {
        let matrix: BuildMatrix = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(matrix, BuildMatrix::default());
    }

    #[test]
    fn list_answers_keep_empty_flag() {
        assert_eq!(parse_list(" -O0, -O2 "), vec!["-O0", "-O2"]);
        assert_eq!(parse_list("\"\",-m32"), vec!["", "-m32"]);
        assert!(parse_list(" , ").is_empty());
    }
}
