//! # List Command Module / 列表命令模块
//!
//! Prints the planned combinations, one directory name per line, in the
//! order `run` would build them.
//!
//! 按 `run` 构建它们的顺序打印计划的组合，每行一个目录名称。

use anyhow::Result;
use colored::*;
use std::path::Path;

use crate::core::{
    config,
    planner::{self, Selection},
};
use crate::infra::t;

/// Executes the list command.
///
/// The message language follows `--lang`, then the config's `language`,
/// then the system locale, the same order `run` uses.
pub fn execute(
    config_path: &Path,
    selection: &Selection,
    requested_lang: Option<String>,
) -> Result<()> {
    let (matrix, _) = config::load_or_default(config_path)?;
    let locale = crate::resolve_locale(requested_lang.or(matrix.language.clone()).as_deref());
    rust_i18n::set_locale(&locale);

    let plan = planner::plan_matrix(&matrix.axes, selection)?;

    for combination in &plan.combinations {
        println!("{}", combination.dir_name());
    }

    eprintln!(
        "{}",
        t!(
            "list_total",
            locale = &locale,
            count = plan.combinations.len(),
            filtered = plan.filtered_count
        )
        .dimmed()
    );
    Ok(())
}
