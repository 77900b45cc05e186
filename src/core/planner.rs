//! # Matrix Planner Module / 矩阵计划模块
//!
//! This module expands the configured axes into the ordered list of
//! combinations to build, applying the command-line axis selection and
//! rejecting plans whose directory names would collide.
//!
//! 此模块将配置的轴展开为要构建的有序组合列表，
//! 应用命令行轴选择，并拒绝目录名称会发生冲突的计划。

use crate::core::config::AxisSet;
use crate::core::models::Combination;
use anyhow::{Result, bail};
use std::collections::HashMap;

/// Restricts a run to a subset of the configured axis values.
/// An empty list selects every value of that axis.
///
/// 将运行限制为配置的轴值的子集。空列表表示选择该轴的所有值。
#[derive(Debug, Default, Clone)]
pub struct Selection {
    pub compilers: Vec<String>,
    pub build_types: Vec<String>,
}

/// Represents a complete execution plan for a build matrix.
/// 表示构建矩阵的完整执行计划。
#[derive(Debug)]
pub struct ExecutionPlan {
    /// The combinations to build, in enumeration order.
    /// 要构建的组合，按枚举顺序排列。
    pub combinations: Vec<Combination>,
    /// The number of combinations left out by the axis selection.
    /// 因轴选择而被排除的组合数量。
    pub filtered_count: usize,
}

/// Creates an execution plan for the given axes.
///
/// Combinations are enumerated compiler outermost, then each flag axis in
/// declaration order, then build type innermost.
///
/// 为给定的轴创建执行计划。
/// 组合的枚举顺序为：编译器在最外层，然后按声明顺序的每个标志轴，构建类型在最内层。
pub fn plan_matrix(axes: &AxisSet, selection: &Selection) -> Result<ExecutionPlan> {
    validate_axes(axes)?;

    let compilers = select("compiler", &axes.compilers, &selection.compilers)?;
    let build_types = select("build type", &axes.build_types, &selection.build_types)?;
    let flag_sets = flag_product(&axes.flags);

    let mut combinations =
        Vec::with_capacity(compilers.len() * flag_sets.len() * build_types.len());
    for compiler in &compilers {
        for flags in &flag_sets {
            for build_type in &build_types {
                combinations.push(Combination::new(
                    compiler.as_str(),
                    flags.clone(),
                    build_type.as_str(),
                ));
            }
        }
    }

    check_dir_names(&combinations)?;

    Ok(ExecutionPlan {
        filtered_count: axes.combination_count() - combinations.len(),
        combinations,
    })
}

fn validate_axes(axes: &AxisSet) -> Result<()> {
    if axes.compilers.is_empty() {
        bail!("The compiler axis has no values.");
    }
    if axes.build_types.is_empty() {
        bail!("The build type axis has no values.");
    }
    if let Some(index) = axes.flags.iter().position(Vec::is_empty) {
        bail!("Flag axis #{} has no values.", index + 1);
    }
    if axes.compilers.iter().any(|c| c.trim().is_empty()) {
        bail!("Compiler names must not be empty.");
    }
    Ok(())
}

/// Keeps the configured order; the selection only decides membership.
fn select(axis: &str, values: &[String], wanted: &[String]) -> Result<Vec<String>> {
    if let Some(unknown) = wanted.iter().find(|w| !values.contains(*w)) {
        bail!(
            "Unknown {} '{}'. Configured values: {}",
            axis,
            unknown,
            values.join(", ")
        );
    }
    Ok(values
        .iter()
        .filter(|v| wanted.is_empty() || wanted.contains(*v))
        .cloned()
        .collect())
}

/// Cartesian product of the flag axes, first axis outermost.
fn flag_product(axes: &[Vec<String>]) -> Vec<Vec<String>> {
    axes.iter().fold(vec![Vec::new()], |acc, axis| {
        acc.iter()
            .flat_map(|prefix| {
                axis.iter().map(move |value| {
                    let mut flags = prefix.clone();
                    flags.push(value.clone());
                    flags
                })
            })
            .collect()
    })
}

/// Every combination must own its directory, and that directory must be a
/// direct child of the output root.
fn check_dir_names(combinations: &[Combination]) -> Result<()> {
    let mut seen: HashMap<String, &Combination> = HashMap::with_capacity(combinations.len());
    for combination in combinations {
        let name = combination.dir_name();
        if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
            bail!("Directory name '{}' is not a plain directory name.", name);
        }
        if let Some(previous) = seen.insert(name.clone(), combination) {
            bail!(
                "Combinations {:?} and {:?} would share the directory '{}'.",
                previous,
                combination,
                name
            );
        }
    }
    Ok(())
}
