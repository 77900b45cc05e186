//! # Planner Unit Tests / 计划模块单元测试
//!
//! Enumeration order, selection and directory-name injectivity of the
//! matrix planner.
//!
//! 矩阵计划器的枚举顺序、选择和目录名称单射性测试。

use build_matrix::core::config::AxisSet;
use build_matrix::core::planner::{Selection, plan_matrix};
use std::collections::HashSet;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn reference_axes_yield_32_combinations() {
    let plan = plan_matrix(&AxisSet::default(), &Selection::default()).unwrap();
    assert_eq!(plan.combinations.len(), 2 * 4 * 2 * 2);
    assert_eq!(plan.filtered_count, 0);
}

#[test]
fn enumeration_is_compiler_then_flags_then_build_type() {
    let plan = plan_matrix(&AxisSet::default(), &Selection::default()).unwrap();
    let names: Vec<String> = plan.combinations.iter().map(|c| c.dir_name()).collect();

    assert_eq!(
        &names[..6],
        &[
            "clang++_-O0_Debug",
            "clang++_-O0_Release",
            "clang++_-O0-m32_Debug",
            "clang++_-O0-m32_Release",
            "clang++_-O1_Debug",
            "clang++_-O1_Release",
        ]
    );
    assert_eq!(names[16], "g++_-O0_Debug");
    assert_eq!(names[31], "g++_-O3-m32_Release");
}

#[test]
fn reference_dir_names_are_unique() {
    let plan = plan_matrix(&AxisSet::default(), &Selection::default()).unwrap();
    let unique: HashSet<String> = plan.combinations.iter().map(|c| c.dir_name()).collect();
    assert_eq!(unique.len(), plan.combinations.len());
}

#[test]
fn selection_keeps_configured_order() {
    let selection = Selection {
        compilers: strings(&["g++"]),
        build_types: strings(&["Release"]),
    };
    let plan = plan_matrix(&AxisSet::default(), &selection).unwrap();

    assert_eq!(plan.combinations.len(), 8);
    assert_eq!(plan.filtered_count, 24);
    assert!(
        plan.combinations
            .iter()
            .all(|c| c.compiler == "g++" && c.build_type == "Release")
    );
    assert_eq!(plan.combinations[0].dir_name(), "g++_-O0_Release");
}

#[test]
fn unknown_selection_is_an_error() {
    let selection = Selection {
        compilers: strings(&["icpc"]),
        build_types: vec![],
    };
    let err = plan_matrix(&AxisSet::default(), &selection).unwrap_err();
    assert!(err.to_string().contains("icpc"));
}

#[test]
fn duplicate_axis_values_collide() {
    let axes = AxisSet {
        compilers: strings(&["g++", "g++"]),
        ..AxisSet::default()
    };
    assert!(plan_matrix(&axes, &Selection::default()).is_err());
}

#[test]
fn empty_axes_are_rejected() {
    let no_compilers = AxisSet {
        compilers: vec![],
        ..AxisSet::default()
    };
    assert!(plan_matrix(&no_compilers, &Selection::default()).is_err());

    let empty_flag_axis = AxisSet {
        flags: vec![strings(&["-O2"]), vec![]],
        ..AxisSet::default()
    };
    assert!(plan_matrix(&empty_flag_axis, &Selection::default()).is_err());
}

#[test]
fn more_flag_axes_extend_the_product() {
    let axes = AxisSet {
        compilers: strings(&["g++"]),
        flags: vec![
            strings(&["-O0", "-O2"]),
            strings(&["", "-m32"]),
            strings(&["", "-fno-exceptions"]),
        ],
        build_types: strings(&["Debug"]),
    };
    let plan = plan_matrix(&axes, &Selection::default()).unwrap();
    assert_eq!(plan.combinations.len(), 8);
    assert_eq!(
        plan.combinations[3].dir_name(),
        "g++_-O0-m32-fno-exceptions_Debug"
    );
}

#[test]
fn accepted_plans_are_never_empty() {
    let axes = AxisSet {
        compilers: strings(&["g++"]),
        flags: vec![strings(&[""])],
        build_types: strings(&["Debug"]),
    };
    let plan = plan_matrix(&axes, &Selection::default()).unwrap();
    assert_eq!(plan.combinations.len(), 1);
    assert_eq!(plan.combinations[0].dir_name(), "g++__Debug");

    // Every selectable value exists in the axes, so a selection keeps at
    // least one combination.
    let selection = Selection {
        compilers: strings(&["clang++"]),
        build_types: strings(&["Release"]),
    };
    let plan = plan_matrix(&AxisSet::default(), &selection).unwrap();
    assert!(!plan.combinations.is_empty());
}
