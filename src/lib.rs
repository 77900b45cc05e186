//! # Build Matrix Library / 构建矩阵库
//!
//! This library provides the core functionality for the Build Matrix tool,
//! a configuration-driven driver that configures and builds a C++ project
//! once for every combination of compiler, flags and build type.
//!
//! 此库为 Build Matrix 工具提供核心功能，
//! 这是一个配置驱动的驱动器，为编译器、编译标志和构建类型的每种组合配置并构建一次 C++ 项目。
//!
//! ## Modules / 模块
//!
//! - `core` - Axis configuration, planning and the matrix runner
//! - `infra` - Infrastructure services like process execution and directory handling
//! - `reporting` - The build log, console summary and HTML report
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 轴配置、计划和矩阵运行器
//! - `infra` - 基础设施服务，如进程执行和目录处理
//! - `reporting` - 构建日志、控制台摘要和 HTML 报告
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::config;
pub use core::execution;
pub use core::models;

/// Picks the language for console messages.
///
/// An explicit request wins. Otherwise the system locale is used: the full
/// locale (e.g. "zh-CN") if a translation exists for it, then just the
/// language part (e.g. "en" from "en-US"), and finally "en".
pub fn resolve_locale(requested: Option<&str>) -> String {
    let locale = requested
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&locale.as_str()) {
        locale
    } else {
        locale
            .split('-')
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
            .to_string()
    }
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
