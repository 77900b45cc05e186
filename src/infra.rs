//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for Build Matrix,
//! including external process execution, directory handling and i18n support.
//!
//! 此模块为 Build Matrix 提供基础设施服务，
//! 包括外部进程执行、目录处理和国际化支持。

pub mod command;
pub mod fs;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
