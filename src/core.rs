//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Build Matrix,
//! including the axis configuration, data models, planning and the
//! matrix runner itself.
//!
//! 此模块包含 Build Matrix 的核心功能，
//! 包括轴配置、数据模型、执行计划和矩阵运行器本身。

pub mod config;
pub mod execution;
pub mod models;
pub mod planner;

// Re-exports
pub use config::BuildMatrix;
pub use execution::{BuildInvoker, CmakeInvoker, MatrixRunner};
pub use models::{BuildResult, Combination};
