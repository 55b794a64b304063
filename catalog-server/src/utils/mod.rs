//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型
//! - [`AppResponse`] - API 响应结构
//! - [`PaginationParams`] / [`Paginate`] - 分页
//! - 日志等工具

pub mod error;
pub mod logger;
pub mod types;

pub use error::{AppError, AppResponse, AppResult, ok};
pub use types::{Paginate, PaginationParams};
