//! Catalog Server - 后台商品目录管理服务
//!
//! # 架构概述
//!
//! 本模块是 Catalog Server 的主入口，提供以下核心功能：
//!
//! - **商品管理** (`api/products`): 分页列表、创建、编辑、软删除
//! - **图片管理** (`api/products`): 商品图片上传、主图设置
//! - **分类** (`api/categories`): 商品表单的分类选项
//! - **数据库** (`db`): 嵌入式 SQLite 存储 (sqlx)
//! - **图片存储** (`services/image_storage`): 文件系统图片落盘
//!
//! # 模块结构
//!
//! ```text
//! catalog-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (连接 + 仓储)
//! ├── services/      # 图片存储
//! └── utils/         # 错误、分页、日志
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use services::ImageStorage;
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
   ______      __        __
  / ____/___ _/ /_____ _/ /___  ____ _
 / /   / __ `/ __/ __ `/ / __ \/ __ `/
/ /___/ /_/ / /_/ /_/ / / /_/ / /_/ /
\____/\__,_/\__/\__,_/_/\____/\__, /
                             /____/
    "#
    );
}
