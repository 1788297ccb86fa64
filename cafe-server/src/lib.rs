//! Cafe Server - 咖啡馆点单后端
//!
//! # 架构概述
//!
//! - **订单** (`orders`): 订单生命周期状态机，写入后发布事件
//! - **消息** (`message`): 广播中心，把订单事件扇出到所有 WebSocket 订阅者
//! - **数据库** (`db`): 嵌入式 redb 文档存储
//! - **认证** (`auth`): 员工 JWT 验证
//! - **HTTP API** (`api`): RESTful API + WebSocket
//!
//! # 模块结构
//!
//! ```text
//! cafe-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 验证、员工中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 日志、校验
//! ├── db/            # 存储契约 + redb 实现
//! ├── message/       # 广播中心
//! └── orders/        # 订单存储服务
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod message;
pub mod orders;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use crate::core::{Config, Server, ServerState};
pub use db::RedbStore;
pub use message::{BroadcastHub, Subscription};
pub use orders::{OrderError, OrderStore};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 进程级初始化：加载 `.env`，读取配置，按配置初始化日志
pub fn setup_environment() -> Result<Config, Box<dyn std::error::Error>> {
    // .env 不存在时忽略
    let _ = dotenv::dotenv();

    let config = Config::from_env()?;
    init_logger_with_file(&config.log_level, config.log_dir.as_deref());
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
   ______      ____
  / ____/___ _/ __/__
 / /   / __ `/ /_/ _ \
/ /___/ /_/ / __/  __/
\____/\__,_/_/  \___/
    "#
    );
}
