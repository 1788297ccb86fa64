use std::path::Path;
use std::sync::Arc;

use shared::models::MenuItem;

use crate::auth::JwtService;
use crate::core::{Config, Result, ServerError};
use crate::db::RedbStore;
use crate::message::BroadcastHub;
use crate::orders::OrderStore;

/// 服务器状态 - 所有请求共享
///
/// 克隆开销很小 (内部都是 `Arc`)。
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    /// redb 文档存储
    pub store: Arc<RedbStore>,
    /// 订单事件广播中心
    pub hub: BroadcastHub,
    /// 订单生命周期服务
    pub orders: OrderStore,
    /// 员工令牌验证
    pub jwt: Arc<JwtService>,
}

impl ServerState {
    /// 按配置初始化：创建工作目录、打开数据库、导入菜单种子数据
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let db_path = config.db_path();
        let store = RedbStore::open(&db_path)?;
        tracing::info!(path = %db_path.display(), "Document store opened");

        if let Some(seed_path) = &config.menu_seed_path {
            let count = seed_menu(&store, Path::new(seed_path))?;
            tracing::info!(path = %seed_path, count, "Menu seed loaded");
        }

        Ok(Self::with_store(config.clone(), store))
    }

    /// 使用已打开的存储构建状态 (测试使用内存数据库)
    pub fn with_store(config: Config, store: RedbStore) -> Self {
        let store = Arc::new(store);
        let hub = BroadcastHub::new();
        let orders = OrderStore::new(store.clone(), store.clone(), hub.clone());
        let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self {
            config,
            store,
            hub,
            orders,
            jwt,
        }
    }
}

/// 导入菜单种子数据 (JSON 数组)，已存在的同 id 菜单项会被覆盖
pub fn seed_menu(store: &RedbStore, path: &Path) -> Result<usize> {
    let raw = std::fs::read_to_string(path)?;
    let items: Vec<MenuItem> = serde_json::from_str(&raw)
        .map_err(|e| ServerError::Seed(format!("{}: {}", path.display(), e)))?;

    for item in &items {
        store.put_menu_item(item)?;
    }
    Ok(items.len())
}
