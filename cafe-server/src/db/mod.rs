//! 持久化层
//!
//! 订单存储只依赖这里定义的两个协作者契约：
//!
//! - [`OrderRepository`] - 订单文档 CRUD + 查询
//! - [`MenuLookup`] - 菜单项按 id 查询 (只读)
//!
//! 默认实现是 [`RedbStore`] (嵌入式 redb)。

pub mod storage;

use async_trait::async_trait;
use shared::error::AppError;
use shared::models::{MenuItem, Order, OrderPatch};
use thiserror::Error;

pub use storage::RedbStore;

/// Storage errors
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Duplicate id: {0}")]
    Duplicate(String),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        tracing::error!(error = %err, "Storage failure");
        AppError::store_unavailable(err.to_string())
    }
}

/// 订单列表过滤条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// 精确匹配顾客名
    pub customer_name: Option<String>,
}

impl OrderFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_customer(name: impl Into<String>) -> Self {
        Self {
            customer_name: Some(name.into()),
        }
    }

    pub fn matches(&self, order: &Order) -> bool {
        match &self.customer_name {
            Some(name) => order.customer_name.as_deref() == Some(name.as_str()),
            None => true,
        }
    }
}

/// 订单文档存储
///
/// `update_by_id` 必须在单个事务内完成读-改-写，保证单文档原子性。
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn insert(&self, order: &Order) -> RepoResult<()>;

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>>;

    /// 按 `created_at` 降序；同一时间戳后插入的在前
    async fn find_many(&self, filter: &OrderFilter) -> RepoResult<Vec<Order>>;

    /// 返回更新后的订单；不存在时返回 `None`
    async fn update_by_id(&self, id: &str, patch: &OrderPatch) -> RepoResult<Option<Order>>;

    /// 返回被删除的订单；不存在时返回 `None`
    async fn delete_by_id(&self, id: &str) -> RepoResult<Option<Order>>;
}

/// 菜单项只读查询
#[async_trait]
pub trait MenuLookup: Send + Sync {
    /// 返回找到的菜单项，缺失的 id 直接忽略
    async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<MenuItem>>;

    /// 全部菜单项，`created_at` 降序
    async fn list_menu(&self) -> RepoResult<Vec<MenuItem>>;
}
