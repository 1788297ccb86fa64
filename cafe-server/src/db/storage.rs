//! redb-based document store
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `order_id` | `StoredOrder` | Order documents |
//! | `order_timeline` | `(created_at, seq)` | `order_id` | Newest-first listing |
//! | `menu_items` | `menu_item_id` | `MenuItem` | Menu reference data |
//! | `sequence` | `"insert_seq"` | `u64` | Insertion counter (tie-break) |
//!
//! 单个写事务内完成读-改-写，redb 保证提交原子性；并发写同一订单时后提交者生效。

use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
    WriteTransaction,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::{MenuItem, Order, OrderPatch};
use std::path::Path;
use std::sync::Arc;

use super::{MenuLookup, OrderFilter, OrderRepository, RepoError, RepoResult};

/// key = order_id, value = JSON-serialized StoredOrder
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// key = (created_at, seq), value = order_id
const ORDER_TIMELINE_TABLE: TableDefinition<(i64, u64), &str> =
    TableDefinition::new("order_timeline");

/// key = menu_item_id, value = JSON-serialized MenuItem
const MENU_ITEMS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("menu_items");

const SEQUENCE_TABLE: TableDefinition<&str, u64> = TableDefinition::new("sequence");

const INSERT_SEQ_KEY: &str = "insert_seq";

/// 订单文档 + 插入序号
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredOrder {
    seq: u64,
    order: Order,
}

impl StoredOrder {
    fn timeline_key(&self) -> (i64, u64) {
        (self.order.created_at, self.seq)
    }
}

/// Document store backed by redb
#[derive(Debug, Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (tests)
    pub fn open_in_memory() -> RepoResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> RepoResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(ORDER_TIMELINE_TABLE)?;
            let _ = write_txn.open_table(MENU_ITEMS_TABLE)?;

            let mut seq_table = write_txn.open_table(SEQUENCE_TABLE)?;
            if seq_table.get(INSERT_SEQ_KEY)?.is_none() {
                seq_table.insert(INSERT_SEQ_KEY, 0u64)?;
            }
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    fn next_seq(txn: &WriteTransaction) -> RepoResult<u64> {
        let mut table = txn.open_table(SEQUENCE_TABLE)?;
        let current = table
            .get(INSERT_SEQ_KEY)?
            .map(|guard| guard.value())
            .unwrap_or(0);
        let next = current + 1;
        table.insert(INSERT_SEQ_KEY, next)?;
        Ok(next)
    }

    fn read_stored(txn: &WriteTransaction, id: &str) -> RepoResult<Option<StoredOrder>> {
        let table = txn.open_table(ORDERS_TABLE)?;
        let stored = match table.get(id)? {
            Some(guard) => Some(serde_json::from_slice::<StoredOrder>(guard.value())?),
            None => None,
        };
        Ok(stored)
    }

    /// 写入/覆盖菜单项 (启动种子数据与测试使用)
    pub fn put_menu_item(&self, item: &MenuItem) -> RepoResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(MENU_ITEMS_TABLE)?;
            let value = serde_json::to_vec(item)?;
            table.insert(item.id.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// 删除菜单项 (仅测试用：模拟下单后菜单项被移除)
    pub fn remove_menu_item(&self, id: &str) -> RepoResult<bool> {
        let txn = self.db.begin_write()?;
        let removed = {
            let mut table = txn.open_table(MENU_ITEMS_TABLE)?;
            table.remove(id)?.is_some()
        };
        txn.commit()?;
        Ok(removed)
    }

    /// Number of stored orders
    pub fn order_count(&self) -> RepoResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        Ok(table.len()?)
    }
}

#[async_trait]
impl OrderRepository for RedbStore {
    async fn insert(&self, order: &Order) -> RepoResult<()> {
        let txn = self.db.begin_write()?;
        if Self::read_stored(&txn, &order.id)?.is_some() {
            txn.abort()?;
            return Err(RepoError::Duplicate(order.id.clone()));
        }

        let seq = Self::next_seq(&txn)?;
        {
            let mut orders = txn.open_table(ORDERS_TABLE)?;
            let stored = StoredOrder {
                seq,
                order: order.clone(),
            };
            let value = serde_json::to_vec(&stored)?;
            orders.insert(order.id.as_str(), value.as_slice())?;

            let mut timeline = txn.open_table(ORDER_TIMELINE_TABLE)?;
            timeline.insert(stored.timeline_key(), order.id.as_str())?;
        }
        txn.commit()?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        match table.get(id)? {
            Some(guard) => {
                let stored: StoredOrder = serde_json::from_slice(guard.value())?;
                Ok(Some(stored.order))
            }
            None => Ok(None),
        }
    }

    async fn find_many(&self, filter: &OrderFilter) -> RepoResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let timeline = read_txn.open_table(ORDER_TIMELINE_TABLE)?;
        let orders = read_txn.open_table(ORDERS_TABLE)?;

        let mut result = Vec::new();
        for entry in timeline.iter()?.rev() {
            let (_key, id) = entry?;
            let Some(guard) = orders.get(id.value())? else {
                tracing::warn!(order_id = %id.value(), "Timeline entry without order document");
                continue;
            };
            let stored: StoredOrder = serde_json::from_slice(guard.value())?;
            if filter.matches(&stored.order) {
                result.push(stored.order);
            }
        }
        Ok(result)
    }

    async fn update_by_id(&self, id: &str, patch: &OrderPatch) -> RepoResult<Option<Order>> {
        let txn = self.db.begin_write()?;
        let Some(mut stored) = Self::read_stored(&txn, id)? else {
            txn.abort()?;
            return Ok(None);
        };

        stored.order.apply(patch);
        {
            let mut table = txn.open_table(ORDERS_TABLE)?;
            let value = serde_json::to_vec(&stored)?;
            table.insert(id, value.as_slice())?;
        }
        txn.commit()?;
        Ok(Some(stored.order))
    }

    async fn delete_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let txn = self.db.begin_write()?;
        let Some(stored) = Self::read_stored(&txn, id)? else {
            txn.abort()?;
            return Ok(None);
        };
        {
            let mut orders = txn.open_table(ORDERS_TABLE)?;
            orders.remove(id)?;
            let mut timeline = txn.open_table(ORDER_TIMELINE_TABLE)?;
            timeline.remove(stored.timeline_key())?;
        }
        txn.commit()?;
        Ok(Some(stored.order))
    }
}

#[async_trait]
impl MenuLookup for RedbStore {
    async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<MenuItem>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MENU_ITEMS_TABLE)?;

        let mut items: Vec<MenuItem> = Vec::with_capacity(ids.len());
        for id in ids {
            if items.iter().any(|item| &item.id == id) {
                continue;
            }
            if let Some(guard) = table.get(id.as_str())? {
                items.push(serde_json::from_slice(guard.value())?);
            }
        }
        Ok(items)
    }

    async fn list_menu(&self) -> RepoResult<Vec<MenuItem>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MENU_ITEMS_TABLE)?;

        let mut items = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let item: MenuItem = serde_json::from_slice(value.value())?;
            items.push(item);
        }
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }
}
