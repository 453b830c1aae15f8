use crate::domain::{ItemId, UserId};
use crate::ports::item_catalog::{ItemCatalog as ItemCatalogTrait, ItemRecord, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// ItemCatalogのモック実装
///
/// アイテムレコードをメモリで保持するステートフルな実装。
/// 所有者と予約可否フラグを付けてアイテムを登録できる。
#[allow(dead_code)]
pub struct ItemCatalog {
    items: Mutex<HashMap<ItemId, ItemRecord>>,
}

#[allow(dead_code)]
impl ItemCatalog {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
        }
    }

    /// アイテムを登録
    pub fn add_item(
        &self,
        item_id: ItemId,
        name: impl Into<String>,
        owner_id: UserId,
        available: bool,
    ) {
        self.items.lock().unwrap().insert(
            item_id,
            ItemRecord {
                id: item_id,
                name: name.into(),
                owner_id,
                available,
            },
        );
    }

    /// 登録済みアイテムの予約可否フラグを切り替え
    pub fn set_available(&self, item_id: ItemId, available: bool) {
        if let Some(item) = self.items.lock().unwrap().get_mut(&item_id) {
            item.available = available;
        }
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemCatalogTrait for ItemCatalog {
    /// IDで登録済みアイテムを検索
    async fn find_by_id(&self, item_id: ItemId) -> Result<Option<ItemRecord>> {
        Ok(self.items.lock().unwrap().get(&item_id).cloned())
    }

    /// 指定ユーザーが所有するアイテムのID一覧を取得
    async fn ids_owned_by(&self, owner_id: UserId) -> Result<Vec<ItemId>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|item| item.owner_id == owner_id)
            .map(|item| item.id)
            .collect())
    }
}
