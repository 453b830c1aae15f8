use crate::domain::{ItemId, UserId};
use async_trait::async_trait;

#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// アイテムレコード（予約コンテキストが知る範囲のみ）
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub id: ItemId,
    pub name: String,
    pub owner_id: UserId,
    pub available: bool,
}

/// アイテムカタログポート
///
/// 予約コンテキストとカタログコンテキストの境界を維持する。
/// 予約エンジンは所有者・貸出可否フラグ・表示名だけを参照する。
#[allow(dead_code)]
#[async_trait]
pub trait ItemCatalog: Send + Sync {
    /// IDでアイテムを解決する
    ///
    /// ビジネスルール: 貸出不可のアイテムは予約できない。
    /// 可否の判定は作成時のみで、承認時には再検証しない。
    async fn find_by_id(&self, item_id: ItemId) -> Result<Option<ItemRecord>>;

    /// 所有者のアイテムID一覧を取得する
    ///
    /// 所有者側の予約一覧の対象集合を決める。アイテムを持たない
    /// 所有者は空集合（エラーではない）。
    async fn ids_owned_by(&self, owner_id: UserId) -> Result<Vec<ItemId>>;
}
