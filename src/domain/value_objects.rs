#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// 予約ID - 予約コンテキストの集約ID
///
/// ストアが採番する（インサート時に確定）。ワイヤ上は数値IDで固定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(i64);

impl BookingId {
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// アイテムID - カタログコンテキストへの参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(i64);

impl ItemId {
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// ユーザーID - ユーザーディレクトリコンテキストへの参照
///
/// 予約者（booker）とアイテム所有者（owner）の両方に使われる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// ページ指定
///
/// `from` は件数オフセット風のAPIだが、実体はページ単位のページネーション。
/// ページ番号は `from > 0 ? from / size : 0` で求めるため、`from` が
/// `size` の倍数でない場合は近似的なオフセットになる。この挙動は
/// 公開APIの互換性のためそのまま維持する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    from: u32,
    size: u32,
}

impl Page {
    /// 不変条件: size > 0（トランスポート層で検証済みの値を受け取る）
    pub fn new(from: u32, size: u32) -> Self {
        debug_assert!(size > 0);
        Self { from, size }
    }

    /// ページ番号（0始まり）
    pub fn page_index(&self) -> u32 {
        if self.from > 0 { self.from / self.size } else { 0 }
    }

    /// ストアに渡す行オフセット
    pub fn offset(&self) -> u32 {
        self.page_index() * self.size
    }

    /// 1ページあたりの件数
    pub fn limit(&self) -> u32 {
        self.size
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, 10)
    }
}
