use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{BookingId, ItemId};

/// コマンド：予約を作成する
///
/// 期間の妥当性検証（end > start）はエンジン側で行うため、
/// コマンド自体は生のタイムスタンプを運ぶ。
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBooking {
    pub item_id: ItemId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// コマンド：予約を承認／却下する
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecideBooking {
    pub booking_id: BookingId,
    pub approved: bool,
}
