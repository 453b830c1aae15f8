use chrono::NaiveDateTime;

use crate::domain::{BookingStatus, ItemId};
use crate::ports::BookingRecord;

use super::booking_service::ServiceDependencies;
use super::errors::{BookingApplicationError, Result};

/// アイテム詳細に表示するlast/next予約
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct BookingAnnotations {
    /// 直近の予約（開始済みのうちendが最大のもの）
    pub last: Option<BookingRecord>,
    /// 次の予約（未開始のうちstartが最小のもの）
    pub next: Option<BookingRecord>,
}

/// アイテムのlast/next予約アノテーションを計算する（純粋な関数）
///
/// アイテム詳細ページの表示用で、対象はAPPROVEDの予約のみ。
/// WAITINGやREJECTEDはアノテーションに現れない。
///
/// - last: `start < now` の予約のうち `end` が最大のもの
/// - next: `start > now` の予約のうち `start` が最小のもの
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `item_id` - 対象アイテム
/// * `now` - 評価時刻（呼び出し側のクエリ時刻）
#[allow(dead_code)]
pub async fn booking_annotations(
    deps: &ServiceDependencies,
    item_id: ItemId,
    now: NaiveDateTime,
) -> Result<BookingAnnotations> {
    let approved = deps
        .booking_store
        .find_by_item_and_status(item_id, BookingStatus::Approved)
        .await
        .map_err(BookingApplicationError::StoreError)?;

    let last = approved
        .iter()
        .filter(|b| b.start < now)
        .max_by_key(|b| b.end)
        .cloned();

    let next = approved
        .iter()
        .filter(|b| b.start > now)
        .min_by_key(|b| b.start)
        .cloned();

    Ok(BookingAnnotations { last, next })
}
