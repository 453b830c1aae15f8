use crate::domain::{BookingId, BookingState, BookingStatus, ItemId, Page, UserId};
use async_trait::async_trait;
use chrono::NaiveDateTime;

#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 予約レコード
///
/// ストアが所有する唯一のエンティティ。アイテム／ユーザーは参照（ID）のみ
/// 保持し、表示用の名前と所有者IDは作成時に解決した非正規化フィールド。
/// 所有者IDを持つことで、所有者制約付きの検索がストア内で完結する。
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
    pub id: BookingId,
    pub item_id: ItemId,
    pub item_name: String,
    pub item_owner_id: UserId,
    pub booker_id: UserId,
    pub booker_name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: BookingStatus,
}

/// 採番前の新規予約
///
/// IDはストアがインサート時に割り当てる。ステータスは
/// エンジンが必ずWaitingで渡す。
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct NewBookingRecord {
    pub item_id: ItemId,
    pub item_name: String,
    pub item_owner_id: UserId,
    pub booker_id: UserId,
    pub booker_name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: BookingStatus,
}

/// 予約ストアポート
///
/// 一覧系クエリはすべて `start` 降順で返し、時間条件は
/// `BookingState` の述語表（domain::booking参照）に従う。
#[allow(dead_code)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// 新規予約を保存し、採番済みレコードを返す
    async fn insert(&self, booking: NewBookingRecord) -> Result<BookingRecord>;

    /// IDで予約を取得する
    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<BookingRecord>>;

    /// アイテム所有者に限定してIDで予約を取得する
    ///
    /// 承認／却下パスの所有者チェックをストア側の検索条件で行う。
    /// 所有者でない場合と存在しない場合は呼び出し側から区別できない。
    async fn get_by_id_for_owner(
        &self,
        booking_id: BookingId,
        owner_id: UserId,
    ) -> Result<Option<BookingRecord>>;

    /// ステータスの条件付き更新（compare-and-set）
    ///
    /// 現在のステータスが `expected` のときだけ `next` に更新し、
    /// 更新後のレコードを返す。競合や既遷移の場合はNone。
    async fn update_status(
        &self,
        booking_id: BookingId,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> Result<Option<BookingRecord>>;

    /// 予約者の予約をビューステートで絞り込んでページ取得する
    async fn find_by_booker(
        &self,
        booker_id: UserId,
        state: BookingState,
        now: NaiveDateTime,
        page: Page,
    ) -> Result<Vec<BookingRecord>>;

    /// アイテムIDの集合に対する予約をビューステートで絞り込んでページ取得する
    ///
    /// 所有者側の一覧で使う。空の集合は空の結果。
    async fn find_by_items(
        &self,
        item_ids: &[ItemId],
        state: BookingState,
        now: NaiveDateTime,
        page: Page,
    ) -> Result<Vec<BookingRecord>>;

    /// アイテムの予約を指定ステータスで全件取得する（ページなし）
    ///
    /// アイテム詳細のlast/nextアノテーション計算に使う。
    async fn find_by_item_and_status(
        &self,
        item_id: ItemId,
        status: BookingStatus,
    ) -> Result<Vec<BookingRecord>>;
}
