use crate::domain::{BookingId, BookingState, BookingStatus, ItemId, Page, UserId};
use crate::ports::booking_store::{
    BookingRecord, BookingStore as BookingStoreTrait, NewBookingRecord, Result,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

const COLUMNS: &str =
    "id, item_id, item_name, item_owner_id, booker_id, booker_name, start_date, end_date, status";

/// PostgreSQLの行データをBookingRecordに変換する
///
/// statusカラムの文字列からの変換でエラーハンドリングを行う。
fn map_row_to_booking(row: &PgRow) -> Result<BookingRecord> {
    let status_str: &str = row.get("status");
    let status = BookingStatus::from_str(status_str).map_err(|e| {
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(BookingRecord {
        id: BookingId::from_i64(row.get("id")),
        item_id: ItemId::from_i64(row.get("item_id")),
        item_name: row.get("item_name"),
        item_owner_id: UserId::from_i64(row.get("item_owner_id")),
        booker_id: UserId::from_i64(row.get("booker_id")),
        booker_name: row.get("booker_name"),
        start: row.get("start_date"),
        end: row.get("end_date"),
        status,
    })
}

/// ビューステートをWHERE句の断片に写像する
///
/// `now_param` は現在時刻のプレースホルダ番号。Allは時間条件なし（None）。
/// 六つのステートごとのクエリ複製を避け、述語表を一箇所に集約する。
fn state_condition(state: BookingState, now_param: usize) -> Option<String> {
    match state {
        BookingState::All => None,
        BookingState::Current => Some(format!(
            "start_date <= ${p} AND end_date > ${p}",
            p = now_param
        )),
        BookingState::Past => Some(format!("end_date < ${p}", p = now_param)),
        BookingState::Future => Some(format!("start_date > ${p}", p = now_param)),
        BookingState::Waiting => Some(format!(
            "start_date > ${p} AND status = 'WAITING'",
            p = now_param
        )),
        BookingState::Rejected => Some(format!(
            "start_date > ${p} AND status = 'REJECTED'",
            p = now_param
        )),
    }
}

/// ページ付き一覧クエリを組み立てる
///
/// `base` は対象集合の条件（$1を使用）。現在時刻は$2、LIMIT/OFFSETは
/// 残りの番号に割り当てる。戻り値は（SQL, nowをバインドするか）。
fn page_query(base: &str, state: BookingState) -> (String, bool) {
    match state_condition(state, 2) {
        Some(cond) => (
            format!(
                "SELECT {COLUMNS} FROM bookings WHERE {base} AND {cond} \
                 ORDER BY start_date DESC LIMIT $3 OFFSET $4"
            ),
            true,
        ),
        None => (
            format!(
                "SELECT {COLUMNS} FROM bookings WHERE {base} \
                 ORDER BY start_date DESC LIMIT $2 OFFSET $3"
            ),
            false,
        ),
    }
}

/// BookingStoreのPostgreSQL実装
///
/// 予約レコードの唯一の永続化先。一覧系はすべてstart降順で返す。
#[allow(dead_code)]
pub struct BookingStore {
    pool: PgPool,
}

#[allow(dead_code)]
impl BookingStore {
    /// PostgreSQLコネクションプールから新しいBookingStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    /// 新規予約を保存し、採番済みレコードを返す
    async fn insert(&self, booking: NewBookingRecord) -> Result<BookingRecord> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO bookings (
                item_id,
                item_name,
                item_owner_id,
                booker_id,
                booker_name,
                start_date,
                end_date,
                status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(booking.item_id.value())
        .bind(&booking.item_name)
        .bind(booking.item_owner_id.value())
        .bind(booking.booker_id.value())
        .bind(&booking.booker_name)
        .bind(booking.start)
        .bind(booking.end)
        .bind(booking.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        map_row_to_booking(&row)
    }

    /// IDで予約を取得
    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<BookingRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(booking_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_booking).transpose()
    }

    /// アイテム所有者に限定してIDで予約を取得
    async fn get_by_id_for_owner(
        &self,
        booking_id: BookingId,
        owner_id: UserId,
    ) -> Result<Option<BookingRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM bookings WHERE id = $1 AND item_owner_id = $2"
        ))
        .bind(booking_id.value())
        .bind(owner_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_booking).transpose()
    }

    /// ステータスの条件付き更新
    ///
    /// WHERE句にexpectedを含めることで、並行する承認呼び出しの片方だけが
    /// 行を更新する（compare-and-set）。敗者はNoneを観測する。
    async fn update_status(
        &self,
        booking_id: BookingId,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> Result<Option<BookingRecord>> {
        let row = sqlx::query(&format!(
            "UPDATE bookings SET status = $1 WHERE id = $2 AND status = $3 RETURNING {COLUMNS}"
        ))
        .bind(next.as_str())
        .bind(booking_id.value())
        .bind(expected.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_booking).transpose()
    }

    /// 予約者の予約をビューステートで絞り込んでページ取得
    async fn find_by_booker(
        &self,
        booker_id: UserId,
        state: BookingState,
        now: NaiveDateTime,
        page: Page,
    ) -> Result<Vec<BookingRecord>> {
        let (sql, bind_now) = page_query("booker_id = $1", state);
        let mut query = sqlx::query(&sql).bind(booker_id.value());
        if bind_now {
            query = query.bind(now);
        }
        let rows = query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    /// アイテム集合に対する予約をビューステートで絞り込んでページ取得
    async fn find_by_items(
        &self,
        item_ids: &[ItemId],
        state: BookingState,
        now: NaiveDateTime,
        page: Page,
    ) -> Result<Vec<BookingRecord>> {
        let ids: Vec<i64> = item_ids.iter().map(|id| id.value()).collect();

        let (sql, bind_now) = page_query("item_id = ANY($1)", state);
        let mut query = sqlx::query(&sql).bind(&ids);
        if bind_now {
            query = query.bind(now);
        }
        let rows = query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    /// アイテムの予約を指定ステータスで全件取得（ページなし）
    async fn find_by_item_and_status(
        &self,
        item_id: ItemId,
        status: BookingStatus,
    ) -> Result<Vec<BookingRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM bookings WHERE item_id = $1 AND status = $2"
        ))
        .bind(item_id.value())
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }
}
