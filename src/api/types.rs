use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::commands::CreateBooking;
use crate::domain::ItemId;
use crate::ports::BookingRecord;

/// ワイヤ上のタイムスタンプ形式
///
/// タイムゾーンなしのISO-8601ローカル日時（`yyyy-MM-ddTHH:mm:ss`）で固定。
/// chronoのデフォルト表現は小数秒を含みうるため、serdeのwithモジュールで
/// パターンを固定する。
pub mod local_date_time {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// 予約作成リクエスト（POST /bookings）
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub item_id: i64,
    #[serde(with = "local_date_time")]
    pub start: NaiveDateTime,
    #[serde(with = "local_date_time")]
    pub end: NaiveDateTime,
}

impl CreateBookingRequest {
    pub fn to_command(&self) -> CreateBooking {
        CreateBooking {
            item_id: ItemId::from_i64(self.item_id),
            start: self.start,
            end: self.end,
        }
    }
}

/// 予約一覧のクエリパラメータ
///
/// `from`/`size` の範囲検証はハンドラーで行う（負値・0サイズは400）。
/// i32で受けることでu32への変換が非負チェック後に損失なく行える。
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default)]
    pub from: i32,
    #[serde(default = "default_size")]
    pub size: i32,
}

fn default_state() -> String {
    "ALL".to_string()
}

fn default_size() -> i32 {
    10
}

/// 承認クエリパラメータ（PATCH /bookings/:bookingId?approved=）
///
/// 文字列 `"true"` のみを承認として扱い、それ以外は却下とする。
#[derive(Debug, Deserialize)]
pub struct ApprovedQuery {
    pub approved: String,
}

impl ApprovedQuery {
    pub fn is_approved(&self) -> bool {
        self.approved == "true"
    }
}

/// 予約レスポンスのアイテム要約
#[derive(Debug, Serialize)]
pub struct ItemSummary {
    pub id: i64,
    pub name: String,
}

/// 予約レスポンスの予約者要約
#[derive(Debug, Serialize)]
pub struct BookerSummary {
    pub id: i64,
    pub name: String,
}

/// 予約レスポンス（全エンドポイント共通の表現）
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: i64,
    #[serde(with = "local_date_time")]
    pub start: NaiveDateTime,
    #[serde(with = "local_date_time")]
    pub end: NaiveDateTime,
    pub item: ItemSummary,
    pub booker: BookerSummary,
    pub status: String,
}

impl From<BookingRecord> for BookingResponse {
    fn from(record: BookingRecord) -> Self {
        Self {
            id: record.id.value(),
            start: record.start,
            end: record.end,
            item: ItemSummary {
                id: record.item_id.value(),
                name: record.item_name,
            },
            booker: BookerSummary {
                id: record.booker_id.value(),
                name: record.booker_name,
            },
            status: record.status.as_str().to_string(),
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
