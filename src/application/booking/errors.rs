use thiserror::Error;

use crate::domain::{BookingId, ItemId, UserId};

/// 予約管理アプリケーション層のエラー
///
/// 所有者でないユーザーによる更新・閲覧は、存在しない予約と同じ
/// `BookingNotFound` に畳み込む（存在の有無を漏らさない）。
#[derive(Debug, Error)]
pub enum BookingApplicationError {
    /// ユーザーが存在しない
    #[error("User with id {} not found", .0.value())]
    UserNotFound(UserId),

    /// アイテムが存在しない
    #[error("Item with id {} not found", .0.value())]
    ItemNotFound(ItemId),

    /// 予約が存在しない、または閲覧・更新権限がない
    #[error("Booking with id {} not found", .0.value())]
    BookingNotFound(BookingId),

    /// アイテムが予約不可
    #[error("Item is not available for booking")]
    ItemNotAvailable,

    /// 自分のアイテムは予約できない
    #[error("Booking your own item is forbidden")]
    SelfBookingForbidden,

    /// 期間が不正（end <= start）
    #[error("Booking end must be strictly after start")]
    InvalidBookingRange,

    /// WAITING以外の予約に対する承認／却下
    #[error("Booking status must be WAITING")]
    InvalidStateTransition,

    /// 未知のビューステート
    #[error("Unknown state: {0}")]
    UnknownState(String),

    /// 予約ストアのエラー
    #[error("Booking store error")]
    StoreError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// ユーザーディレクトリのエラー
    #[error("User directory error")]
    DirectoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// アイテムカタログのエラー
    #[error("Item catalog error")]
    CatalogError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookingApplicationError>;
