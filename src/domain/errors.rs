#![allow(dead_code)]

use super::booking::BookingStatus;

/// 予約期間のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingPeriodError {
    /// endがstartより後でない（同時刻も不可）
    EndNotAfterStart,
}

/// ステータス遷移のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTransitionError {
    /// Waiting以外からの遷移は不可（現在のステータスを保持）
    NotWaiting(BookingStatus),
}
