#![allow(dead_code)]

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::errors::{BookingPeriodError, StatusTransitionError};

/// 予約ステータス
///
/// ライフサイクル: 作成時は必ずWaiting。Waitingからのみ
/// Approved/Rejectedへ遷移し、以降は終端状態（再遷移なし）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

impl BookingStatus {
    /// ワイヤ／ストアで使う文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        }
    }

    /// 承認／却下の遷移
    ///
    /// 不変条件: Waiting以外からの遷移は不可。
    pub fn decide(self, approved: bool) -> Result<BookingStatus, StatusTransitionError> {
        if self != BookingStatus::Waiting {
            return Err(StatusTransitionError::NotWaiting(self));
        }
        if approved {
            Ok(BookingStatus::Approved)
        } else {
            Ok(BookingStatus::Rejected)
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

/// 予約一覧のビューステート
///
/// ステータスそのものではなく、現在時刻に対する時間条件と
/// ステータス条件を組み合わせたクエリの語彙。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    /// 予約がこのステートのビューに含まれるか
    ///
    /// | ステート | 条件（now = クエリ時刻） |
    /// |---|---|
    /// | All      | 制限なし |
    /// | Current  | start <= now < end |
    /// | Past     | end < now |
    /// | Future   | start > now |
    /// | Waiting  | start > now かつ status = WAITING |
    /// | Rejected | start > now かつ status = REJECTED |
    ///
    /// Waiting/Rejectedに`start > now`が掛かるのは既存挙動の踏襲
    /// （開始済みのWAITING予約はWAITINGビューに出ない）。
    pub fn matches(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        status: BookingStatus,
        now: NaiveDateTime,
    ) -> bool {
        match self {
            BookingState::All => true,
            BookingState::Current => start <= now && now < end,
            BookingState::Past => end < now,
            BookingState::Future => start > now,
            BookingState::Waiting => start > now && status == BookingStatus::Waiting,
            BookingState::Rejected => start > now && status == BookingStatus::Rejected,
        }
    }
}

impl std::str::FromStr for BookingState {
    type Err = String;

    /// 大文字小文字を区別しない厳密パース
    ///
    /// 未知の値は`Unknown state: <値>`のエラー文字列を返す（ワイヤ契約）。
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(BookingState::All),
            "CURRENT" => Ok(BookingState::Current),
            "PAST" => Ok(BookingState::Past),
            "FUTURE" => Ok(BookingState::Future),
            "WAITING" => Ok(BookingState::Waiting),
            "REJECTED" => Ok(BookingState::Rejected),
            _ => Err(format!("Unknown state: {}", s)),
        }
    }
}

/// 予約期間
///
/// 不変条件: end は start より厳密に後。等しい・前は作成時に拒否。
/// 型で保証するため、不正な期間は構築できない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPeriod {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl BookingPeriod {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, BookingPeriodError> {
        if end <= start {
            return Err(BookingPeriodError::EndNotAfterStart);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::str::FromStr;

    fn t(offset_hours: i64) -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            + Duration::hours(offset_hours)
    }

    // BookingPeriod のテスト
    #[test]
    fn test_period_valid() {
        let period = BookingPeriod::new(t(0), t(1)).unwrap();
        assert_eq!(period.start(), t(0));
        assert_eq!(period.end(), t(1));
    }

    #[test]
    fn test_period_end_equal_start_rejected() {
        let result = BookingPeriod::new(t(0), t(0));
        assert_eq!(result.unwrap_err(), BookingPeriodError::EndNotAfterStart);
    }

    #[test]
    fn test_period_end_before_start_rejected() {
        let result = BookingPeriod::new(t(1), t(0));
        assert!(result.is_err());
    }

    // ステータス遷移のテスト
    #[test]
    fn test_decide_waiting_to_approved() {
        assert_eq!(
            BookingStatus::Waiting.decide(true).unwrap(),
            BookingStatus::Approved
        );
    }

    #[test]
    fn test_decide_waiting_to_rejected() {
        assert_eq!(
            BookingStatus::Waiting.decide(false).unwrap(),
            BookingStatus::Rejected
        );
    }

    #[test]
    fn test_decide_terminal_states_fail() {
        assert!(BookingStatus::Approved.decide(false).is_err());
        assert!(BookingStatus::Rejected.decide(true).is_err());
    }

    // ビューステートのパース
    #[test]
    fn test_state_parse_case_insensitive() {
        assert_eq!(BookingState::from_str("all").unwrap(), BookingState::All);
        assert_eq!(
            BookingState::from_str("Current").unwrap(),
            BookingState::Current
        );
        assert_eq!(
            BookingState::from_str("REJECTED").unwrap(),
            BookingState::Rejected
        );
    }

    #[test]
    fn test_state_parse_unknown() {
        let err = BookingState::from_str("UNSUPPORTED_STATUS").unwrap_err();
        assert_eq!(err, "Unknown state: UNSUPPORTED_STATUS");
    }

    // 時間述語のテスト: 予約 [t(0), t(2)) を各時点で評価
    #[test]
    fn test_matches_current() {
        let state = BookingState::Current;
        assert!(state.matches(t(0), t(2), BookingStatus::Approved, t(1)));
        assert!(state.matches(t(0), t(2), BookingStatus::Approved, t(0)));
        assert!(!state.matches(t(0), t(2), BookingStatus::Approved, t(2)));
        assert!(!state.matches(t(0), t(2), BookingStatus::Approved, t(-1)));
    }

    #[test]
    fn test_matches_past() {
        let state = BookingState::Past;
        assert!(state.matches(t(0), t(2), BookingStatus::Approved, t(3)));
        assert!(!state.matches(t(0), t(2), BookingStatus::Approved, t(2)));
        assert!(!state.matches(t(0), t(2), BookingStatus::Approved, t(1)));
    }

    #[test]
    fn test_matches_future() {
        let state = BookingState::Future;
        assert!(state.matches(t(1), t(2), BookingStatus::Waiting, t(0)));
        assert!(!state.matches(t(1), t(2), BookingStatus::Waiting, t(1)));
    }

    #[test]
    fn test_matches_waiting_requires_future_start() {
        let state = BookingState::Waiting;
        assert!(state.matches(t(1), t(2), BookingStatus::Waiting, t(0)));
        // 開始済みのWAITING予約はWAITINGビューから外れる
        assert!(!state.matches(t(0), t(2), BookingStatus::Waiting, t(1)));
        assert!(!state.matches(t(1), t(2), BookingStatus::Approved, t(0)));
    }

    #[test]
    fn test_matches_rejected_requires_future_start() {
        let state = BookingState::Rejected;
        assert!(state.matches(t(1), t(2), BookingStatus::Rejected, t(0)));
        assert!(!state.matches(t(-2), t(-1), BookingStatus::Rejected, t(0)));
    }

    #[test]
    fn test_matches_all() {
        assert!(BookingState::All.matches(t(-2), t(-1), BookingStatus::Rejected, t(0)));
        assert!(BookingState::All.matches(t(1), t(2), BookingStatus::Waiting, t(0)));
    }
}
