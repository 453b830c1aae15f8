use crate::domain::{commands::*, *};
use crate::ports::*;
use std::sync::Arc;

use super::errors::{BookingApplicationError, Result};

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞い（メソッド）は持たず、純粋な関数に依存関係を渡す。
/// エンジンはリクエストスコープで状態を持たず、状態はすべて
/// 予約ストア側にある。
#[derive(Clone)]
#[allow(dead_code)]
pub struct ServiceDependencies {
    pub booking_store: Arc<dyn BookingStore>,
    pub user_directory: Arc<dyn UserDirectory>,
    pub item_catalog: Arc<dyn ItemCatalog>,
}

/// ユーザーを解決するヘルパー関数
///
/// create_booking, decide_booking, 一覧系で共通利用される。
///
/// # エラー
/// - DirectoryError: ディレクトリ呼び出し失敗
/// - UserNotFound: ユーザーが存在しない
async fn resolve_user(deps: &ServiceDependencies, user_id: UserId) -> Result<UserRecord> {
    deps.user_directory
        .find_by_id(user_id)
        .await
        .map_err(BookingApplicationError::DirectoryError)?
        .ok_or(BookingApplicationError::UserNotFound(user_id))
}

/// 予約を作成する（純粋な関数）
///
/// ビジネスルール：
/// - 期間はend > start（厳密）であること
/// - 予約者が存在すること
/// - アイテムが存在し、予約可能であること
/// - 自分のアイテムは予約できないこと
///
/// 作成された予約は必ずWAITING。既存予約との期間重複は意図的に
/// 検査しない（重複解決は対象外）。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `booker_id` - 予約者のユーザーID
/// * `cmd` - 作成コマンド
///
/// # 戻り値
/// 採番済みの予約レコード（表示名は作成時に解決して非正規化する）
#[allow(dead_code)]
pub async fn create_booking(
    deps: &ServiceDependencies,
    booker_id: UserId,
    cmd: CreateBooking,
) -> Result<BookingRecord> {
    // 1. 期間の検証
    let period = BookingPeriod::new(cmd.start, cmd.end)
        .map_err(|_| BookingApplicationError::InvalidBookingRange)?;

    // 2. 予約者の存在確認
    let booker = resolve_user(deps, booker_id).await?;

    // 3. アイテムの解決
    let item = deps
        .item_catalog
        .find_by_id(cmd.item_id)
        .await
        .map_err(BookingApplicationError::CatalogError)?
        .ok_or(BookingApplicationError::ItemNotFound(cmd.item_id))?;

    // 4. 予約可否確認（作成時のみ。承認時には再検証しない）
    if !item.available {
        return Err(BookingApplicationError::ItemNotAvailable);
    }

    // 5. 自己予約の禁止
    if item.owner_id == booker_id {
        return Err(BookingApplicationError::SelfBookingForbidden);
    }

    // 6. WAITINGで永続化
    let record = deps
        .booking_store
        .insert(NewBookingRecord {
            item_id: item.id,
            item_name: item.name,
            item_owner_id: item.owner_id,
            booker_id: booker.id,
            booker_name: booker.name,
            start: period.start(),
            end: period.end(),
            status: BookingStatus::Waiting,
        })
        .await
        .map_err(BookingApplicationError::StoreError)?;

    tracing::debug!(
        booking_id = record.id.value(),
        item_id = record.item_id.value(),
        "booking created"
    );

    Ok(record)
}

/// 予約を承認／却下する（純粋な関数）
///
/// ビジネスルール：
/// - 操作ユーザーが存在すること
/// - 予約が存在し、操作ユーザーがそのアイテムの所有者であること
///   （所有者制約付き検索で同時に強制。所有者でない場合は
///   予約が存在しない場合と同じエラーになる）
/// - 予約がWAITINGであること
///
/// ステータス遷移はストアに対するcompare-and-setで行い、同一予約への
/// 並行した承認呼び出しでも不変条件が守られるようにする。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `owner_id` - 操作ユーザー（アイテム所有者）のID
/// * `cmd` - 承認／却下コマンド
#[allow(dead_code)]
pub async fn decide_booking(
    deps: &ServiceDependencies,
    owner_id: UserId,
    cmd: DecideBooking,
) -> Result<BookingRecord> {
    // 1. 操作ユーザーの存在確認
    resolve_user(deps, owner_id).await?;

    // 2. 所有者制約付きで予約を取得
    let booking = deps
        .booking_store
        .get_by_id_for_owner(cmd.booking_id, owner_id)
        .await
        .map_err(BookingApplicationError::StoreError)?
        .ok_or(BookingApplicationError::BookingNotFound(cmd.booking_id))?;

    // 3. ドメイン層の遷移規則を適用
    let next = booking
        .status
        .decide(cmd.approved)
        .map_err(|_| BookingApplicationError::InvalidStateTransition)?;

    // 4. WAITINGのままであることを条件に更新（競合時はNone）
    let updated = deps
        .booking_store
        .update_status(cmd.booking_id, BookingStatus::Waiting, next)
        .await
        .map_err(BookingApplicationError::StoreError)?
        .ok_or(BookingApplicationError::InvalidStateTransition)?;

    tracing::debug!(
        booking_id = updated.id.value(),
        status = updated.status.as_str(),
        "booking decided"
    );

    Ok(updated)
}

/// 予約をIDで取得する（純粋な関数）
///
/// 閲覧できるのは予約者本人かアイテム所有者のみ。権限がない場合も
/// 存在しない場合と同じBookingNotFoundを返す（区別しない）。
#[allow(dead_code)]
pub async fn find_booking(
    deps: &ServiceDependencies,
    viewer_id: UserId,
    booking_id: BookingId,
) -> Result<BookingRecord> {
    deps.booking_store
        .get_by_id(booking_id)
        .await
        .map_err(BookingApplicationError::StoreError)?
        .filter(|b| b.booker_id == viewer_id || b.item_owner_id == viewer_id)
        .ok_or(BookingApplicationError::BookingNotFound(booking_id))
}

/// 予約者の予約一覧を取得する（純粋な関数）
///
/// ビューステートの時間条件は現在時刻に対して評価され、
/// 結果は常に `start` 降順。
#[allow(dead_code)]
pub async fn list_bookings_for_booker(
    deps: &ServiceDependencies,
    booker_id: UserId,
    state: BookingState,
    page: Page,
) -> Result<Vec<BookingRecord>> {
    resolve_user(deps, booker_id).await?;

    let now = chrono::Local::now().naive_local();
    deps.booking_store
        .find_by_booker(booker_id, state, now, page)
        .await
        .map_err(BookingApplicationError::StoreError)
}

/// 所有者側の予約一覧を取得する（純粋な関数）
///
/// 所有アイテムのID集合を先に解決し、その集合に対する予約を
/// ページ取得する二段構え。アイテムを持たない所有者は空の結果
/// （エラーではない）。
#[allow(dead_code)]
pub async fn list_bookings_for_owner(
    deps: &ServiceDependencies,
    owner_id: UserId,
    state: BookingState,
    page: Page,
) -> Result<Vec<BookingRecord>> {
    resolve_user(deps, owner_id).await?;

    // 1. 所有アイテムの集合を解決
    let item_ids = deps
        .item_catalog
        .ids_owned_by(owner_id)
        .await
        .map_err(BookingApplicationError::CatalogError)?;

    if item_ids.is_empty() {
        return Ok(Vec::new());
    }

    // 2. 集合に対する予約をページ取得
    let now = chrono::Local::now().naive_local();
    deps.booking_store
        .find_by_items(&item_ids, state, now, page)
        .await
        .map_err(BookingApplicationError::StoreError)
}
