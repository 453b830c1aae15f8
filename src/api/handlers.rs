use crate::application::booking::{
    BookingApplicationError, ServiceDependencies, create_booking as execute_create_booking,
    decide_booking as execute_decide_booking, find_booking as execute_find_booking,
    list_bookings_for_booker, list_bookings_for_owner,
};
use crate::domain::commands::DecideBooking;
use crate::domain::{BookingId, BookingState, Page, UserId};
use axum::{
    Json,
    extract::{FromRequestParts, Path, Query, State},
    http::{StatusCode, request::Parts},
};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{ApprovedQuery, BookingResponse, CreateBookingRequest, ErrorResponse, ListBookingsQuery},
};

/// 呼び出しユーザーを運ぶヘッダー
pub const X_SHARER_USER_ID: &str = "X-Sharer-User-Id";

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Extractors
// ============================================================================

/// `X-Sharer-User-Id` ヘッダーのエクストラクタ
///
/// 全エンドポイントで必須。欠落・数値でない場合は400。
pub struct SharerUserId(pub UserId);

#[axum::async_trait]
impl<S> FromRequestParts<S> for SharerUserId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(X_SHARER_USER_ID)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i64>().ok())
            .map(|id| SharerUserId(UserId::from_i64(id)))
            .ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new("X-Sharer-User-Id header is required")),
                )
            })
    }
}

/// 一覧系クエリパラメータの検証
///
/// from は 0 以上、size は 1 以上。違反は400。
fn parse_page(query: &ListBookingsQuery) -> Result<Page, ApiError> {
    if query.from < 0 {
        return Err(ApiError::BadRequest(
            "from must be positive or zero".to_string(),
        ));
    }
    if query.size <= 0 {
        return Err(ApiError::BadRequest("size must be positive".to_string()));
    }
    Ok(Page::new(query.from as u32, query.size as u32))
}

/// 作成リクエストのタイムスタンプ検証
///
/// startとendはいずれも過去であってはならない（現在時刻は許容）。
/// エンジン側はend > startの順序のみを検証するため、
/// 過去日時の拒否はトランスポート層の責務。
fn validate_not_past(req: &CreateBookingRequest) -> Result<(), ApiError> {
    let now = chrono::Local::now().naive_local();
    if req.start < now {
        return Err(ApiError::BadRequest(
            "start must not be in the past".to_string(),
        ));
    }
    if req.end < now {
        return Err(ApiError::BadRequest(
            "end must not be in the past".to_string(),
        ));
    }
    Ok(())
}

/// ビューステートの厳密パース
///
/// 大文字小文字は区別しない。未知の値は元の文字列を載せた400。
fn parse_state(state: &str) -> Result<BookingState, ApiError> {
    state
        .parse::<BookingState>()
        .map_err(|_| BookingApplicationError::UnknownState(state.to_string()).into())
}

// ============================================================================
// Command handlers
// ============================================================================

/// POST /bookings - 新しい予約を作成
///
/// 強制されるビジネスルール:
/// - startとendが過去でないこと（この層で検証）
/// - 期間はend > start（厳密）であること
/// - 予約者が存在すること
/// - アイテムが存在し、予約可能であること
/// - 自分のアイテムは予約できないこと
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    SharerUserId(user_id): SharerUserId,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    validate_not_past(&req)?;
    let record = execute_create_booking(&state.service_deps, user_id, req.to_command()).await?;
    tracing::debug!(item_id = req.item_id, "booked item");
    Ok(Json(BookingResponse::from(record)))
}

/// PATCH /bookings/:bookingId?approved= - 予約を承認／却下
///
/// 操作できるのはアイテム所有者のみ。`approved=true` で承認、
/// それ以外の値は却下として扱う。
pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    SharerUserId(user_id): SharerUserId,
    Path(booking_id): Path<i64>,
    Query(query): Query<ApprovedQuery>,
) -> Result<Json<BookingResponse>, ApiError> {
    let cmd = DecideBooking {
        booking_id: BookingId::from_i64(booking_id),
        approved: query.is_approved(),
    };
    let record = execute_decide_booking(&state.service_deps, user_id, cmd).await?;
    tracing::debug!(booking_id, "booking status updated");
    Ok(Json(BookingResponse::from(record)))
}

// ============================================================================
// Query handlers
// ============================================================================

/// GET /bookings/:bookingId - 予約詳細をIDで取得
///
/// 閲覧できるのは予約者本人かアイテム所有者のみ。
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    SharerUserId(user_id): SharerUserId,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingResponse>, ApiError> {
    let record =
        execute_find_booking(&state.service_deps, user_id, BookingId::from_i64(booking_id))
            .await?;
    Ok(Json(BookingResponse::from(record)))
}

/// GET /bookings - 予約者としての予約一覧
///
/// クエリパラメータ:
/// - state: ALL/CURRENT/PAST/FUTURE/WAITING/REJECTED（デフォルトALL）
/// - from, size: ページ指定（デフォルト 0, 10）
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let page = parse_page(&query)?;
    let booking_state = parse_state(&query.state)?;

    let records =
        list_bookings_for_booker(&state.service_deps, user_id, booking_state, page).await?;
    Ok(Json(records.into_iter().map(BookingResponse::from).collect()))
}

/// GET /bookings/owner - アイテム所有者としての予約一覧
///
/// 所有アイテムへの予約を横断して返す。アイテムを持たない
/// 所有者には空の一覧。
pub async fn list_owner_bookings(
    State(state): State<Arc<AppState>>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let page = parse_page(&query)?;
    let booking_state = parse_state(&query.state)?;

    let records =
        list_bookings_for_owner(&state.service_deps, user_id, booking_state, page).await?;
    Ok(Json(records.into_iter().map(BookingResponse::from).collect()))
}
