use crate::application::booking::BookingApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをHTTPステータスに写像する。
/// エラー本文は常に `{"error": "<message>"}`。
#[derive(Debug)]
pub enum ApiError {
    /// アプリケーション層のエラー
    Application(BookingApplicationError),
    /// トランスポート層のバリデーションエラー
    BadRequest(String),
}

impl From<BookingApplicationError> for ApiError {
    fn from(err: BookingApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),

            // 404 Not Found - リソースが存在しない、または閲覧権限がない
            // （権限なしと不存在は意図的に同じ応答に畳み込む）
            ApiError::Application(
                err @ (BookingApplicationError::UserNotFound(_)
                | BookingApplicationError::ItemNotFound(_)
                | BookingApplicationError::BookingNotFound(_)),
            ) => (StatusCode::NOT_FOUND, err.to_string()),

            // 400 Bad Request - リクエストがビジネスルールに反する
            ApiError::Application(
                err @ (BookingApplicationError::InvalidBookingRange
                | BookingApplicationError::SelfBookingForbidden
                | BookingApplicationError::ItemNotAvailable
                | BookingApplicationError::InvalidStateTransition
                | BookingApplicationError::UnknownState(_)),
            ) => (StatusCode::BAD_REQUEST, err.to_string()),

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            ApiError::Application(
                err @ (BookingApplicationError::StoreError(_)
                | BookingApplicationError::DirectoryError(_)
                | BookingApplicationError::CatalogError(_)),
            ) => {
                tracing::error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
