use crate::domain::UserId;
use async_trait::async_trait;

#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// ユーザーレコード（予約コンテキストが知る範囲のみ）
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
}

/// ユーザーディレクトリポート
///
/// 予約コンテキストとユーザーコンテキストの境界を維持する。
/// 予約コンテキストはIDと表示名のみを知り、ユーザー詳細は知らない。
#[allow(dead_code)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// IDでユーザーを解決する
    ///
    /// 予約作成・ステータス更新・一覧取得の前のユーザー検証に使用される。
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>>;
}
