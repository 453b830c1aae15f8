use crate::domain::UserId;
use crate::ports::user_directory::{Result, UserDirectory as UserDirectoryTrait, UserRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// UserDirectoryのモック実装
///
/// ユーザーコンテキストは本体の対象外のため、登録済みユーザーを
/// メモリで持つだけの実装を本番配線にも使う。
#[allow(dead_code)]
pub struct UserDirectory {
    users: Mutex<HashMap<UserId, String>>,
}

#[allow(dead_code)]
impl UserDirectory {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    /// ユーザーを登録
    pub fn add_user(&self, user_id: UserId, name: impl Into<String>) {
        self.users.lock().unwrap().insert(user_id, name.into());
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectoryTrait for UserDirectory {
    /// 登録済みユーザーの中から解決
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(&user_id)
            .map(|name| UserRecord {
                id: user_id,
                name: name.clone(),
            }))
    }
}
