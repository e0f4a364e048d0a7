//! 当前登录会话（扁平化的登录记录，与用户列表中的 User 结构不同）

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::tasks::Task;
use super::{load_json, save_json, KeyValueStore, KEY_CURRENT_USER, KEY_EMAIL, KEY_PASSWORD};
use crate::api::LoginResponse;
use crate::error::Result;

/// 会话对象
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrentUser {
    pub token: String,
    pub email: String,
    pub user_id: Option<u64>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// 会话自带的任务列表（存在时优先用于统计）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
}

impl CurrentUser {
    /// 由登录接口的响应构造会话
    pub fn from_login(response: LoginResponse) -> Self {
        Self {
            token: response.token,
            email: response.email,
            user_id: response.user_id,
            username: response.username,
            first_name: response.first_name,
            last_name: response.last_name,
            tasks: None,
        }
    }
}

/// 加载会话（解析失败返回错误）
pub fn try_load_session(store: &dyn KeyValueStore) -> Result<Option<CurrentUser>> {
    load_json(store, KEY_CURRENT_USER)
}

/// 加载会话，解析失败时记录警告并按访客处理
pub fn load_session(store: &dyn KeyValueStore) -> Option<CurrentUser> {
    try_load_session(store).unwrap_or_else(|e| {
        warn!(key = KEY_CURRENT_USER, error = %e, "failed to load session");
        None
    })
}

/// 保存会话
pub fn save_session(store: &mut dyn KeyValueStore, session: &CurrentUser) -> Result<()> {
    save_json(store, KEY_CURRENT_USER, session)
}

/// 清除会话
pub fn clear_session(store: &mut dyn KeyValueStore) -> Result<()> {
    store.remove_item(KEY_CURRENT_USER)
}

/// 读取 "记住我" 保存的邮箱
pub fn load_remembered_email(store: &dyn KeyValueStore) -> Option<String> {
    match load_json::<String>(store, KEY_EMAIL) {
        Ok(value) => value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        Err(e) => {
            warn!(key = KEY_EMAIL, error = %e, "failed to read remembered email");
            None
        }
    }
}

/// 记住邮箱（密码从不保存）
pub fn remember_email(store: &mut dyn KeyValueStore, email: &str) -> Result<()> {
    save_json(store, KEY_EMAIL, email)
}

/// 忘记邮箱
pub fn forget_email(store: &mut dyn KeyValueStore) -> Result<()> {
    store.remove_item(KEY_EMAIL)
}

/// 删除旧版本遗留的明文密码
pub fn purge_legacy_password(store: &mut dyn KeyValueStore) -> Result<()> {
    store.remove_item(KEY_PASSWORD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;

    fn login_response() -> LoginResponse {
        LoginResponse {
            token: "tok-123".to_string(),
            email: "anna@example.com".to_string(),
            user_id: Some(7),
            username: Some("anna".to_string()),
            first_name: Some("Anna".to_string()),
            last_name: Some("Berg".to_string()),
        }
    }

    #[test]
    fn test_from_login_flattens_response() {
        let session = CurrentUser::from_login(login_response());
        assert_eq!(session.token, "tok-123");
        assert_eq!(session.user_id, Some(7));
        assert_eq!(session.first_name.as_deref(), Some("Anna"));
        assert!(session.tasks.is_none());
    }

    #[test]
    fn test_session_json_keys() {
        let session = CurrentUser::from_login(login_response());
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["userId"], 7);
        assert_eq!(value["firstName"], "Anna");
        assert_eq!(value["lastName"], "Berg");
        assert!(value.get("tasks").is_none());
    }

    #[test]
    fn test_session_roundtrip_and_clear() {
        let mut store = MemoryStore::new();
        assert!(load_session(&store).is_none());

        let session = CurrentUser::from_login(login_response());
        save_session(&mut store, &session).unwrap();
        assert_eq!(load_session(&store), Some(session));

        clear_session(&mut store).unwrap();
        assert!(load_session(&store).is_none());
    }

    #[test]
    fn test_corrupt_session_is_guest() {
        let store = MemoryStore::new().with_item(KEY_CURRENT_USER, "{\"token\":");
        assert!(try_load_session(&store).is_err());
        assert!(load_session(&store).is_none());
    }

    #[test]
    fn test_partial_legacy_session() {
        let store =
            MemoryStore::new().with_item(KEY_CURRENT_USER, r#"{"firstName":"Kim","lastName":null}"#);
        let session = load_session(&store).unwrap();
        assert_eq!(session.first_name.as_deref(), Some("Kim"));
        assert!(session.last_name.is_none());
        assert!(session.token.is_empty());
    }

    #[test]
    fn test_remember_email_never_password() {
        let mut store = MemoryStore::new().with_item(KEY_PASSWORD, "hunter2");
        remember_email(&mut store, "anna@example.com").unwrap();
        purge_legacy_password(&mut store).unwrap();

        assert_eq!(
            load_remembered_email(&store).as_deref(),
            Some("anna@example.com")
        );
        assert!(!store.contains(KEY_PASSWORD));

        forget_email(&mut store).unwrap();
        assert!(load_remembered_email(&store).is_none());
    }
}
