//! 本地用户列表
//! 管理 `users` 键下的 User 记录，以及 isYou 标记（当前用户）

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::tasks::Task;
use super::{load_json, save_json, KeyValueStore, KEY_USERS};
use crate::error::{Result, TaskdeskError};

/// 联系人
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub id: Option<String>,
    pub avatarid: Option<u32>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// 用户记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(rename = "userID")]
    pub user_id: u64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub initials: Option<String>,
    pub user_color: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    /// 旧数据中的明文密码：读取时接受，写回时丢弃
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub is_you: bool,
    pub contacts: Vec<Contact>,
    pub tasks: Vec<Task>,
}

/// 当前身份
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    User(u64),
    Guest,
}

/// 加载用户列表（解析失败返回错误）
pub fn try_load_users(store: &dyn KeyValueStore) -> Result<Vec<User>> {
    Ok(load_json(store, KEY_USERS)?.unwrap_or_default())
}

/// 加载用户列表，不存在或解析失败时返回空列表（失败会记录警告）
pub fn load_users(store: &dyn KeyValueStore) -> Vec<User> {
    try_load_users(store).unwrap_or_else(|e| {
        warn!(key = KEY_USERS, error = %e, "failed to load users");
        Vec::new()
    })
}

/// 保存用户列表
pub fn save_users(store: &mut dyn KeyValueStore, users: &[User]) -> Result<()> {
    save_json(store, KEY_USERS, users)
}

/// 将指定用户设为当前用户，其余用户全部清除标记
///
/// 用户不存在时返回 NotFound，列表保持不变。
pub fn set_current_user(users: &mut [User], user_id: u64) -> Result<()> {
    if !users.iter().any(|u| u.user_id == user_id) {
        return Err(TaskdeskError::not_found(format!("user {}", user_id)));
    }
    clear_current_user(users);
    // 旧数据可能有重复的 userID，只标记第一个
    if let Some(user) = users.iter_mut().find(|u| u.user_id == user_id) {
        user.is_you = true;
    }
    Ok(())
}

/// 清除所有用户的当前标记
pub fn clear_current_user(users: &mut [User]) {
    for user in users.iter_mut() {
        user.is_you = false;
    }
}

/// 解析当前身份：第一个 isYou 的用户，否则为访客
pub fn current_identity(users: &[User]) -> Identity {
    users
        .iter()
        .find(|u| u.is_you)
        .map(|u| Identity::User(u.user_id))
        .unwrap_or(Identity::Guest)
}

/// 按邮箱查找用户
pub fn find_by_email<'a>(users: &'a [User], email: &str) -> Option<&'a User> {
    users.iter().find(|u| u.email == email)
}

/// 检查邮箱是否已存在
pub fn email_exists(users: &[User], email: &str) -> bool {
    find_by_email(users, email).is_some()
}

/// 新建用户记录（不加入列表，不保存密码）
pub fn new_user(users: &[User], name: &str, email: &str) -> User {
    let (first_name, last_name) = split_name(name);
    let next_id = users
        .iter()
        .map(|u| u.user_id.saturating_add(1))
        .max()
        .unwrap_or(0);

    User {
        user_id: next_id,
        first_name,
        last_name,
        initials: Some(initials(name)),
        email: email.to_string(),
        ..User::default()
    }
}

/// 拆分姓名："anna berg" → ("Anna", Some("Berg"))，"anna" → ("Anna", None)
pub fn split_name(name: &str) -> (String, Option<String>) {
    let mut words = name.split_whitespace();
    let first = words.next().map(capitalize).unwrap_or_default();
    let last = words.next().map(capitalize);
    (first, last)
}

/// 计算姓名缩写：两个词取首字母，一个词取前两个字符
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let raw: String = match words.as_slice() {
        [] => String::new(),
        [single] => single.chars().take(2).collect(),
        [first, second, ..] => first.chars().take(1).chain(second.chars().take(1)).collect(),
    };
    raw.to_uppercase()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;

    fn user(id: u64, email: &str, is_you: bool) -> User {
        User {
            user_id: id,
            first_name: format!("User{}", id),
            email: email.to_string(),
            is_you,
            ..User::default()
        }
    }

    #[test]
    fn test_load_users_missing_key() {
        let store = MemoryStore::new();
        assert!(load_users(&store).is_empty());
        assert!(try_load_users(&store).unwrap().is_empty());
    }

    #[test]
    fn test_load_users_null_and_corrupt() {
        let store = MemoryStore::new().with_item(KEY_USERS, "null");
        assert!(load_users(&store).is_empty());

        let store = MemoryStore::new().with_item(KEY_USERS, "[]]");
        assert!(try_load_users(&store).is_err());
        assert!(load_users(&store).is_empty());
    }

    #[test]
    fn test_user_json_shape() {
        let raw = r#"[{"userID":3,"firstName":"Anna","lastName":"Berg","email":"a@b.c","password":"plain","isYou":true,"contacts":[{"name":"Bob","avatarid":2}],"tasks":[]}]"#;
        let store = MemoryStore::new().with_item(KEY_USERS, raw);
        let users = load_users(&store);
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user_id, 3);
        assert!(users[0].is_you);
        assert_eq!(users[0].password.as_deref(), Some("plain"));
        assert_eq!(users[0].contacts[0].avatarid, Some(2));

        let value = serde_json::to_value(&users[0]).unwrap();
        assert_eq!(value["userID"], 3);
        assert_eq!(value["isYou"], true);
        assert!(value.get("password").is_none());
    }

    #[test]
    fn test_save_and_reload_users() {
        let mut store = MemoryStore::new();
        let users = vec![user(0, "a@x.io", false), user(1, "b@x.io", true)];
        save_users(&mut store, &users).unwrap();
        assert_eq!(load_users(&store), users);
    }

    #[test]
    fn test_set_current_user_single_flag() {
        let mut users = vec![
            user(0, "a@x.io", true),
            user(1, "b@x.io", true),
            user(2, "c@x.io", false),
        ];
        set_current_user(&mut users, 2).unwrap();
        assert_eq!(users.iter().filter(|u| u.is_you).count(), 1);
        assert_eq!(current_identity(&users), Identity::User(2));

        let mut duplicated = vec![user(0, "a@x.io", false), user(0, "b@x.io", true)];
        set_current_user(&mut duplicated, 0).unwrap();
        assert_eq!(duplicated.iter().filter(|u| u.is_you).count(), 1);
        assert!(duplicated[0].is_you);
    }

    #[test]
    fn test_new_user_id_saturates() {
        let users = vec![user(u64::MAX, "a@x.io", false)];
        assert_eq!(new_user(&users, "kim", "kim@x.io").user_id, u64::MAX);
    }

    #[test]
    fn test_set_current_user_unknown_id() {
        let mut users = vec![user(0, "a@x.io", true)];
        let err = set_current_user(&mut users, 9).unwrap_err();
        assert!(matches!(err, TaskdeskError::NotFound(_)));
        assert!(users[0].is_you);
    }

    #[test]
    fn test_current_identity_guest() {
        assert_eq!(current_identity(&[]), Identity::Guest);

        let mut users = vec![user(0, "a@x.io", true)];
        clear_current_user(&mut users);
        assert_eq!(current_identity(&users), Identity::Guest);
    }

    #[test]
    fn test_email_exists() {
        let users = vec![user(0, "a@x.io", false)];
        assert!(email_exists(&users, "a@x.io"));
        assert!(!email_exists(&users, "z@x.io"));
    }

    #[test]
    fn test_new_user() {
        let users = vec![user(0, "a@x.io", false), user(4, "b@x.io", false)];
        let created = new_user(&users, "  anna  berg ", "anna@x.io");
        assert_eq!(created.user_id, 5);
        assert_eq!(created.first_name, "Anna");
        assert_eq!(created.last_name.as_deref(), Some("Berg"));
        assert_eq!(created.initials.as_deref(), Some("AB"));
        assert!(!created.is_you);
        assert!(created.password.is_none());

        assert_eq!(new_user(&[], "kim", "kim@x.io").user_id, 0);
    }

    #[test]
    fn test_split_name_and_initials() {
        assert_eq!(split_name("kim"), ("Kim".to_string(), None));
        assert_eq!(split_name(""), (String::new(), None));
        assert_eq!(initials("kim"), "KI");
        assert_eq!(initials("anna berg"), "AB");
        assert_eq!(initials("a"), "A");
        assert_eq!(initials(""), "");
    }
}
