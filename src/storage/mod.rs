//! 持久化键值存储
//!
//! 每个键对应 `<data_dir>/storage/<key>.json` 一个文件，值是原样保存的 JSON 文本。

pub mod config;
pub mod session;
pub mod tasks;
pub mod users;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, TaskdeskError};

/// 当前登录会话
pub const KEY_CURRENT_USER: &str = "currentUser";
/// 本地用户列表
pub const KEY_USERS: &str = "users";
/// 访客任务列表
pub const KEY_TASKS: &str = "tasks";
/// "记住我" 保存的邮箱
pub const KEY_EMAIL: &str = "email";
/// 旧版明文密码，只删除不写入
pub const KEY_PASSWORD: &str = "password";

/// 获取默认数据目录 ~/.taskdesk/
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".taskdesk"))
        .ok_or_else(|| TaskdeskError::config("Cannot find home directory"))
}

/// 同步键值存储
pub trait KeyValueStore {
    /// 读取键值，不存在返回 None
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    /// 写入键值（覆盖）
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    /// 删除键值，不存在时不报错
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// 基于文件的键值存储
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// 在 `<data_dir>/storage/` 下打开存储
    pub fn open(data_dir: &Path) -> Self {
        Self {
            root: data_dir.join("storage"),
        }
    }

    fn item_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(TaskdeskError::invalid_data(format!(
                "invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key)?;
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(&path, value)?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let path = self.item_path(key)?;
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// 读取并反序列化 JSON 值
///
/// 键不存在或值为 `null` 时返回 `Ok(None)`，解析失败返回 `JsonParse`。
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get_item(key)? {
        Some(raw) => Ok(serde_json::from_str::<Option<T>>(&raw)?),
        None => Ok(None),
    }
}

/// 序列化后写入 JSON 值
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let content = serde_json::to_string(value)?;
    store.set_item(key, &content)
}

#[cfg(test)]
pub mod memory {
    use std::collections::HashMap;

    use super::KeyValueStore;
    use crate::error::{Result, TaskdeskError};

    /// 测试用内存存储
    #[derive(Debug, Default)]
    pub struct MemoryStore {
        items: HashMap<String, String>,
        failing_key: Option<String>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_item(mut self, key: &str, value: &str) -> Self {
            self.items.insert(key.to_string(), value.to_string());
            self
        }

        /// 之后对该键的写入全部失败
        pub fn failing_writes(mut self, key: &str) -> Self {
            self.failing_key = Some(key.to_string());
            self
        }

        pub fn contains(&self, key: &str) -> bool {
            self.items.contains_key(key)
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get_item(&self, key: &str) -> Result<Option<String>> {
            Ok(self.items.get(key).cloned())
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
            if self.failing_key.as_deref() == Some(key) {
                return Err(TaskdeskError::Io(std::io::Error::other("write refused")));
            }
            self.items.insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove_item(&mut self, key: &str) -> Result<()> {
            self.items.remove(key);
            Ok(())
        }
    }
}
