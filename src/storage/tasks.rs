use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::session::CurrentUser;
use super::{load_json, KeyValueStore, KEY_TASKS};
use crate::error::Result;

/// 看板列（任务所处的工作阶段）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardColumn {
    Todo,
    Progress,
    Await,
    Done,
}

impl BoardColumn {
    /// 解析存储中的列名，同时接受 "todo" 与 "todo-column" 两种写法
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw.strip_suffix("-column").unwrap_or(raw) {
            "todo" => Some(Self::Todo),
            "progress" => Some(Self::Progress),
            "await" => Some(Self::Await),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// 任务优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    Urgent,
}

impl Priority {
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }
}

/// 任务内容
///
/// 列名和优先级保留原始字符串，无法识别的值在统计时被忽略；
/// 其余字段（标题、描述、子任务等）原样保留。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskContent {
    #[serde(default)]
    pub board_column: String,
    #[serde(default)]
    pub priority: String,
    /// ISO-8601 日期或 RFC 3339 时间
    #[serde(default)]
    pub date: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TaskContent {
    pub fn column(&self) -> Option<BoardColumn> {
        BoardColumn::from_wire(&self.board_column)
    }

    pub fn priority(&self) -> Option<Priority> {
        Priority::from_wire(&self.priority)
    }
}

/// 任务数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub content: TaskContent,
}

/// 加载访客任务列表（解析失败返回错误）
pub fn try_load_guest_tasks(store: &dyn KeyValueStore) -> Result<Vec<Task>> {
    Ok(load_json(store, KEY_TASKS)?.unwrap_or_default())
}

/// 加载访客任务列表，解析失败时记录警告并返回空列表
pub fn load_guest_tasks(store: &dyn KeyValueStore) -> Vec<Task> {
    try_load_guest_tasks(store).unwrap_or_else(|e| {
        warn!(key = KEY_TASKS, error = %e, "failed to load guest tasks");
        Vec::new()
    })
}

/// 获取用于统计的任务：会话中带有任务则用会话的，否则用访客列表
pub fn tasks_for(session: Option<&CurrentUser>, store: &dyn KeyValueStore) -> Vec<Task> {
    match session.and_then(|s| s.tasks.as_ref()) {
        Some(tasks) => tasks.clone(),
        None => load_guest_tasks(store),
    }
}
