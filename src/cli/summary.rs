//! summary / whoami 子命令实现

use chrono::{Local, Timelike};

use crate::error::Result;
use crate::storage::users::{self, Identity};
use crate::storage::{session, tasks};
use crate::summary::{greeting, Summary};

use super::Workspace;

/// 打印看板摘要
pub fn execute(ws: &Workspace, json: bool) -> Result<()> {
    let current = session::load_session(&ws.store);
    let tasks = tasks::tasks_for(current.as_ref(), &ws.store);
    let summary = Summary::build(current.as_ref(), &tasks, Local::now().hour());

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary);
    }
    Ok(())
}

/// 打印当前身份
pub fn whoami(ws: &Workspace) -> Result<()> {
    let current = session::load_session(&ws.store);
    let badge = greeting::header_badge(current.as_ref(), ws.config.header.style);
    let name = greeting::display_name(current.as_ref());

    match current.as_ref().map(|c| c.email.as_str()).filter(|e| !e.is_empty()) {
        Some(email) => println!("[{}] {} <{}>", badge, name, email),
        None => println!("[{}] {}", badge, name),
    }

    // 本地用户列表中的当前用户与会话相互独立
    if let Identity::User(id) = users::current_identity(&users::load_users(&ws.store)) {
        println!("Local user #{}", id);
    }
    Ok(())
}
