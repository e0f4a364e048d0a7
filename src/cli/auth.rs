//! login / register / guest / logout 子命令实现

use crate::api::ApiClient;
use crate::error::{Result, TaskdeskError};
use crate::operations::auth::{self, SignupForm};
use crate::storage::session;
use crate::summary::greeting;

use super::Workspace;

/// 执行登录
pub fn login(
    ws: &mut Workspace,
    email: Option<String>,
    password: Option<String>,
    remember: bool,
) -> Result<()> {
    let email = email
        .or_else(|| session::load_remembered_email(&ws.store))
        .ok_or_else(|| TaskdeskError::invalid_data("email is required"))?;
    let password = match password {
        Some(p) => p,
        None => rpassword::prompt_password(format!("Password for {}: ", email))?,
    };

    let client = ApiClient::new(&ws.config.api)?;
    let current = auth::login(&mut ws.store, &client, &email, &password, remember)?;
    println!("Logged in as {}", greeting::display_name(Some(&current)));
    Ok(())
}

/// 执行注册
pub fn register(ws: &mut Workspace, name: String, email: String, accepted_policy: bool) -> Result<()> {
    let password = rpassword::prompt_password("Password: ")?;
    let password_confirm = rpassword::prompt_password("Confirm password: ")?;
    let form = SignupForm {
        name,
        email,
        password,
        password_confirm,
        accepted_policy,
    };

    let client = ApiClient::new(&ws.config.api)?;
    let outcome = auth::register(&mut ws.store, &client, &form)?;
    if outcome.token.is_some() {
        tracing::debug!("backend issued a token on registration");
    }
    match outcome.local_user_id {
        Some(id) => println!("Registered successfully (local user #{})", id),
        None => println!("Registered successfully"),
    }
    println!("You can now log in with: taskdesk login {}", form.email.trim());
    Ok(())
}

/// 以访客身份继续
pub fn guest(ws: &mut Workspace) -> Result<()> {
    auth::guest_login(&mut ws.store)?;
    println!("Continuing as {}", greeting::GUEST_NAME);
    Ok(())
}

/// 退出登录
pub fn logout(ws: &mut Workspace) -> Result<()> {
    auth::logout(&mut ws.store)?;
    println!("Logged out");
    Ok(())
}
