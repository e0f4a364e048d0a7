//! Login, registration, guest login and logout
//!
//! Each operation receives the key-value store and the auth backend
//! explicitly; nothing here keeps state between calls. Backend failures are
//! returned before the store is touched, so a failed request leaves the
//! previous session in place.

use tracing::info;

use crate::api::AuthBackend;
use crate::error::{Result, TaskdeskError};
use crate::storage::session::{self, CurrentUser};
use crate::storage::users;
use crate::storage::KeyValueStore;

/// Registration form input
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub accepted_policy: bool,
}

impl SignupForm {
    /// Validate the form before anything is sent
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TaskdeskError::invalid_data("name must not be empty"));
        }
        if self.email.trim().is_empty() {
            return Err(TaskdeskError::invalid_data("email must not be empty"));
        }
        if self.password != self.password_confirm {
            return Err(TaskdeskError::PasswordMismatch);
        }
        if !self.accepted_policy {
            return Err(TaskdeskError::PolicyNotAccepted);
        }
        Ok(())
    }
}

/// Result of a successful registration
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterOutcome {
    /// Local user id when a new record was added to the registry
    pub local_user_id: Option<u64>,
    pub token: Option<String>,
}

/// Log in against the backend and persist the session
///
/// # Steps
///
/// 1. Reject empty credentials
/// 2. Call the backend (errors return here, store untouched)
/// 3. Flip `isYou` on the local user with the same email, if any; a
///    registry that does not parse is reported and left as is
/// 4. Save the flattened session object
/// 5. Remember or forget the email; drop any legacy stored password
pub fn login(
    store: &mut dyn KeyValueStore,
    backend: &dyn AuthBackend,
    email: &str,
    password: &str,
    remember: bool,
) -> Result<CurrentUser> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(TaskdeskError::invalid_data("email and password are required"));
    }

    let response = backend.login(email, password)?;
    let current = CurrentUser::from_login(response);

    // 先更新用户列表再写会话：列表写入失败时不会留下孤立的会话
    let mut registry = users::try_load_users(store)?;
    let local_id = users::find_by_email(&registry, &current.email)
        .or_else(|| users::find_by_email(&registry, email))
        .map(|u| u.user_id);
    if let Some(id) = local_id {
        users::set_current_user(&mut registry, id)?;
        users::save_users(store, &registry)?;
    }
    session::save_session(store, &current)?;

    if remember {
        session::remember_email(store, email)?;
    } else {
        session::forget_email(store)?;
    }
    session::purge_legacy_password(store)?;

    info!(email = %current.email, local_user = ?local_id, "logged in");
    Ok(current)
}

/// Register a new account and record it in the local registry
pub fn register(
    store: &mut dyn KeyValueStore,
    backend: &dyn AuthBackend,
    form: &SignupForm,
) -> Result<RegisterOutcome> {
    form.validate()?;

    let name = form.name.trim();
    let email = form.email.trim();
    let response = backend.register(name, email, &form.password)?;

    let mut registry = users::try_load_users(store)?;
    let local_user_id = if users::email_exists(&registry, email) {
        None
    } else {
        let user = users::new_user(&registry, name, email);
        let id = user.user_id;
        registry.push(user);
        users::save_users(store, &registry)?;
        Some(id)
    };

    info!(%email, ?local_user_id, "registered");
    Ok(RegisterOutcome {
        local_user_id,
        token: response.token,
    })
}

/// Continue as guest: nobody is the current user and there is no session
pub fn guest_login(store: &mut dyn KeyValueStore) -> Result<()> {
    release_current_user(store)?;
    info!("continuing as guest");
    Ok(())
}

/// Log out: clears the session object and the current-user flag
pub fn logout(store: &mut dyn KeyValueStore) -> Result<()> {
    release_current_user(store)?;
    info!("logged out");
    Ok(())
}

/// 会话总是先清除；用户列表无法解析时返回错误且不覆盖
fn release_current_user(store: &mut dyn KeyValueStore) -> Result<()> {
    session::clear_session(store)?;
    let mut registry = users::try_load_users(store)?;
    if registry.iter().any(|u| u.is_you) {
        users::clear_current_user(&mut registry);
        users::save_users(store, &registry)?;
    }
    Ok(())
}
