//! Auth API client
//!
//! Blocking client for the task board backend's login and registration
//! endpoints. Requests are sent once: no retry, and no timeout unless one
//! is configured.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TaskdeskError};
use crate::storage::config::ApiConfig;

/// `POST /api/login/` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// `POST /api/register/` response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Authentication backend seam used by the auth operations
pub trait AuthBackend {
    fn login(&self, email: &str, password: &str) -> Result<LoginResponse>;
    fn register(&self, name: &str, email: &str, password: &str) -> Result<RegisterResponse>;
}

/// HTTP implementation of [`AuthBackend`]
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
    csrf_token: Option<String>,
}

impl ApiClient {
    /// Build a client from the `[api]` config section
    ///
    /// Fails with a config error if `base_url` is not an http(s) URL.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(TaskdeskError::config(format!(
                "api.base_url must start with http:// or https://, got {:?}",
                config.base_url
            )));
        }

        let mut builder = ureq::AgentBuilder::new();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            agent: builder.build(),
            base_url,
            csrf_token: config.csrf_token.clone().filter(|t| !t.is_empty()),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}/", self.base_url, path)
    }

    fn post_json<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.endpoint(path);
        debug!(%url, "POST");

        let mut request = self.agent.post(&url).set("Accept", "application/json");
        if let Some(token) = &self.csrf_token {
            request = request.set("X-CSRFToken", token);
        }

        match request.send_json(body) {
            Ok(response) => response
                .into_json()
                .map_err(|e| TaskdeskError::http(format!("invalid response from {}: {}", url, e))),
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(TaskdeskError::Api { status, body })
            }
            Err(e) => Err(TaskdeskError::http(e.to_string())),
        }
    }
}

impl AuthBackend for ApiClient {
    fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        self.post_json("login", &LoginRequest { email, password })
    }

    fn register(&self, name: &str, email: &str, password: &str) -> Result<RegisterResponse> {
        self.post_json(
            "register",
            &RegisterRequest {
                name,
                email,
                password,
            },
        )
    }
}
