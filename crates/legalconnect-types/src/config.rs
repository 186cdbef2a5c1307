//! Application configuration types.
//!
//! `AppConfig` mirrors `config.toml` in the data directory. Every section and
//! field has a default, so an empty or partial file is valid. Secrets are never
//! stored here; sections name the environment variable that holds them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Emails promoted to admin on login.
    #[serde(default)]
    pub admin_emails: Vec<String>,
    #[serde(default = "default_session_ttl_days")]
    pub session_ttl_days: u32,
    /// How long an emailed login code stays valid.
    #[serde(default = "default_login_code_ttl_minutes")]
    pub login_code_ttl_minutes: u32,
}

fn default_session_ttl_days() -> u32 {
    30
}

fn default_login_code_ttl_minutes() -> u32 {
    15
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_emails: Vec::new(),
            session_ttl_days: default_session_ttl_days(),
            login_code_ttl_minutes: default_login_code_ttl_minutes(),
        }
    }
}

impl AuthConfig {
    pub fn is_admin_email(&self, email: &str) -> bool {
        let email = email.trim();
        self.admin_emails
            .iter()
            .any(|admin| admin.trim().eq_ignore_ascii_case(email))
    }
}

/// Which language model backend answers chat questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmBackend {
    Anthropic,
    /// Every chat question gets the fallback reply.
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_backend")]
    pub provider: LlmBackend,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_llm_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_llm_max_tokens")]
    pub max_tokens: u32,
}

fn default_llm_backend() -> LlmBackend {
    LlmBackend::Anthropic
}

fn default_llm_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_llm_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_llm_api_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

fn default_llm_max_tokens() -> u32 {
    2048
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_llm_backend(),
            model: default_llm_model(),
            base_url: default_llm_base_url(),
            api_key_env: default_llm_api_key_env(),
            max_tokens: default_llm_max_tokens(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// JSON endpoint accepting `{from, to, subject, html}`. Unset means
    /// emails are only logged.
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_email_from")]
    pub from: String,
    #[serde(default = "default_email_api_key_env")]
    pub api_key_env: String,
}

fn default_email_from() -> String {
    "LegalConnect <no-reply@legalconnect.in>".to_string()
}

fn default_email_api_key_env() -> String {
    "LEGALCONNECT_EMAIL_API_KEY".to_string()
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            from: default_email_from(),
            api_key_env: default_email_api_key_env(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Storage directory. Relative paths resolve against the data directory.
    #[serde(default = "default_upload_dir")]
    pub dir: String,
    /// Prefix for returned file URLs.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_public_base_url() -> String {
    "http://127.0.0.1:3000/files".to_string()
}

fn default_max_bytes() -> u64 {
    10 * 1024 * 1024
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            public_base_url: default_public_base_url(),
            max_bytes: default_max_bytes(),
        }
    }
}
