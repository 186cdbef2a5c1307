use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{LoginCodeId, SessionId, UserId};
use crate::user::User;

/// A login session. Only the hash of the bearer token is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub user_id: UserId,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: UserId, token_hash: String, ttl_days: u32) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            user_id,
            token_hash,
            created_at: now,
            expires_at: now + Duration::days(i64::from(ttl_days)),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    /// Where the client wants to land after login.
    #[serde(default)]
    pub redirect_to: Option<String>,
}

/// A pending emailed login code. Only the hash of the code is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCode {
    pub id: LoginCodeId,
    pub email: String,
    pub full_name: String,
    pub redirect_to: Option<String>,
    pub code_hash: String,
    /// Failed verification attempts so far.
    pub attempts: u32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl LoginCode {
    pub fn new(request: &LoginRequest, code_hash: String, ttl_minutes: u32) -> Self {
        let now = Utc::now();
        Self {
            id: LoginCodeId::new(),
            email: request.email.clone(),
            full_name: request.full_name.clone(),
            redirect_to: request.redirect_to.clone(),
            code_hash,
            attempts: 0,
            created_at: now,
            expires_at: now + Duration::minutes(i64::from(ttl_minutes)),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Acknowledges that a login code was mailed. Carries no credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginChallenge {
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyLoginRequest {
    pub email: String,
    pub code: String,
}

/// Returned once after a login code is verified. The raw token is never stored.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
    pub redirect_to: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expiry() {
        let session = Session::new(UserId::new(), "abc".into(), 30);
        assert!(!session.is_expired(Utc::now()));
        assert!(session.is_expired(session.expires_at));
        assert!(session.is_expired(Utc::now() + Duration::days(31)));
    }

    #[test]
    fn test_login_code_carries_request_context() {
        let request = LoginRequest {
            email: "asha@example.com".into(),
            full_name: "Asha".into(),
            redirect_to: Some("/request-service".into()),
        };
        let code = LoginCode::new(&request, "hash".into(), 15);
        assert_eq!(code.email, "asha@example.com");
        assert_eq!(code.redirect_to.as_deref(), Some("/request-service"));
        assert_eq!(code.attempts, 0);
        assert!(!code.is_expired(Utc::now()));
        assert!(code.is_expired(Utc::now() + Duration::minutes(16)));
    }
}
