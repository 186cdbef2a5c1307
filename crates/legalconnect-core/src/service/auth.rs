//! Email login, sessions and self-service account updates.
//!
//! Login is two steps. `request_code` mails a six digit one-time code to
//! the address; `verify_code` exchanges it for a bearer token. Only hashes
//! of codes and tokens are stored. Bootstrap admin promotion happens only
//! after a code is verified.

use chrono::Utc;
use uuid::Uuid;

use legalconnect_types::config::AuthConfig;
use legalconnect_types::error::MarketplaceError;
use legalconnect_types::session::{
    LoginChallenge, LoginCode, LoginRequest, LoginResponse, Session, VerifyLoginRequest,
};
use legalconnect_types::user::{Role, UpdateMyUserData, User, UserType, normalize_email};

use crate::integration::email::EmailSender;
use crate::integration::hash::TokenHasher;
use crate::repository::login_code::LoginCodeRepository;
use crate::repository::session::SessionRepository;
use crate::repository::user::UserRepository;
use crate::service::notify;

/// Wrong guesses allowed before a code is burned.
pub const MAX_CODE_ATTEMPTS: u32 = 5;

pub struct AuthService<U, S, C, H, E>
where
    U: UserRepository,
    S: SessionRepository,
    C: LoginCodeRepository,
    H: TokenHasher,
    E: EmailSender,
{
    users: U,
    sessions: S,
    codes: C,
    hasher: H,
    mailer: E,
    config: AuthConfig,
}

impl<U, S, C, H, E> AuthService<U, S, C, H, E>
where
    U: UserRepository,
    S: SessionRepository,
    C: LoginCodeRepository,
    H: TokenHasher,
    E: EmailSender,
{
    pub fn new(users: U, sessions: S, codes: C, hasher: H, mailer: E, config: AuthConfig) -> Self {
        Self {
            users,
            sessions,
            codes,
            hasher,
            mailer,
            config,
        }
    }

    /// Mail a fresh login code, replacing any pending one for the address.
    pub async fn request_code(
        &self,
        mut request: LoginRequest,
    ) -> Result<LoginChallenge, MarketplaceError> {
        request.email = validated_email(&request.email)?;

        let code = generate_code();
        self.codes.delete_for_email(&request.email).await?;
        let pending = LoginCode::new(
            &request,
            self.code_hash(&request.email, &code),
            self.config.login_code_ttl_minutes,
        );
        self.codes.create(&pending).await?;

        let message = notify::login_code(&request.email, &code, self.config.login_code_ttl_minutes);
        if let Err(e) = self.mailer.send(&message).await {
            self.codes.delete_for_email(&request.email).await?;
            tracing::warn!(error = %e, "failed to send login code");
            return Err(MarketplaceError::Integration(e.to_string()));
        }
        tracing::info!(code_id = %pending.id, "login code sent");

        Ok(LoginChallenge {
            email: pending.email,
            expires_at: pending.expires_at,
        })
    }

    /// Exchange a mailed code for a session.
    ///
    /// New accounts are customers. Emails listed in `auth.admin_emails` are
    /// promoted to admin here, once ownership of the address is proven.
    pub async fn verify_code(
        &self,
        request: VerifyLoginRequest,
    ) -> Result<LoginResponse, MarketplaceError> {
        let email = validated_email(&request.email)?;
        let rejected = || MarketplaceError::Unauthorized("invalid or expired login code".into());

        let mut pending = self.codes.find_by_email(&email).await?.ok_or_else(rejected)?;
        if pending.is_expired(Utc::now()) || pending.attempts >= MAX_CODE_ATTEMPTS {
            self.codes.delete_for_email(&email).await?;
            return Err(rejected());
        }
        if pending.code_hash != self.code_hash(&email, request.code.trim()) {
            pending.attempts = pending.attempts.saturating_add(1);
            self.codes.update(&pending).await?;
            tracing::warn!(code_id = %pending.id, attempts = pending.attempts, "login code mismatch");
            return Err(rejected());
        }
        self.codes.delete_for_email(&email).await?;

        let mut user = match self.users.get_by_email(&email).await? {
            Some(user) => user,
            None => {
                let full_name = match pending.full_name.trim() {
                    "" => email.split('@').next().unwrap_or_default().to_string(),
                    name => name.to_string(),
                };
                let user = self.users.create(&User::new_customer(&email, &full_name)).await?;
                tracing::info!(user_id = %user.id, "created customer account");
                user
            }
        };

        if self.config.is_admin_email(&user.email) && !user.is_admin() {
            user.role = Role::Admin;
            user.user_type = UserType::Admin;
            user.updated_at = Utc::now();
            user = self.users.update(&user).await?;
            tracing::info!(user_id = %user.id, "promoted bootstrap admin");
        }

        let token = generate_token();
        let session = Session::new(
            user.id,
            self.hasher.hash(&token),
            self.config.session_ttl_days,
        );
        self.sessions.create(&session).await?;

        let redirect_to = pending
            .redirect_to
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| user.dashboard_path().to_string());

        Ok(LoginResponse {
            token,
            user,
            redirect_to,
            expires_at: session.expires_at,
        })
    }

    fn code_hash(&self, email: &str, code: &str) -> String {
        self.hasher.hash(&format!("{email}:{code}"))
    }

    /// Resolve a bearer token to its user.
    pub async fn me(&self, token: &str) -> Result<User, MarketplaceError> {
        let session = self
            .sessions
            .find_by_token_hash(&self.hasher.hash(token))
            .await?
            .ok_or_else(|| MarketplaceError::Unauthorized("invalid session".into()))?;

        if session.is_expired(Utc::now()) {
            self.sessions.delete(&session.id).await?;
            return Err(MarketplaceError::Unauthorized("session expired".into()));
        }

        self.users
            .get_by_id(&session.user_id)
            .await?
            .ok_or_else(|| MarketplaceError::Unauthorized("user no longer exists".into()))
    }

    /// End the session for `token`. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) -> Result<(), MarketplaceError> {
        if let Some(session) = self
            .sessions
            .find_by_token_hash(&self.hasher.hash(token))
            .await?
        {
            self.sessions.delete(&session.id).await?;
        }
        Ok(())
    }

    /// Update the caller's own profile fields.
    pub async fn update_my_user_data(
        &self,
        user: &User,
        update: UpdateMyUserData,
    ) -> Result<User, MarketplaceError> {
        let mut user = user.clone();

        if let Some(user_type) = update.user_type {
            if user_type == UserType::Admin {
                return Err(MarketplaceError::Forbidden(
                    "the admin user type cannot be self-assigned".into(),
                ));
            }
            user.user_type = user_type;
        }
        if let Some(full_name) = update.full_name {
            let trimmed = full_name.trim();
            if trimmed.is_empty() {
                return Err(MarketplaceError::invalid("full_name", "Full name is required"));
            }
            user.full_name = trimmed.to_string();
        }
        if let Some(phone) = update.phone_number {
            let trimmed = phone.trim();
            user.phone_number = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }

        user.updated_at = Utc::now();
        Ok(self.users.update(&user).await?)
    }
}

fn validated_email(raw: &str) -> Result<String, MarketplaceError> {
    let email = normalize_email(raw);
    if email.is_empty() {
        return Err(MarketplaceError::invalid("email", "Email is required"));
    }
    if !email.contains('@') {
        return Err(MarketplaceError::invalid("email", "Enter a valid email address"));
    }
    Ok(email)
}

fn generate_code() -> String {
    format!("{:06}", Uuid::new_v4().as_u128() % 1_000_000)
}

fn generate_token() -> String {
    format!(
        "lc_{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}
