//! Application state wiring all services together.
//!
//! Services are generic over repository and integration traits; AppState
//! pins them to the SQLite repositories and the configured gateways.

use std::path::PathBuf;
use std::sync::Arc;

use legalconnect_core::integration::email::BoxEmailSender;
use legalconnect_core::integration::llm::{BoxLlmProvider, LlmProvider};
use legalconnect_core::service::admin::AdminService;
use legalconnect_core::service::auth::AuthService;
use legalconnect_core::service::chat::ChatService;
use legalconnect_core::service::directory::DirectoryService;
use legalconnect_core::service::onboarding::OnboardingService;
use legalconnect_core::service::provider::ProviderService;
use legalconnect_core::service::request::RequestService;
use legalconnect_core::service::review::ReviewService;
use legalconnect_core::service::upload::UploadService;
use legalconnect_infra::config::{ensure_data_dir, load_config, resolve_data_dir, upload_dir};
use legalconnect_infra::email::email_sender_from_env;
use legalconnect_infra::hash::Sha256TokenHasher;
use legalconnect_infra::llm::provider_from_env;
use legalconnect_infra::sqlite::audit::SqliteAuditLogRepository;
use legalconnect_infra::sqlite::catalog::SqliteCatalogRepository;
use legalconnect_infra::sqlite::login_code::SqliteLoginCodeRepository;
use legalconnect_infra::sqlite::pool::{DatabasePool, database_url};
use legalconnect_infra::sqlite::provider::SqliteProviderRepository;
use legalconnect_infra::sqlite::review::SqliteReviewRepository;
use legalconnect_infra::sqlite::service_request::SqliteServiceRequestRepository;
use legalconnect_infra::sqlite::session::SqliteSessionRepository;
use legalconnect_infra::sqlite::user::SqliteUserRepository;
use legalconnect_infra::storage::LocalFileStore;
use legalconnect_types::config::AppConfig;

pub type ConcreteAuthService = AuthService<
    SqliteUserRepository,
    SqliteSessionRepository,
    SqliteLoginCodeRepository,
    Sha256TokenHasher,
    BoxEmailSender,
>;

pub type ConcreteDirectoryService = DirectoryService<SqliteProviderRepository, SqliteReviewRepository>;

pub type ConcreteOnboardingService = OnboardingService<SqliteUserRepository, SqliteProviderRepository>;

pub type ConcreteProviderService = ProviderService<
    SqliteProviderRepository,
    SqliteServiceRequestRepository,
    SqliteReviewRepository,
>;

pub type ConcreteRequestService = RequestService<
    SqliteUserRepository,
    SqliteProviderRepository,
    SqliteServiceRequestRepository,
    SqliteReviewRepository,
    BoxEmailSender,
>;

pub type ConcreteReviewService = ReviewService<
    SqliteProviderRepository,
    SqliteServiceRequestRepository,
    SqliteReviewRepository,
>;

pub type ConcreteAdminService = AdminService<
    SqliteUserRepository,
    SqliteProviderRepository,
    SqliteServiceRequestRepository,
    SqliteReviewRepository,
    SqliteAuditLogRepository,
    SqliteCatalogRepository,
    BoxEmailSender,
>;

pub type ConcreteChatService = ChatService<BoxLlmProvider>;

pub type ConcreteUploadService = UploadService<LocalFileStore>;

/// Shared state for CLI commands and HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<ConcreteAuthService>,
    pub directory_service: Arc<ConcreteDirectoryService>,
    pub onboarding_service: Arc<ConcreteOnboardingService>,
    pub provider_service: Arc<ConcreteProviderService>,
    pub request_service: Arc<ConcreteRequestService>,
    pub review_service: Arc<ConcreteReviewService>,
    pub admin_service: Arc<ConcreteAdminService>,
    pub chat_service: Arc<ConcreteChatService>,
    pub upload_service: Arc<ConcreteUploadService>,
    pub users: SqliteUserRepository,
    pub config: Arc<AppConfig>,
    pub data_dir: PathBuf,
    pub upload_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Resolve the data directory, load `config.toml` and wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        ensure_data_dir(&data_dir).await?;
        let config = load_config(&data_dir).await;
        Self::build(data_dir, config).await
    }

    /// Wire services with the email and LLM gateways chosen by `config`.
    pub async fn build(data_dir: PathBuf, config: AppConfig) -> anyhow::Result<Self> {
        let mailer = email_sender_from_env(&config.email);
        let llm = provider_from_env(&config.llm);
        Self::build_with(data_dir, config, mailer, llm).await
    }

    /// Wire services around explicit gateways.
    pub async fn build_with(
        data_dir: PathBuf,
        config: AppConfig,
        mailer: BoxEmailSender,
        llm: BoxLlmProvider,
    ) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;

        let users = SqliteUserRepository::new(db_pool.clone());
        let sessions = SqliteSessionRepository::new(db_pool.clone());
        let login_codes = SqliteLoginCodeRepository::new(db_pool.clone());
        let providers = SqliteProviderRepository::new(db_pool.clone());
        let requests = SqliteServiceRequestRepository::new(db_pool.clone());
        let reviews = SqliteReviewRepository::new(db_pool.clone());
        let audit = SqliteAuditLogRepository::new(db_pool.clone());
        let catalog = SqliteCatalogRepository::new(db_pool.clone());

        tracing::debug!(llm = %llm.name(), "language model selected");

        let upload_dir = upload_dir(&config, &data_dir);
        let file_store = LocalFileStore::new(upload_dir.clone(), &config.uploads.public_base_url);

        let auth_service = AuthService::new(
            users.clone(),
            sessions,
            login_codes,
            Sha256TokenHasher::new(),
            mailer.clone(),
            config.auth.clone(),
        );
        let directory_service = DirectoryService::new(providers.clone(), reviews.clone());
        let onboarding_service = OnboardingService::new(users.clone(), providers.clone());
        let provider_service =
            ProviderService::new(providers.clone(), requests.clone(), reviews.clone());
        let request_service = RequestService::new(
            users.clone(),
            providers.clone(),
            requests.clone(),
            reviews.clone(),
            mailer.clone(),
        );
        let review_service = ReviewService::new(providers.clone(), requests.clone(), reviews.clone());
        let admin_service = AdminService::new(
            users.clone(),
            providers,
            requests,
            reviews,
            audit,
            catalog,
            mailer,
        );
        let chat_service = ChatService::new(llm);
        let upload_service = UploadService::new(file_store, config.uploads.max_bytes);

        Ok(Self {
            auth_service: Arc::new(auth_service),
            directory_service: Arc::new(directory_service),
            onboarding_service: Arc::new(onboarding_service),
            provider_service: Arc::new(provider_service),
            request_service: Arc::new(request_service),
            review_service: Arc::new(review_service),
            admin_service: Arc::new(admin_service),
            chat_service: Arc::new(chat_service),
            upload_service: Arc::new(upload_service),
            users,
            config: Arc::new(config),
            data_dir,
            upload_dir,
            db_pool,
        })
    }
}
