//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskwarden::{
    access::Claims,
    config::AuthConfig,
    error::PolicyError,
    task::{adapters::memory::InMemoryTaskStore, services::TaskPolicy},
    user::{
        adapters::{
            hasher::BcryptPasswordHasher,
            jwt::{JwtTokenAuthority, bearer_token},
            memory::InMemoryUserStore,
        },
        ports::TokenVerifier,
        services::{CredentialsRequest, RootBootstrap, UserPolicy, bootstrap_root_user},
    },
};

/// User policy wired to in-memory and local adapters.
pub type TestUserPolicy =
    UserPolicy<InMemoryUserStore, BcryptPasswordHasher, JwtTokenAuthority, DefaultClock>;

/// Root account credentials used by every deployment.
pub const ROOT_USERNAME: &str = "root";
/// Root account password used by every deployment.
pub const ROOT_PASSWORD: &str = "toor";

/// Policies and adapters for one deployment, built from configuration.
pub struct Deployment {
    pub config: AuthConfig,
    pub users: Arc<InMemoryUserStore>,
    pub user_policy: TestUserPolicy,
    pub task_policy: TaskPolicy<InMemoryTaskStore>,
    pub tokens: Arc<JwtTokenAuthority>,
}

impl Deployment {
    /// Builds a deployment and creates the root account.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the root bootstrap fails.
    pub async fn start() -> Result<Self, eyre::Report> {
        let config = AuthConfig::from_lookup(|name| match name {
            "JWT_KEY" => Some("integration-secret".to_owned()),
            "BCRYPT_COST" => Some("4".to_owned()),
            "ROOT_USERNAME" => Some(ROOT_USERNAME.to_owned()),
            "ROOT_PASSWORD" => Some(ROOT_PASSWORD.to_owned()),
            _ => None,
        })?;
        let users = Arc::new(InMemoryUserStore::new());
        let hasher = Arc::new(BcryptPasswordHasher::from_config(&config));
        let tokens = Arc::new(JwtTokenAuthority::from_config(&config));

        let root = config
            .root_credentials()
            .ok_or_else(|| eyre::eyre!("root credentials missing from config"))?;
        let outcome = bootstrap_root_user(users.as_ref(), hasher.as_ref(), root).await?;
        eyre::ensure!(
            matches!(outcome, RootBootstrap::Created(_)),
            "fresh deployment should create root"
        );

        let user_policy = UserPolicy::new(
            Arc::clone(&users),
            hasher,
            Arc::clone(&tokens),
            Arc::new(DefaultClock),
        )
        .with_token_ttl(config.token_ttl());

        Ok(Self {
            config,
            users,
            user_policy,
            task_policy: TaskPolicy::new(Arc::new(InMemoryTaskStore::new())),
            tokens,
        })
    }

    /// Logs in and rebuilds the claims a controller would see for the
    /// returned token.
    ///
    /// # Errors
    ///
    /// Returns the login error, or a report if the token fails verification.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<Claims, eyre::Report> {
        let token = self
            .user_policy
            .login_user(CredentialsRequest::new(username, password))
            .await?;
        let header = format!("Bearer {token}");
        let claims = self.tokens.verify(bearer_token(&header)?)?;
        Ok(claims)
    }

    /// Registers a regular account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns an error if registration or login fails.
    pub async fn register_and_sign_in(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Claims, eyre::Report> {
        self.user_policy
            .register_user(CredentialsRequest::new(username, password))
            .await?;
        self.sign_in(username, password).await
    }
}

/// Provides a freshly bootstrapped deployment.
#[fixture]
pub async fn deployment() -> Deployment {
    Deployment::start()
        .await
        .expect("deployment should start")
}

/// Extracts the policy error from a failed operation.
///
/// # Errors
///
/// Returns a report if the operation unexpectedly succeeded.
pub fn expect_policy_error<T: std::fmt::Debug>(
    result: Result<T, PolicyError>,
) -> Result<PolicyError, eyre::Report> {
    match result {
        Ok(value) => Err(eyre::eyre!("expected a policy error, got {value:?}")),
        Err(err) => Ok(err),
    }
}
