//! Shared world state for user role hierarchy BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskwarden::{
    access::Claims,
    error::PolicyError,
    user::{
        adapters::{hasher::BcryptPasswordHasher, jwt::JwtTokenAuthority, memory::InMemoryUserStore},
        domain::{UserId, Username},
        ports::{TokenVerifier, UserStore},
        services::{CredentialsRequest, UserPolicy},
    },
};
use tracing_subscriber::EnvFilter;

/// Policy type used by the BDD world.
pub type TestUserPolicy =
    UserPolicy<InMemoryUserStore, BcryptPasswordHasher, JwtTokenAuthority, DefaultClock>;

const TEST_COST: u32 = 4;
const SECRET: &[u8] = b"bdd-signing-secret";

/// Scenario world for role hierarchy behaviour tests.
pub struct HierarchyWorld {
    pub store: Arc<InMemoryUserStore>,
    pub hasher: Arc<BcryptPasswordHasher>,
    pub tokens: Arc<JwtTokenAuthority>,
    pub policy: TestUserPolicy,
    pub passwords: HashMap<String, String>,
    pub last_result: Option<Result<(), PolicyError>>,
}

impl HierarchyWorld {
    /// Creates a world with an empty user store.
    #[must_use]
    pub fn new() -> Self {
        drop(
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_test_writer()
                .try_init(),
        );

        let store = Arc::new(InMemoryUserStore::new());
        let hasher = Arc::new(BcryptPasswordHasher::new(TEST_COST));
        let tokens = Arc::new(JwtTokenAuthority::new(SECRET));
        let policy = UserPolicy::new(
            Arc::clone(&store),
            Arc::clone(&hasher),
            Arc::clone(&tokens),
            Arc::new(DefaultClock),
        );

        Self {
            store,
            hasher,
            tokens,
            policy,
            passwords: HashMap::new(),
            last_result: None,
        }
    }

    /// Signs `name` in and returns the claims carried by the issued token.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is unknown to the world or login fails.
    pub fn claims_for(&self, name: &str) -> Result<Claims, eyre::Report> {
        let password = self
            .passwords
            .get(name)
            .ok_or_else(|| eyre::eyre!("no password recorded for {name}"))?;
        let token = run_async(
            self.policy
                .login_user(CredentialsRequest::new(name, password.as_str())),
        )?;
        Ok(self.tokens.verify(&token)?)
    }

    /// Resolves an account name to its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if no account holds the name.
    pub fn id_of(&self, name: &str) -> Result<UserId, eyre::Report> {
        let username = Username::new(name)?;
        let user = run_async(self.store.find_by_username(&username))?
            .ok_or_else(|| eyre::eyre!("no account named {name}"))?;
        Ok(user.id())
    }
}

impl Default for HierarchyWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> HierarchyWorld {
    HierarchyWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
