//! Policy layer for user accounts and authentication.
//!
//! [`UserPolicy`] enforces the role hierarchy through
//! [`evaluate_access`], keeps usernames unique, and hashes passwords before
//! anything reaches the store. Plaintext passwords never leave this module
//! except as input to the [`PasswordHasher`].

use crate::{
    access::{Action, Claims, DenyReason, Role, evaluate_access},
    config::DEFAULT_TOKEN_TTL_HOURS,
    error::{PolicyError, PolicyResult},
    patch::FieldPatch,
    user::{
        domain::{Password, PasswordHash, User, UserDomainError, UserId, UserPatch, Username},
        ports::{
            PasswordHasher, PasswordHasherError, TokenIssuer, TokenSubject, UserStore,
            UserStoreError,
        },
    },
};
use chrono::Duration;
use mockable::Clock;
use std::sync::Arc;

const INVALID_CREDENTIALS: &str = "invalid username or password";
const USERNAME_TAKEN: &str = "username already exists";
const ROLE_CHANGE_FORBIDDEN: &str = "only root can update role";

/// Request payload for an actor adding an account.
#[derive(Clone, PartialEq, Eq)]
pub struct AddUserRequest {
    username: String,
    password: String,
    role: String,
}

impl AddUserRequest {
    /// Creates a request for an account with `role`.
    ///
    /// A blank role falls back to `user`.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: role.into(),
        }
    }
}

impl std::fmt::Debug for AddUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddUserRequest")
            .field("username", &self.username)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Username and plaintext password, used for registration and login.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialsRequest {
    username: String,
    password: String,
}

impl CredentialsRequest {
    /// Creates a credentials payload.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Request payload for partially updating an account.
///
/// Fields left as `None` are not written. A supplied empty username or
/// password is rejected rather than ignored.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UpdateUserRequest {
    username: Option<String>,
    password: Option<String>,
    role: Option<String>,
}

impl UpdateUserRequest {
    /// Creates an empty update request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets a new plaintext password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets a new role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

impl std::fmt::Debug for UpdateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateUserRequest")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("role", &self.role)
            .finish()
    }
}

/// Account policy enforcing the `User < Admin < Root` hierarchy.
#[derive(Clone)]
pub struct UserPolicy<S, H, T, K>
where
    S: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
    K: Clock + Send + Sync,
{
    store: Arc<S>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<K>,
    token_ttl: Duration,
}

impl<S, H, T, K> UserPolicy<S, H, T, K>
where
    S: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
    K: Clock + Send + Sync,
{
    /// Creates a policy issuing tokens valid for 24 hours.
    #[must_use]
    pub fn new(store: Arc<S>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<K>) -> Self {
        Self {
            store,
            hasher,
            tokens,
            clock,
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        }
    }

    /// Overrides the lifetime of issued tokens.
    #[must_use]
    pub const fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    /// Creates an account on behalf of an authenticated actor.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` when the actor is a regular user, whatever role
    /// was requested, or when the hierarchy forbids creating an account with
    /// that role, `Validation` for a blank username or password or an unknown
    /// role, `Conflict` when the username is taken, `Internal` when
    /// hashing fails, and `Store` on persistence failure.
    pub async fn add_user(&self, request: AddUserRequest, claims: &Claims) -> PolicyResult<User> {
        if claims.role() == Role::User {
            return Err(DenyReason::UserCannotAdd.into());
        }
        let role = parse_role_or_default(&request.role)?;
        let candidate_id = UserId::new();
        evaluate_access(claims, candidate_id, role, Action::Add).into_result()?;

        let username = Username::new(request.username)?;
        let password = Password::new(request.password)?;
        self.create_account(candidate_id, username, &password, role)
            .await
    }

    /// Registers a regular account without any actor.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a blank username or password, `Conflict` when
    /// the username is taken, `Internal` when hashing fails, and `Store` on
    /// persistence failure.
    pub async fn register_user(&self, request: CredentialsRequest) -> PolicyResult<User> {
        let username = Username::new(request.username)?;
        let password = Password::new(request.password)?;
        self.create_account(UserId::new(), username, &password, Role::User)
            .await
    }

    /// Checks credentials and issues an access token.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no account holds the username, `Unauthorized`
    /// when the password does not match, `Internal` when hashing or token
    /// issuance fails, and `Store` on persistence failure. Both credential
    /// failures carry the same message.
    pub async fn login_user(&self, request: CredentialsRequest) -> PolicyResult<String> {
        let Ok(username) = Username::new(request.username) else {
            return Err(PolicyError::not_found(INVALID_CREDENTIALS));
        };
        let user = self
            .store
            .find_by_username(&username)
            .await?
            .ok_or_else(|| PolicyError::not_found(INVALID_CREDENTIALS))?;

        match self.hasher.verify(user.password_hash(), &request.password) {
            Ok(()) => {}
            Err(PasswordHasherError::Mismatch) => {
                return Err(PolicyError::unauthorized(INVALID_CREDENTIALS));
            }
            Err(err) => return Err(PolicyError::internal(err)),
        }

        let issued_at = self.clock.utc();
        self.tokens
            .issue(
                &TokenSubject::from(&user),
                issued_at,
                issued_at + self.token_ttl,
            )
            .map_err(PolicyError::internal)
    }

    /// Returns every account.
    ///
    /// # Errors
    ///
    /// Returns `Store` when the store read fails.
    pub async fn get_users(&self) -> PolicyResult<Vec<User>> {
        Ok(self.store.list_all().await?)
    }

    /// Returns the account with `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the account is absent or `Store` when the read
    /// fails.
    pub async fn get_user_by_id(&self, id: UserId) -> PolicyResult<User> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserStoreError::NotFound(id).into())
    }

    /// Writes the supplied fields of an account.
    ///
    /// Checks run in order: existence, hierarchy, role change, then field
    /// validation. Only root may set a role other than `user`, so a forbidden
    /// role change is reported before any username conflict and before the
    /// new password is hashed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Forbidden`, `Validation`, `Conflict`, `Internal`
    /// or `Store` according to the first failing check.
    pub async fn update_user(
        &self,
        id: UserId,
        request: UpdateUserRequest,
        claims: &Claims,
    ) -> PolicyResult<User> {
        let target = self.get_user_by_id(id).await?;
        evaluate_access(claims, target.id(), target.role(), Action::Update).into_result()?;

        let role = FieldPatch::from(request.role)
            .try_map(|raw| Role::try_from(raw.as_str()).map_err(UserDomainError::from))?;
        if role.as_set().is_some_and(|role| *role != Role::User) && claims.role() != Role::Root {
            return Err(PolicyError::forbidden(ROLE_CHANGE_FORBIDDEN));
        }

        let username = FieldPatch::from(request.username).try_map(Username::new)?;
        let password = FieldPatch::from(request.password).try_map(Password::new)?;

        if let Some(name) = username.as_set() {
            self.ensure_username_available(name, Some(target.id()))
                .await?;
        }
        let password_hash = password.try_map(|password| self.hash_password(&password))?;

        let patch = UserPatch {
            username,
            password_hash,
            role,
        };
        if patch.is_empty() {
            return Ok(target);
        }
        self.store.apply_patch(id, &patch).await?;
        self.get_user_by_id(id).await
    }

    /// Deletes an account.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the account is absent, `Forbidden` when the
    /// hierarchy forbids the deletion, and `Store` on persistence failure.
    pub async fn delete_user(&self, id: UserId, claims: &Claims) -> PolicyResult<()> {
        let target = self.get_user_by_id(id).await?;
        evaluate_access(claims, target.id(), target.role(), Action::Delete).into_result()?;
        Ok(self.store.delete(id).await?)
    }

    async fn create_account(
        &self,
        id: UserId,
        username: Username,
        password: &Password,
        role: Role,
    ) -> PolicyResult<User> {
        self.ensure_username_available(&username, None).await?;
        let password_hash = self.hash_password(password)?;
        let user = User::from_parts(id, username, password_hash, role);
        self.store.insert(&user).await?;
        Ok(user)
    }

    async fn ensure_username_available(
        &self,
        username: &Username,
        holder: Option<UserId>,
    ) -> PolicyResult<()> {
        match self.store.find_by_username(username).await? {
            Some(existing) if Some(existing.id()) != holder => {
                Err(PolicyError::conflict(USERNAME_TAKEN))
            }
            _ => Ok(()),
        }
    }

    fn hash_password(&self, password: &Password) -> PolicyResult<PasswordHash> {
        self.hasher
            .hash(password.expose())
            .map_err(PolicyError::internal)
    }
}

fn parse_role_or_default(raw: &str) -> Result<Role, UserDomainError> {
    if raw.trim().is_empty() {
        return Ok(Role::User);
    }
    Ok(Role::try_from(raw)?)
}

impl From<UserDomainError> for PolicyError {
    fn from(err: UserDomainError) -> Self {
        Self::validation(err.to_string()).with_source(err)
    }
}

impl From<UserStoreError> for PolicyError {
    fn from(err: UserStoreError) -> Self {
        match err {
            UserStoreError::NotFound(_) => Self::not_found("user not found").with_source(err),
            UserStoreError::DuplicateUser(_) | UserStoreError::DuplicateUsername(_) => {
                Self::conflict(USERNAME_TAKEN).with_source(err)
            }
            UserStoreError::Persistence(_) => Self::store(err),
        }
    }
}
