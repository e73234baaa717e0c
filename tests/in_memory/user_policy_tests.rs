//! In-memory integration tests for account management and authentication.

use super::helpers::{Deployment, ROOT_PASSWORD, ROOT_USERNAME, deployment, expect_policy_error};
use chrono::Duration;
use rstest::rstest;
use taskwarden::{
    access::Role,
    error::ErrorKind,
    user::{
        adapters::hasher::BcryptPasswordHasher,
        services::{
            AddUserRequest, CredentialsRequest, RootBootstrap, UpdateUserRequest,
            bootstrap_root_user,
        },
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deployment_reflects_configuration(
    #[future(awt)] deployment: Deployment,
) -> Result<(), eyre::Report> {
    eyre::ensure!(
        deployment.config.token_ttl() == Duration::hours(24),
        "default token lifetime should be a day"
    );
    let claims = deployment.sign_in(ROOT_USERNAME, ROOT_PASSWORD).await?;
    eyre::ensure!(claims.role() == Role::Root, "root signs in as root");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bootstrap_is_idempotent(#[future(awt)] deployment: Deployment) -> Result<(), eyre::Report> {
    let root = deployment
        .config
        .root_credentials()
        .ok_or_else(|| eyre::eyre!("root credentials missing"))?;
    let hasher = BcryptPasswordHasher::from_config(&deployment.config);

    let outcome = bootstrap_root_user(deployment.users.as_ref(), &hasher, root).await?;

    eyre::ensure!(
        matches!(outcome, RootBootstrap::AlreadyPresent(_)),
        "second bootstrap should find the existing root, got {outcome:?}"
    );
    eyre::ensure!(
        deployment.user_policy.get_users().await?.len() == 1,
        "no extra account should be created"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn root_delegates_to_admin_who_manages_users(
    #[future(awt)] deployment: Deployment,
) -> Result<(), eyre::Report> {
    let root = deployment.sign_in(ROOT_USERNAME, ROOT_PASSWORD).await?;
    deployment
        .user_policy
        .add_user(AddUserRequest::new("ops", "ops-pw", "admin"), &root)
        .await?;
    let admin = deployment.sign_in("ops", "ops-pw").await?;
    eyre::ensure!(admin.role() == Role::Admin, "new admin signs in as admin");

    let member = deployment
        .user_policy
        .add_user(AddUserRequest::new("dana", "dana-pw", "user"), &admin)
        .await?;
    let renamed = deployment
        .user_policy
        .update_user(
            member.id(),
            UpdateUserRequest::new().with_username("dana.s"),
            &admin,
        )
        .await?;
    eyre::ensure!(renamed.username().as_str() == "dana.s", "rename applied");

    deployment.user_policy.delete_user(member.id(), &admin).await?;
    let err = expect_policy_error(deployment.user_policy.get_user_by_id(member.id()).await)?;
    eyre::ensure!(err.kind() == ErrorKind::NotFound, "deleted user is gone");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_cannot_remove_root(#[future(awt)] deployment: Deployment) -> Result<(), eyre::Report> {
    let root = deployment.sign_in(ROOT_USERNAME, ROOT_PASSWORD).await?;
    deployment
        .user_policy
        .add_user(AddUserRequest::new("ops", "ops-pw", "admin"), &root)
        .await?;
    let admin = deployment.sign_in("ops", "ops-pw").await?;

    let err = expect_policy_error(
        deployment
            .user_policy
            .delete_user(root.actor_id(), &admin)
            .await,
    )?;

    eyre::ensure!(err.kind() == ErrorKind::Forbidden, "expected Forbidden");
    eyre::ensure!(err.status_code() == 403, "expected status 403");
    eyre::ensure!(
        err.message() == "cannot delete root user",
        "unexpected message: {}",
        err.message()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn password_change_invalidates_old_credentials(
    #[future(awt)] deployment: Deployment,
) -> Result<(), eyre::Report> {
    let bob = deployment.register_and_sign_in("bob", "old-pw").await?;

    deployment
        .user_policy
        .update_user(
            bob.actor_id(),
            UpdateUserRequest::new().with_password("new-pw"),
            &bob,
        )
        .await?;

    let err = expect_policy_error(
        deployment
            .user_policy
            .login_user(CredentialsRequest::new("bob", "old-pw"))
            .await,
    )?;
    eyre::ensure!(err.kind() == ErrorKind::Unauthorized, "old password rejected");
    deployment.sign_in("bob", "new-pw").await?;
    Ok(())
}
