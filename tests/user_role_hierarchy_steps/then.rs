//! Then steps for user role hierarchy BDD scenarios.

use super::world::{HierarchyWorld, run_async};
use rstest_bdd_macros::then;
use taskwarden::{access::Role, error::PolicyError};

fn last_error(world: &HierarchyWorld) -> Result<&PolicyError, eyre::Report> {
    match world.last_result.as_ref() {
        None => Err(eyre::eyre!("no operation has been attempted")),
        Some(Ok(())) => Err(eyre::eyre!("expected the operation to fail")),
        Some(Err(err)) => Ok(err),
    }
}

#[then(r#"the operation is forbidden with message "{message}""#)]
fn forbidden_with_message(world: &HierarchyWorld, message: String) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        err.status_code() == 403,
        "expected status 403, got {} ({err})",
        err.status_code()
    );
    eyre::ensure!(
        err.message() == message,
        "expected message {message:?}, got {:?}",
        err.message()
    );
    Ok(())
}

#[then(r#"the operation fails as "{kind}" with message "{message}""#)]
fn fails_as_kind(
    world: &HierarchyWorld,
    kind: String,
    message: String,
) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        err.kind().as_str() == kind,
        "expected {kind}, got {}",
        err.kind()
    );
    eyre::ensure!(err.message() == message, "unexpected message {:?}", err.message());
    Ok(())
}

#[then("the operation succeeds")]
fn operation_succeeds(world: &HierarchyWorld) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Ok(())) => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("operation failed: {err}")),
        None => Err(eyre::eyre!("no operation has been attempted")),
    }
}

#[then(r#"the account "{name}" still exists"#)]
fn account_still_exists(world: &HierarchyWorld, name: String) -> Result<(), eyre::Report> {
    world.id_of(&name).map(|_| ())
}

#[then(r#""{name}" has role "{role}""#)]
fn account_has_role(world: &HierarchyWorld, name: String, role: String) -> Result<(), eyre::Report> {
    let expected = Role::try_from(role.as_str())?;
    let id = world.id_of(&name)?;
    let user = run_async(world.policy.get_user_by_id(id))?;
    eyre::ensure!(
        user.role() == expected,
        "expected {name} to be {expected:?}, found {:?}",
        user.role()
    );
    Ok(())
}
