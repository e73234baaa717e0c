//! When steps for user role hierarchy BDD scenarios.

use super::world::{HierarchyWorld, run_async};
use rstest_bdd_macros::when;
use taskwarden::user::services::{CredentialsRequest, UpdateUserRequest};

#[when(r#""{actor}" deletes the account "{target}""#)]
fn delete_account(
    world: &mut HierarchyWorld,
    actor: String,
    target: String,
) -> Result<(), eyre::Report> {
    let claims = world.claims_for(&actor)?;
    let target_id = world.id_of(&target)?;
    world.last_result = Some(run_async(world.policy.delete_user(target_id, &claims)));
    Ok(())
}

#[when(r#""{actor}" sets the role of "{target}" to "{role}""#)]
fn set_role(
    world: &mut HierarchyWorld,
    actor: String,
    target: String,
    role: String,
) -> Result<(), eyre::Report> {
    let claims = world.claims_for(&actor)?;
    let target_id = world.id_of(&target)?;
    let result = run_async(world.policy.update_user(
        target_id,
        UpdateUserRequest::new().with_role(role),
        &claims,
    ));
    world.last_result = Some(result.map(|_| ()));
    Ok(())
}

#[when(r#""{name}" signs in with password "{password}""#)]
fn sign_in(world: &mut HierarchyWorld, name: String, password: String) {
    let result = run_async(
        world
            .policy
            .login_user(CredentialsRequest::new(name, password)),
    );
    world.last_result = Some(result.map(|_| ()));
}
