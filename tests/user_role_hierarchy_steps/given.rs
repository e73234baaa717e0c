//! Given steps for user role hierarchy BDD scenarios.

use super::world::{HierarchyWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskwarden::user::{
    domain::{Password, Username},
    services::{AddUserRequest, CredentialsRequest, RootCredentials, bootstrap_root_user},
};

fn password_for(name: &str) -> String {
    format!("{name}-password")
}

#[given(r#"a deployment with root account "{name}""#)]
fn deployment_with_root(world: &mut HierarchyWorld, name: String) -> Result<(), eyre::Report> {
    let password = password_for(&name);
    let credentials = RootCredentials::new(
        Username::new(name.as_str())?,
        Password::new(password.as_str())?,
    );
    run_async(bootstrap_root_user(
        world.store.as_ref(),
        world.hasher.as_ref(),
        &credentials,
    ))
    .wrap_err("bootstrap root account")?;
    world.passwords.insert(name, password);
    Ok(())
}

#[given(r#"a registered user "{name}""#)]
fn registered_user(world: &mut HierarchyWorld, name: String) -> Result<(), eyre::Report> {
    let password = password_for(&name);
    run_async(
        world
            .policy
            .register_user(CredentialsRequest::new(name.as_str(), password.as_str())),
    )
    .wrap_err_with(|| format!("register {name}"))?;
    world.passwords.insert(name, password);
    Ok(())
}

#[given(r#"an admin account "{name}" created by root"#)]
fn admin_created_by_root(world: &mut HierarchyWorld, name: String) -> Result<(), eyre::Report> {
    let root = world.claims_for("root")?;
    let password = password_for(&name);
    run_async(world.policy.add_user(
        AddUserRequest::new(name.as_str(), password.as_str(), "admin"),
        &root,
    ))
    .wrap_err_with(|| format!("root adds admin {name}"))?;
    world.passwords.insert(name, password);
    Ok(())
}
