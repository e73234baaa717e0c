//! In-memory integration tests for task ownership across signed-in actors.

use super::helpers::{Deployment, ROOT_PASSWORD, ROOT_USERNAME, deployment, expect_policy_error};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use taskwarden::{
    error::ErrorKind,
    task::{
        domain::{TaskId, TaskStatus},
        services::{CreateTaskRequest, PatchTaskRequest},
    },
};

fn create_request(title: &str) -> Result<CreateTaskRequest, eyre::Report> {
    let due = Utc
        .with_ymd_and_hms(2030, 1, 15, 12, 0, 0)
        .single()
        .ok_or_else(|| eyre::eyre!("invalid due date"))?;
    Ok(CreateTaskRequest::new(title).with_due_date(due))
}

fn parse_id(raw: &str) -> Result<TaskId, eyre::Report> {
    Ok(TaskId::from_uuid(raw.parse()?))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owners_and_root_can_modify_but_strangers_cannot(
    #[future(awt)] deployment: Deployment,
) -> Result<(), eyre::Report> {
    let alice = deployment.register_and_sign_in("alice", "alice-pw").await?;
    let mallory = deployment.register_and_sign_in("mallory", "mallory-pw").await?;
    let root = deployment.sign_in(ROOT_USERNAME, ROOT_PASSWORD).await?;

    let view = deployment
        .task_policy
        .create(create_request("Write report")?, &alice)
        .await?;
    let id = parse_id(&view.id)?;

    let denied = expect_policy_error(
        deployment
            .task_policy
            .patch(id, PatchTaskRequest::new().with_status("Completed"), &mallory)
            .await,
    )?;
    eyre::ensure!(denied.kind() == ErrorKind::Forbidden, "stranger is denied");

    let own = deployment
        .task_policy
        .patch(id, PatchTaskRequest::new().with_status("In Progress"), &alice)
        .await?;
    eyre::ensure!(own.status == TaskStatus::InProgress, "owner patch applied");

    deployment.task_policy.delete(id, &root).await?;
    let gone = expect_policy_error(deployment.task_policy.get_by_id(id).await)?;
    eyre::ensure!(gone.kind() == ErrorKind::NotFound, "task removed by root");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_spans_all_owners(#[future(awt)] deployment: Deployment) -> Result<(), eyre::Report> {
    let alice = deployment.register_and_sign_in("alice", "alice-pw").await?;
    let bob = deployment.register_and_sign_in("bob", "bob-pw").await?;

    deployment
        .task_policy
        .create(create_request("Alice's task")?, &alice)
        .await?;
    deployment
        .task_policy
        .create(create_request("Bob's task")?, &bob)
        .await?;

    let tasks = deployment.task_policy.list().await?;
    eyre::ensure!(tasks.len() == 2, "expected two tasks, found {}", tasks.len());
    eyre::ensure!(
        tasks.iter().any(|task| task.owner_id() == alice.actor_id())
            && tasks.iter().any(|task| task.owner_id() == bob.actor_id()),
        "each task keeps its creator as owner"
    );
    Ok(())
}
