//! Then steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use mockable::Clock;
use rstest_bdd_macros::then;
use taskhub::task::services::{GetProjectOverviewQuery, GetTaskByIdQuery};

#[then(r#"the task "{title}" has a completion date"#)]
fn has_completion_date(world: &TaskLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let details = run_async(world.queries.get_task(GetTaskByIdQuery { id }))?;
    let expected = world.clock.utc();
    if details.task.completed_date != Some(expected) {
        return Err(eyre::eyre!(
            "expected completion at {expected}, found {:?}",
            details.task.completed_date
        ));
    }
    Ok(())
}

#[then(r#"the task "{title}" has no completion date"#)]
fn has_no_completion_date(world: &TaskLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let details = run_async(world.queries.get_task(GetTaskByIdQuery { id }))?;
    if let Some(completed) = details.task.completed_date {
        return Err(eyre::eyre!("expected no completion date, found {completed}"));
    }
    Ok(())
}

#[then("the project progress is {progress:u8} percent")]
fn project_progress(world: &TaskLifecycleWorld, progress: u8) -> Result<(), eyre::Report> {
    let project_id = world.project_id()?;
    let overview = run_async(
        world
            .queries
            .project_overview(GetProjectOverviewQuery { project_id }),
    )?;
    if overview.progress != progress {
        return Err(eyre::eyre!(
            "expected progress {progress}, found {}",
            overview.progress
        ));
    }
    Ok(())
}

#[then("the request fails with a validation error")]
fn fails_with_validation(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    match &world.last_error {
        Some(err) if err.is_validation() => Ok(()),
        other => Err(eyre::eyre!("expected a validation error, got {other:?}")),
    }
}
