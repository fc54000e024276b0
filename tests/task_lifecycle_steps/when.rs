//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use chrono::TimeDelta;
use rstest_bdd_macros::when;
use taskhub::task::{
    domain::{Priority, TaskStatus},
    services::{CreateTaskCommand, UpdateTaskCommand},
};

#[when(r#"the task "{title}" is moved to "{status}""#)]
fn move_task(
    world: &mut TaskLifecycleWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    world.clock.advance(TimeDelta::minutes(30));
    let command = UpdateTaskCommand {
        id,
        title,
        description: String::new(),
        due_date: None,
        assignee_id: None,
        priority: Priority::Medium,
        estimated_hours: None,
        status: target,
    };
    if let Err(err) = run_async(world.commands.update_task(command)) {
        world.last_error = Some(err);
    }
    Ok(())
}

#[when(r#"a task titled "{title}" is created in the project"#)]
fn create_task(world: &mut TaskLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    let project_id = world.project_id()?;
    match run_async(
        world
            .commands
            .create_task(CreateTaskCommand::new(title.clone(), "", project_id)),
    ) {
        Ok(id) => {
            world.tasks.insert(title, id);
        }
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}
