//! Given steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskhub::task::{
    domain::{Priority, Project, ProjectId, TaskStatus},
    ports::DirectoryRepository,
    services::{CreateTaskCommand, UpdateTaskCommand},
};

#[given(r#"a project named "{name}""#)]
fn project_named(world: &mut TaskLifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let project = Project::new(ProjectId::new(), name, "")?;
    run_async(world.directory.store_project(&project)).wrap_err("store scenario project")?;
    world.project_id = Some(project.id());
    Ok(())
}

#[given(r#"a task titled "{title}" in the project"#)]
fn task_in_project(world: &mut TaskLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    let project_id = world.project_id()?;
    let command = CreateTaskCommand::new(title.clone(), "", project_id);
    let id = run_async(world.commands.create_task(command)).wrap_err("create scenario task")?;
    world.tasks.insert(title, id);
    Ok(())
}

#[given(r#"the task "{title}" has been completed"#)]
fn task_completed(world: &mut TaskLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let command = UpdateTaskCommand {
        id,
        title,
        description: String::new(),
        due_date: None,
        assignee_id: None,
        priority: Priority::Medium,
        estimated_hours: None,
        status: TaskStatus::Completed,
    };
    run_async(world.commands.update_task(command)).wrap_err("complete scenario task")?;
    Ok(())
}
