//! Contract tests for the in-memory task repository and directory.

use super::helpers::{clock, epoch};
use chrono::TimeDelta;
use rstest::rstest;
use taskhub::task::{
    adapters::memory::{InMemoryDirectory, InMemoryTaskRepository, ManualClock},
    domain::{
        Attachment, AttachmentId, AttachmentUpload, Comment, CommentId, PageRequest, Priority,
        Project, ProjectId, Task, TaskFilter, TaskId, TaskQuery, TaskSort, TaskStatus, User,
        UserId,
    },
    ports::{DirectoryError, DirectoryRepository, TaskRepository, TaskRepositoryError},
};

fn full_task(clock: &ManualClock) -> Result<Task, eyre::Report> {
    let author = UserId::new();
    let mut task = Task::new(
        TaskId::new(),
        "Prepare demo",
        "Slides and script",
        ProjectId::new(),
        clock,
    )?;
    task.assign(author, clock);
    task.reschedule(Some(epoch() + TimeDelta::days(3)), clock);
    task.set_priority(Priority::High, clock);
    task.reestimate(Some(2.5), clock)?;
    task.add_comment(Comment::new(CommentId::new(), author, "Draft ready", clock)?, clock);
    let upload = AttachmentUpload {
        file_name: "slides.key".to_owned(),
        mime_type: "application/vnd.apple.keynote".to_owned(),
        size_bytes: 4096,
        uploaded_by: author,
    };
    task.add_attachment(Attachment::new(AttachmentId::new(), upload, clock)?, clock);
    task.transition_status(TaskStatus::Completed, clock);
    Ok(task)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_task_reads_back_identically(clock: ManualClock) -> Result<(), eyre::Report> {
    let repository = InMemoryTaskRepository::new();
    let task = full_task(&clock)?;

    repository.store(&task).await?;
    let loaded = repository.find_by_id(task.id()).await?;

    eyre::ensure!(loaded.as_ref() == Some(&task), "round trip changed the task");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn storing_twice_is_a_duplicate(clock: ManualClock) -> Result<(), eyre::Report> {
    let repository = InMemoryTaskRepository::new();
    let task = full_task(&clock)?;
    repository.store(&task).await?;

    let result = repository.store(&task).await;

    eyre::ensure!(
        matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()),
        "expected duplicate error, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_and_remove_require_an_existing_task(
    clock: ManualClock,
) -> Result<(), eyre::Report> {
    let repository = InMemoryTaskRepository::new();
    let task = full_task(&clock)?;

    let update = repository.update(&task).await;
    let remove = repository.remove(task.id()).await;

    eyre::ensure!(
        matches!(update, Err(TaskRepositoryError::NotFound(_))),
        "expected not found on update, got {update:?}"
    );
    eyre::ensure!(
        matches!(remove, Err(TaskRepositoryError::NotFound(_))),
        "expected not found on remove, got {remove:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_deletes_the_task(clock: ManualClock) -> Result<(), eyre::Report> {
    let repository = InMemoryTaskRepository::new();
    let task = full_task(&clock)?;
    repository.store(&task).await?;

    repository.remove(task.id()).await?;

    eyre::ensure!(
        repository.find_by_id(task.id()).await?.is_none(),
        "task still present"
    );
    eyre::ensure!(repository.is_empty()?, "repository not empty");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn query_reports_total_beyond_the_page(clock: ManualClock) -> Result<(), eyre::Report> {
    let repository = InMemoryTaskRepository::new();
    let project_id = ProjectId::new();
    for n in 0..5 {
        let task = Task::new(TaskId::new(), format!("Task {n}"), "", project_id, &clock)?;
        repository.store(&task).await?;
    }
    let query = TaskQuery::new(
        TaskFilter::new().with_project(project_id),
        TaskSort::default(),
        PageRequest::new(2, 2)?,
    );

    let result = repository.query(&query).await?;

    eyre::ensure!(result.total == 5, "unexpected total {}", result.total);
    let titles: Vec<&str> = result.tasks.iter().map(Task::title).collect();
    eyre::ensure!(titles == ["Task 2", "Task 3"], "unexpected page {titles:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn directory_rejects_duplicates_and_unknown_updates() -> Result<(), eyre::Report> {
    let directory = InMemoryDirectory::new();
    let project = Project::new(ProjectId::new(), "Platform", "Shared services")?;
    let user = User::new(UserId::new(), "Erin")?.with_avatar_url("https://example.test/erin.png");

    let missing = directory.update_project(&project).await;
    directory.store_project(&project).await?;
    directory.store_user(&user).await?;
    let duplicate_project = directory.store_project(&project).await;
    let duplicate_user = directory.store_user(&user).await;

    eyre::ensure!(
        matches!(missing, Err(DirectoryError::ProjectNotFound(_))),
        "expected not found, got {missing:?}"
    );
    eyre::ensure!(
        matches!(duplicate_project, Err(DirectoryError::DuplicateProject(_))),
        "expected duplicate project, got {duplicate_project:?}"
    );
    eyre::ensure!(
        matches!(duplicate_user, Err(DirectoryError::DuplicateUser(_))),
        "expected duplicate user, got {duplicate_user:?}"
    );
    let loaded = directory.find_user(user.id()).await?;
    eyre::ensure!(loaded == Some(user), "user did not round trip");
    Ok(())
}
