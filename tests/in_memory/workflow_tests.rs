//! End-to-end command and query flows over in-memory storage.

use super::helpers::{Services, epoch, services};
use chrono::TimeDelta;
use mockable::Clock;
use rstest::rstest;
use taskhub::task::{
    domain::{
        Priority, Project, ProjectId, SortDirection, SortKey, TaskFilter, TaskId, TaskSort,
        TaskStatus, UserId,
    },
    ports::DirectoryRepository,
    services::{
        AddTaskCommentCommand, CreateTaskCommand, GetProjectOverviewQuery, GetTaskByIdQuery,
        GetTasksQuery, TaskServiceError, UpdateTaskCommand,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_a_task_uses_the_injected_clock(
    services: Services,
) -> Result<(), eyre::Report> {
    let project = Project::new(ProjectId::new(), "Release", "")?;
    services.directory.store_project(&project).await?;
    let id = services
        .commands
        .create_task(
            CreateTaskCommand::new("Tag release", "Cut v1.0", project.id())
                .with_priority(Priority::High),
        )
        .await?;

    services.clock.advance(TimeDelta::days(1));
    let finished_at = services.clock.utc();
    services
        .commands
        .update_task(UpdateTaskCommand {
            id,
            title: "Tag release".to_owned(),
            description: "Cut v1.0".to_owned(),
            due_date: None,
            assignee_id: None,
            priority: Priority::High,
            estimated_hours: Some(0.0),
            status: TaskStatus::Completed,
        })
        .await?;

    let details = services.queries.get_task(GetTaskByIdQuery { id }).await?;
    eyre::ensure!(
        details.task.status == TaskStatus::Completed,
        "status not completed"
    );
    eyre::ensure!(
        details.task.completed_date == Some(finished_at),
        "completion date {:?} does not match clock {finished_at}",
        details.task.completed_date
    );
    eyre::ensure!(details.created_at == epoch(), "creation time moved");
    eyre::ensure!(
        details.task.estimated_hours == Some(0.0),
        "zero estimate not kept"
    );

    let overview = services
        .queries
        .project_overview(GetProjectOverviewQuery {
            project_id: project.id(),
        })
        .await?;
    eyre::ensure!(overview.progress == 100, "progress {}", overview.progress);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_combines_search_filter_and_priority_sort(
    services: Services,
) -> Result<(), eyre::Report> {
    let project_id = ProjectId::new();
    let other_project = ProjectId::new();
    let specs = [
        ("Fix login bug", Priority::Medium, project_id),
        ("Fix signup bug", Priority::High, project_id),
        ("Write changelog", Priority::High, project_id),
        ("Fix billing bug", Priority::High, other_project),
        ("Fix logout bug", Priority::Medium, project_id),
    ];
    for (title, priority, project) in specs {
        services
            .commands
            .create_task(CreateTaskCommand::new(title, "", project).with_priority(priority))
            .await?;
    }

    let page = services
        .queries
        .list_tasks(GetTasksQuery {
            filter: TaskFilter::new()
                .with_search("FIX")
                .with_project(project_id),
            sort: TaskSort::new(SortKey::Priority, SortDirection::Desc),
            page: 1,
        })
        .await?;

    let titles: Vec<&str> = page.items.iter().map(|item| item.title.as_str()).collect();
    eyre::ensure!(
        titles == ["Fix signup bug", "Fix login bug", "Fix logout bug"],
        "unexpected order {titles:?}"
    );
    eyre::ensure!(page.total_pages == 1, "unexpected pages {}", page.total_pages);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn out_of_range_page_is_empty(
    services: Services,
) -> Result<(), eyre::Report> {
    let project_id = ProjectId::new();
    for n in 1..=12 {
        services
            .commands
            .create_task(CreateTaskCommand::new(format!("Chore {n}"), "", project_id))
            .await?;
    }

    let page = services
        .queries
        .list_tasks(GetTasksQuery {
            page: 5,
            ..GetTasksQuery::default()
        })
        .await?;

    eyre::ensure!(page.items.is_empty(), "expected no items");
    eyre::ensure!(page.total_count == 12, "unexpected total {}", page.total_count);
    eyre::ensure!(page.total_pages == 2, "unexpected pages {}", page.total_pages);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comment_on_missing_task_is_not_found(
    services: Services,
) -> Result<(), eyre::Report> {
    let missing = TaskId::new();
    let result = services
        .commands
        .add_comment(AddTaskCommentCommand {
            task_id: missing,
            author_id: UserId::new(),
            content: "Anyone here?".to_owned(),
        })
        .await;

    eyre::ensure!(
        matches!(result, Err(TaskServiceError::TaskNotFound(id)) if id == missing),
        "expected not found, got {result:?}"
    );
    Ok(())
}
