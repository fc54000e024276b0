//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with their owned comments and attachments.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title, collated with `und-x-icu`.
        title -> Text,
        /// Task description.
        description -> Text,
        /// Workflow status in storage form.
        #[max_length = 50]
        status -> Varchar,
        /// Priority severity rank.
        priority -> SmallInt,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Completion timestamp, set only for completed tasks.
        completed_date -> Nullable<Timestamptz>,
        /// Optional effort estimate in hours.
        estimated_hours -> Nullable<Float8>,
        /// Owning project.
        project_id -> Uuid,
        /// Optional assignee.
        assignee_id -> Nullable<Uuid>,
        /// Comments owned by the task.
        comments -> Jsonb,
        /// Attachments owned by the task.
        attachments -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Projects grouping tasks.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Project name.
        name -> Text,
        /// Project description.
        description -> Text,
        /// Planned start date.
        start_date -> Nullable<Timestamptz>,
        /// Planned end date.
        end_date -> Nullable<Timestamptz>,
        /// Team member identifiers.
        team_members -> Jsonb,
        /// Cached task count.
        task_count -> Int8,
        /// Cached completed task count.
        completed_task_count -> Int8,
    }
}

diesel::table! {
    /// Users referenced by tasks.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        name -> Text,
        /// Optional avatar reference.
        avatar_url -> Nullable<Text>,
    }
}
