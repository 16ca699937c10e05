use crate::entities::*;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::*;

pub mod api;
pub mod web;

#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct Task {
    id: u32,
    content: String,
    created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(id: u32, content: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            content,
            created_at,
        }
    }

    /// Returns the ID of the task.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the text of the task.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the moment the task was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the calendar day the task was created on.
    pub fn created_on(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

impl From<todo::Model> for Task {
    fn from(model: todo::Model) -> Self {
        Task::new(model.id as u32, model.content, model.date_created)
    }
}

/// Error type for TaskStore operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskStoreError {
    /// No task with the given ID exists.
    #[error("Task with ID {0} not found")]
    NotFound(u32),
    /// The database rejected or failed the operation.
    #[error("Database error: {0}")]
    Storage(#[from] sea_orm::DbErr),
}

/// Durable CRUD access to the `todo` table.
pub struct TaskStore<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

impl TaskStore<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> TaskStore<'_> {
        TaskStore { db }
    }

    /// Creates a new task stamped with the current time.
    ///
    /// # Arguments
    ///
    /// * `content` - The text of the task.
    ///
    /// # Returns
    ///
    /// A `Result` containing the created `Task`, or `TaskStoreError::Storage` if the
    /// database rejects the row (for example, content longer than 200 characters).
    #[tracing::instrument(skip(self))]
    pub async fn insert(&self, content: String) -> Result<Task, TaskStoreError> {
        let active_model = todo::ActiveModel {
            content: ActiveValue::Set(content),
            date_created: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db).await?;
        Ok(Task::from(created_model))
    }

    /// Retrieves a task by its ID.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: u32) -> Result<Task, TaskStoreError> {
        let model = self.find_model(id).await?;
        Ok(Task::from(model))
    }

    /// Retrieves every task, oldest first.
    ///
    /// Tasks created within the same instant keep their insertion order.
    #[tracing::instrument(skip(self))]
    pub async fn list_ordered_by_created_at(&self) -> Result<Vec<Task>, TaskStoreError> {
        let tasks = todo::Entity::find()
            .order_by_asc(todo::Column::DateCreated)
            .order_by_asc(todo::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }

    /// Replaces the content of a task, leaving its ID and creation time untouched.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the task to edit.
    /// * `new_content` - The replacement text.
    ///
    /// # Returns
    ///
    /// A `Result` containing the updated `Task` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn update_content(
        &self,
        id: u32,
        new_content: String,
    ) -> Result<Task, TaskStoreError> {
        let task_to_update = self.find_model(id).await?;

        let mut active_model: todo::ActiveModel = task_to_update.into();
        active_model.content = ActiveValue::Set(new_content);
        match active_model.update(self.db).await {
            Ok(updated_model) => Ok(Task::from(updated_model)),
            Err(DbErr::RecordNotUpdated) => Err(TaskStoreError::NotFound(id)),
            Err(err) => Err(TaskStoreError::Storage(err)),
        }
    }

    /// Deletes a task by its ID.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: u32) -> Result<(), TaskStoreError> {
        let key = primary_key(id)?;
        let result = todo::Entity::delete_by_id(key).exec(self.db).await?;
        if result.rows_affected == 0 {
            return Err(TaskStoreError::NotFound(id));
        }
        Ok(())
    }

    async fn find_model(&self, id: u32) -> Result<todo::Model, TaskStoreError> {
        let key = primary_key(id)?;
        todo::Entity::find_by_id(key)
            .one(self.db)
            .await?
            .ok_or(TaskStoreError::NotFound(id))
    }
}

/// IDs beyond the range of the primary key column can never have been assigned.
fn primary_key(id: u32) -> Result<i32, TaskStoreError> {
    i32::try_from(id).map_err(|_| TaskStoreError::NotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn can_convert_model_into_task() {
        let created_at = Utc.with_ymd_and_hms(2025, 9, 1, 8, 30, 0).unwrap();
        let model = todo::Model {
            id: 7,
            content: "Buy milk".to_string(),
            date_created: created_at,
        };

        let task = Task::from(model);

        assert_eq!(task, Task::new(7, "Buy milk".to_string(), created_at));
        assert_eq!(task.created_on(), NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
    }

    #[test]
    fn rejects_ids_outside_the_key_range_as_not_found() {
        let result = primary_key(u32::MAX);

        assert!(matches!(result, Err(TaskStoreError::NotFound(u32::MAX))));
    }
}
