use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{Task, TaskInput, TaskUpdate};

const TASK_COLUMNS: &str = "id, user_id, title, description, is_completed, created_at, updated_at";

/// Storage access for tasks.
///
/// Every read, update, and delete filters by task id AND owner id in a single
/// statement; a task id alone never authorizes access, and a task belonging
/// to another owner is indistinguishable from a nonexistent one. Mutating
/// operations run inside a transaction committed only on success (rollback
/// on drop).
pub struct TaskRepository;

impl TaskRepository {
    /// Inserts a task for the given owner. `is_completed` defaults to false
    /// and timestamps are server-assigned.
    pub async fn create(
        pool: &PgPool,
        owner_id: i32,
        input: &TaskInput,
    ) -> Result<Task, AppError> {
        let mut tx = pool.begin().await?;

        let task = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (user_id, title, description) VALUES ($1, $2, $3) \
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(owner_id)
        .bind(&input.title)
        .bind(&input.description)
        .fetch_optional(&mut *tx)
        .await?;

        match task {
            Some(task) => {
                tx.commit().await?;
                Ok(task)
            }
            // Insert yielded no row
            None => Err(AppError::TaskCreateFailed),
        }
    }

    /// Returns all tasks for the owner, ordered by id. No tasks is an empty
    /// list, not an error.
    pub async fn list_by_owner(pool: &PgPool, owner_id: i32) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY id",
            TASK_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Fetches a single task by (id, owner) in one filtered lookup.
    pub async fn get_by_id(pool: &PgPool, task_id: i32, owner_id: i32) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1 AND user_id = $2",
            TASK_COLUMNS
        ))
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        task.ok_or(AppError::TaskNotFound)
    }

    /// Applies a partial update to a task the owner holds.
    ///
    /// Only supplied fields are written, plus `updated_at`. The statement is
    /// conditioned on (id, owner), so for a task the caller does not own it
    /// updates zero rows and fails; no read-modify-write window exists. The
    /// caller must reject empty updates before calling this.
    pub async fn update(
        pool: &PgPool,
        task_id: i32,
        owner_id: i32,
        update: &TaskUpdate,
    ) -> Result<Task, AppError> {
        // Assemble the SET clause from the supplied fields, binding in the
        // same order the placeholders are appended.
        let mut sql = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut param_count = 1;

        if update.title.is_some() {
            sql.push_str(&format!(", title = ${}", param_count));
            param_count += 1;
        }
        if update.description.is_some() {
            sql.push_str(&format!(", description = ${}", param_count));
            param_count += 1;
        }
        if update.is_completed.is_some() {
            sql.push_str(&format!(", is_completed = ${}", param_count));
            param_count += 1;
        }

        sql.push_str(&format!(
            " WHERE id = ${} AND user_id = ${} RETURNING {}",
            param_count,
            param_count + 1,
            TASK_COLUMNS
        ));

        let mut query = sqlx::query_as::<_, Task>(&sql);
        if let Some(title) = &update.title {
            query = query.bind(title);
        }
        if let Some(description) = &update.description {
            query = query.bind(description);
        }
        if let Some(is_completed) = update.is_completed {
            query = query.bind(is_completed);
        }

        let mut tx = pool.begin().await?;
        let task = query
            .bind(task_id)
            .bind(owner_id)
            .fetch_optional(&mut *tx)
            .await?;

        match task {
            Some(task) => {
                tx.commit().await?;
                Ok(task)
            }
            // Zero rows changed: nonexistent task or not the caller's.
            None => Err(AppError::TaskUpdateFailed),
        }
    }

    /// Deletes a task the owner holds.
    ///
    /// Anything other than exactly one removed row is a failure; zero rows
    /// means nonexistent or not the caller's, and the two are deliberately
    /// indistinguishable.
    pub async fn delete(pool: &PgPool, task_id: i32, owner_id: i32) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() != 1 {
            return Err(AppError::TaskDeleteFailed);
        }

        tx.commit().await?;
        Ok(())
    }
}
