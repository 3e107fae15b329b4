//! Task list: fetch, search, toggle, delete, add.

use crate::api::{QueryEncoding, Task};
use crate::context::AppContext;
use crate::outcome::{ActionError, ActionResult, Failure};
use crate::validation::{validate_search, validate_task};

/// The current user's tasks as last fetched from the server.
pub struct TaskBoard<'a> {
    ctx: &'a AppContext,
    tasks: Vec<Task>,
}

impl<'a> TaskBoard<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self {
            ctx,
            tasks: Vec::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Replaces the list with everything the server has.
    ///
    /// # Errors
    /// `FETCH_FAILED`, or the shared identity/401 errors.
    pub async fn refresh(&mut self) -> ActionResult<&[Task]> {
        let identity = self.ctx.identity()?;
        self.tasks = self
            .ctx
            .api()
            .list_tasks(&identity)
            .await
            .map_err(|err| self.ctx.api_failure(Failure::Fetch, "Failed to load tasks", err))?;
        Ok(&self.tasks)
    }

    /// Replaces the list with tasks whose title or description match.
    ///
    /// # Errors
    /// `SEARCH_FAILED`, a validation error for a blank query, or the shared
    /// identity/401 errors.
    pub async fn search(&mut self, query: &str) -> ActionResult<&[Task]> {
        validate_search(query)?;
        let identity = self.ctx.identity()?;
        let encoding = if self.ctx.posture().encodes_search_query() {
            QueryEncoding::Encoded
        } else {
            QueryEncoding::Raw
        };

        self.tasks = self
            .ctx
            .api()
            .search_tasks(&identity, query, encoding)
            .await
            .map_err(|err| self.ctx.api_failure(Failure::Search, "Search failed", err))?;
        Ok(&self.tasks)
    }

    /// Flips a task's done state, then refetches. Returns the new state.
    ///
    /// # Errors
    /// `NOT_FOUND` if the task is not in the current list, `UPDATE_FAILED`,
    /// or the shared identity/401 errors.
    pub async fn toggle(&mut self, id: i64) -> ActionResult<bool> {
        let current = self
            .tasks
            .iter()
            .find(|task| task.id == id)
            .map(|task| task.is_done)
            .ok_or_else(|| ActionError::NotFound(format!("Task {id} not found")))?;

        let identity = self.ctx.identity()?;
        self.ctx
            .api()
            .update_task(&identity, id, !current)
            .await
            .map_err(|err| self.ctx.api_failure(Failure::Update, "Failed to update task", err))?;

        self.refresh().await?;
        Ok(!current)
    }

    /// Deletes a task, then refetches.
    ///
    /// # Errors
    /// `DELETE_FAILED`, or the shared identity/401 errors.
    pub async fn delete(&mut self, id: i64) -> ActionResult<()> {
        let identity = self.ctx.identity()?;
        self.ctx
            .api()
            .delete_task(&identity, id)
            .await
            .map_err(|err| self.ctx.api_failure(Failure::Delete, "Failed to delete task", err))?;

        self.refresh().await?;
        Ok(())
    }

    /// Creates a task, then refetches.
    ///
    /// # Errors
    /// A validation error (no request made), `ADD_FAILED`, or the shared
    /// identity/401 errors.
    pub async fn add(&mut self, title: &str, description: &str) -> ActionResult<()> {
        validate_task(title, description)?;
        let identity = self.ctx.identity()?;
        self.ctx
            .api()
            .create_task(&identity, title.trim(), description.trim())
            .await
            .map_err(|err| self.ctx.api_failure(Failure::Add, "Could not add task", err))?;

        self.refresh().await?;
        Ok(())
    }
}
