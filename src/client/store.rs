use super::api::ApiClient;
use super::cache::{self, SnapshotCache};
use super::ClientError;
use crate::domain::category::Category;
use crate::domain::task::Task;

/// Categories seeded when the backend has none yet (and as the last-resort
/// fallback when neither the network nor a snapshot is available).
pub fn default_categories() -> Vec<Category> {
    vec![
        Category {
            id: "cat-1".into(),
            name: "Work".into(),
            color: "#3b82f6".into(),
        },
        Category {
            id: "cat-2".into(),
            name: "Personal".into(),
            color: "#10b981".into(),
        },
        Category {
            id: "cat-3".into(),
            name: "Study".into(),
            color: "#f59e0b".into(),
        },
    ]
}

/// In-memory board state synchronized with the REST backend.
///
/// Reads are stale-tolerant: a failed fetch falls back to the last local
/// snapshot. Writes are not retried; failures propagate to the caller.
/// Client-side rules live here: required fields are checked before any
/// request goes out, and a category still referenced by a task cannot be
/// deleted.
pub struct BoardStore {
    api: ApiClient,
    cache: SnapshotCache,
    tasks: Vec<Task>,
    categories: Vec<Category>,
}

impl BoardStore {
    pub fn new(api: ApiClient, cache: SnapshotCache) -> Self {
        Self {
            api,
            cache,
            tasks: Vec::new(),
            categories: Vec::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category lookup for rendering; `None` covers dangling references.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Re-fetch both collections (two requests joined) and replace the
    /// in-memory state. Never fails: each fetch independently degrades to
    /// its snapshot, then to the default seed / an empty list.
    pub async fn refresh(&mut self) {
        let (tasks, categories) = tokio::join!(self.load_tasks(), self.load_categories());
        self.tasks = tasks;
        self.categories = categories;
    }

    async fn load_tasks(&self) -> Vec<Task> {
        match self.api.fetch_tasks().await {
            Ok(tasks) => tasks,
            Err(err) => {
                tracing::warn!(%err, "task fetch failed, using local snapshot");
                self.cache.read(cache::TASKS_KEY).unwrap_or_default()
            }
        }
    }

    async fn load_categories(&self) -> Vec<Category> {
        match self.api.fetch_categories().await {
            Ok(categories) if !categories.is_empty() => categories,
            Ok(_) => default_categories(),
            Err(err) => {
                tracing::warn!(%err, "category fetch failed, using local snapshot");
                self.cache
                    .read(cache::CATEGORIES_KEY)
                    .unwrap_or_else(default_categories)
            }
        }
    }

    /// Upsert the full task record, then re-sync and mirror the collection
    /// into the snapshot cache.
    pub async fn save_task(&mut self, task: Task) -> Result<(), ClientError> {
        if task.title.trim().is_empty() {
            return Err(ClientError::EmptyTitle);
        }
        self.api.save_task(&task).await?;
        self.refresh().await;
        self.cache.write(cache::TASKS_KEY, &self.tasks)?;
        Ok(())
    }

    pub async fn delete_task(&mut self, id: &str) -> Result<(), ClientError> {
        self.api.delete_task(id).await?;
        self.refresh().await;
        self.cache.write(cache::TASKS_KEY, &self.tasks)?;
        Ok(())
    }

    pub async fn save_category(&mut self, category: Category) -> Result<(), ClientError> {
        if category.name.trim().is_empty() {
            return Err(ClientError::EmptyName);
        }
        self.api.save_category(&category).await?;
        self.refresh().await;
        self.cache.write(cache::CATEGORIES_KEY, &self.categories)?;
        Ok(())
    }

    /// Rejected before any request when a task still references the
    /// category; storage is left untouched.
    pub async fn delete_category(&mut self, id: &str) -> Result<(), ClientError> {
        if self.tasks.iter().any(|t| t.category_id.as_deref() == Some(id)) {
            return Err(ClientError::CategoryInUse(id.to_string()));
        }
        self.api.delete_category(id).await?;
        self.refresh().await;
        self.cache.write(cache::CATEGORIES_KEY, &self.categories)?;
        Ok(())
    }
}
