use async_trait::async_trait;

use super::category::Category;
use super::task::Task;

/// Storage for the two board collections. Saves are whole-record upserts
/// keyed by id; the task → category link is not enforced here.
#[async_trait]
pub trait BoardRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;

    /// Tasks ordered by creation time, newest first.
    async fn list_tasks(&self) -> anyhow::Result<Vec<Task>>;
    async fn upsert_task(&self, task: Task) -> anyhow::Result<()>;
    async fn delete_task(&self, id: &str) -> anyhow::Result<()>;

    /// Categories ordered by name.
    async fn list_categories(&self) -> anyhow::Result<Vec<Category>>;
    async fn upsert_category(&self, category: Category) -> anyhow::Result<()>;
    async fn delete_category(&self, id: &str) -> anyhow::Result<()>;
}
