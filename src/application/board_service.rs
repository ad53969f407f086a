use anyhow::Result;
use async_trait::async_trait;

use crate::domain::category::Category;
use crate::domain::repository::BoardRepository;
use crate::domain::task::Task;

/// Application-facing board operations. A thin pass-through to the
/// repository; business rules (required fields, category-in-use checks)
/// live in the client layer.
#[async_trait]
pub trait BoardService: Send + Sync + 'static {
    async fn list_tasks(&self) -> Result<Vec<Task>>;
    async fn save_task(&self, task: Task) -> Result<()>;
    async fn delete_task(&self, id: &str) -> Result<()>;

    async fn list_categories(&self) -> Result<Vec<Category>>;
    async fn save_category(&self, category: Category) -> Result<()>;
    async fn delete_category(&self, id: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct BoardServiceImpl<R: BoardRepository> {
    repo: R,
}

impl<R: BoardRepository> BoardServiceImpl<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: BoardRepository> BoardService for BoardServiceImpl<R> {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.repo.list_tasks().await
    }
    async fn save_task(&self, task: Task) -> Result<()> {
        self.repo.upsert_task(task).await
    }
    async fn delete_task(&self, id: &str) -> Result<()> {
        self.repo.delete_task(id).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.repo.list_categories().await
    }
    async fn save_category(&self, category: Category) -> Result<()> {
        self.repo.upsert_category(category).await
    }
    async fn delete_category(&self, id: &str) -> Result<()> {
        self.repo.delete_category(id).await
    }
}
