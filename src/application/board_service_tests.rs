use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use super::board_service::{BoardService, BoardServiceImpl};
use crate::domain::category::Category;
use crate::domain::repository::BoardRepository;
use crate::domain::task::Task;

#[derive(Clone, Default)]
struct InMemoryRepo {
    tasks: Arc<Mutex<HashMap<String, Task>>>,
    categories: Arc<Mutex<HashMap<String, Category>>>,
}

#[async_trait]
impl BoardRepository for InMemoryRepo {
    async fn init(&self) -> Result<()> {
        Ok(())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self.tasks.lock().unwrap().values().cloned().collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }
    async fn upsert_task(&self, task: Task) -> Result<()> {
        self.tasks.lock().unwrap().insert(task.id.clone(), task);
        Ok(())
    }
    async fn delete_task(&self, id: &str) -> Result<()> {
        self.tasks.lock().unwrap().remove(id);
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let mut cats: Vec<Category> = self.categories.lock().unwrap().values().cloned().collect();
        cats.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(cats)
    }
    async fn upsert_category(&self, category: Category) -> Result<()> {
        self.categories
            .lock()
            .unwrap()
            .insert(category.id.clone(), category);
        Ok(())
    }
    async fn delete_category(&self, id: &str) -> Result<()> {
        self.categories.lock().unwrap().remove(id);
        Ok(())
    }
}

fn task(id: &str, title: &str, created_at: &str) -> Task {
    Task {
        id: id.into(),
        title: title.into(),
        content: None,
        category_id: None,
        deadline: None,
        created_at: created_at.into(),
    }
}

#[tokio::test]
async fn upsert_with_new_id_grows_collection() {
    let service = BoardServiceImpl::new(InMemoryRepo::default());
    service
        .save_task(task("task-1", "one", "2026-01-01T00:00:00+00:00"))
        .await
        .unwrap();
    service
        .save_task(task("task-2", "two", "2026-01-02T00:00:00+00:00"))
        .await
        .unwrap();
    assert_eq!(service.list_tasks().await.unwrap().len(), 2);
}

#[tokio::test]
async fn upsert_with_existing_id_replaces_all_fields() {
    let service = BoardServiceImpl::new(InMemoryRepo::default());
    service
        .save_task(task("task-1", "before", "2026-01-01T00:00:00+00:00"))
        .await
        .unwrap();

    let mut replacement = task("task-1", "after", "2026-01-01T00:00:00+00:00");
    replacement.content = Some("details".into());
    replacement.deadline = Some("2026-02-01".into());
    service.save_task(replacement.clone()).await.unwrap();

    let tasks = service.list_tasks().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0], replacement);
}

#[tokio::test]
async fn delete_removes_exactly_one_record() {
    let service = BoardServiceImpl::new(InMemoryRepo::default());
    service
        .save_task(task("task-1", "one", "2026-01-01T00:00:00+00:00"))
        .await
        .unwrap();
    service
        .save_task(task("task-2", "two", "2026-01-02T00:00:00+00:00"))
        .await
        .unwrap();

    service.delete_task("task-1").await.unwrap();
    let tasks = service.list_tasks().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, "task-2");
}

#[tokio::test]
async fn tasks_come_back_newest_first() {
    let service = BoardServiceImpl::new(InMemoryRepo::default());
    for (id, at) in [
        ("task-a", "2026-01-02T00:00:00+00:00"),
        ("task-b", "2026-01-03T00:00:00+00:00"),
        ("task-c", "2026-01-01T00:00:00+00:00"),
    ] {
        service.save_task(task(id, id, at)).await.unwrap();
    }
    let ids: Vec<_> = service
        .list_tasks()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, ["task-b", "task-a", "task-c"]);
}

#[tokio::test]
async fn categories_come_back_sorted_by_name() {
    let service = BoardServiceImpl::new(InMemoryRepo::default());
    for (id, name) in [("cat-1", "Work"), ("cat-2", "Errands"), ("cat-3", "Study")] {
        service
            .save_category(Category {
                id: id.into(),
                name: name.into(),
                color: "#3b82f6".into(),
            })
            .await
            .unwrap();
    }
    let names: Vec<_> = service
        .list_categories()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Errands", "Study", "Work"]);
}
