use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};

use crate::domain::category::Category;
use crate::domain::repository::BoardRepository;
use crate::domain::task::Task;

/// SQLite-backed store. Column names follow the wire format (camelCase) so
/// rows round-trip without renames. The task → category link is a plain
/// TEXT column, not a foreign key constraint.
#[derive(Clone)]
pub struct SqliteBoardRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteBoardRepository {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }
}

#[async_trait]
impl BoardRepository for SqliteBoardRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS categories (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                color TEXT NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS tasks (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT,
                categoryId TEXT,
                deadline TEXT,
                createdAt TEXT NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let rows = sqlx::query(
            "SELECT id, title, content, categoryId, deadline, createdAt
             FROM tasks ORDER BY createdAt DESC",
        )
        .fetch_all(&*self.pool)
        .await?;
        Ok(rows.into_iter().map(row_to_task).collect())
    }

    async fn upsert_task(&self, task: Task) -> Result<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO tasks (id, title, content, categoryId, deadline, createdAt)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&task.id)
        .bind(&task.title)
        .bind(&task.content)
        .bind(&task.category_id)
        .bind(&task.deadline)
        .bind(&task.created_at)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM tasks WHERE id = ?1")
            .bind(id)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name, color FROM categories ORDER BY name")
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows.into_iter().map(row_to_category).collect())
    }

    async fn upsert_category(&self, category: Category) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO categories (id, name, color) VALUES (?1, ?2, ?3)")
            .bind(&category.id)
            .bind(&category.name)
            .bind(&category.color)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn delete_category(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }
}

fn row_to_task(row: SqliteRow) -> Task {
    Task {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        category_id: row.get("categoryId"),
        deadline: row.get("deadline"),
        created_at: row.get("createdAt"),
    }
}

fn row_to_category(row: SqliteRow) -> Category {
    Category {
        id: row.get("id"),
        name: row.get("name"),
        color: row.get("color"),
    }
}
