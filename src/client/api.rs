use serde::Serialize;
use serde::de::DeserializeOwned;

use super::ClientError;
use crate::domain::category::Category;
use crate::domain::task::Task;

/// HTTP client for the board endpoints. Deletes are keyed by an `id`
/// query parameter, saves POST the full record.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// * `base_url` - e.g. `http://127.0.0.1:3000`, no trailing slash.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn fetch_tasks(&self) -> Result<Vec<Task>, ClientError> {
        self.get_json("/api/tasks").await
    }

    pub async fn save_task(&self, task: &Task) -> Result<(), ClientError> {
        self.post_json("/api/tasks", task).await
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), ClientError> {
        self.delete("/api/tasks", id).await
    }

    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.get_json("/api/categories").await
    }

    pub async fn save_category(&self, category: &Category) -> Result<(), ClientError> {
        self.post_json("/api/categories", category).await
    }

    pub async fn delete_category(&self, id: &str) -> Result<(), ClientError> {
        self.delete("/api/categories", id).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let res = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        Ok(ensure_ok(res).await?.json().await?)
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ClientError> {
        let res = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        ensure_ok(res).await?;
        Ok(())
    }

    async fn delete(&self, path: &str, id: &str) -> Result<(), ClientError> {
        let res = self
            .client
            .delete(format!("{}{}", self.base_url, path))
            .query(&[("id", id)])
            .send()
            .await?;
        ensure_ok(res).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into [`ClientError::Api`], pulling the message
/// out of the `{"error": ...}` envelope when present.
async fn ensure_ok(res: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if res.status().is_success() {
        return Ok(res);
    }
    let status = res.status().as_u16();
    let message = res
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("error")
                .and_then(|e| e.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("HTTP {status}"));
    Err(ClientError::Api { status, message })
}
