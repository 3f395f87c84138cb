//! Lightweight HTTP client for the terminal UI.
//!
//! Wraps `reqwest` with the API base URL and a short timeout; every method
//! maps to exactly one REST endpoint on the running daemon.

use anyhow::{Context as _, Result};
use std::time::Duration;

use crate::tasks::Task;

/// A thin HTTP client for UI-to-daemon calls.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client targeting the API at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fetch the full task list.
    pub async fn list(&self) -> Result<Vec<Task>> {
        let resp = self
            .http
            .get(self.url("/api/tasks"))
            .send()
            .await
            .context("failed to reach the task API")?
            .error_for_status()
            .context("list request rejected")?;
        Ok(resp.json().await?)
    }

    /// Create a task with the given title; the server assigns the id.
    pub async fn create(&self, title: &str) -> Result<Task> {
        let resp = self
            .http
            .post(self.url("/api/tasks"))
            .json(&serde_json::json!({ "title": title, "completed": false }))
            .send()
            .await
            .context("failed to reach the task API")?
            .error_for_status()
            .context("create request rejected")?;
        Ok(resp.json().await?)
    }

    /// Send the full updated record (PUT, replace semantics).
    pub async fn replace(&self, task: &Task) -> Result<()> {
        self.http
            .put(self.url(&format!("/api/tasks/{}", task.id)))
            .json(task)
            .send()
            .await
            .context("failed to reach the task API")?
            .error_for_status()
            .context("replace request rejected")?;
        Ok(())
    }

    /// Delete a task by id.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.http
            .delete(self.url(&format!("/api/tasks/{id}")))
            .send()
            .await
            .context("failed to reach the task API")?
            .error_for_status()
            .context("delete request rejected")?;
        Ok(())
    }
}
