// SPDX-License-Identifier: MIT
//! Task SQLite operations.

use anyhow::Result;
use sqlx::SqlitePool;

use super::model::Task;

/// Thin storage wrapper for the tasks table.
///
/// Shares the daemon's main SQLite pool; no separate connection needed.
pub struct TaskStorage {
    pool: SqlitePool,
}

impl TaskStorage {
    /// Create a new `TaskStorage` backed by the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All tasks in store order (ascending id). Empty vector when none exist.
    pub async fn list(&self) -> Result<Vec<Task>> {
        Ok(
            sqlx::query_as("SELECT id, title, completed FROM tasks ORDER BY id")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    /// Fetch a task by id.
    pub async fn get(&self, id: i64) -> Result<Option<Task>> {
        Ok(
            sqlx::query_as("SELECT id, title, completed FROM tasks WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    /// Insert a new task and return it with the store-assigned id.
    pub async fn create(&self, title: &str, completed: bool) -> Result<Task> {
        let result = sqlx::query("INSERT INTO tasks (title, completed) VALUES (?, ?)")
            .bind(title)
            .bind(completed)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        self.get(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("task not found after insert"))
    }

    /// Overwrite the stored record for `task.id` with the given full record.
    ///
    /// Returns `false` when the id does not exist. Absence is detected via
    /// `rows_affected()` on the write itself, never a pre-read, so a row
    /// removed by a concurrent writer surfaces here as not-found rather than
    /// a lost update. Any other store failure propagates to the caller.
    pub async fn replace(&self, task: &Task) -> Result<bool> {
        let result = sqlx::query("UPDATE tasks SET title = ?, completed = ? WHERE id = ?")
            .bind(&task.title)
            .bind(task.completed)
            .bind(task.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a task by id. Returns `false` when the id does not exist.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqliteConnectOptions;
    use std::str::FromStr;

    async fn make_pool() -> SqlitePool {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(opts).await.unwrap();
        // Run the migration SQL directly
        let migration = include_str!("../storage/migrations/001_tasks.sql");
        for stmt in migration.split(';') {
            let stmt = stmt.trim();
            if !stmt.is_empty() {
                sqlx::query(stmt).execute(&pool).await.unwrap();
            }
        }
        pool
    }

    fn storage(pool: SqlitePool) -> TaskStorage {
        TaskStorage::new(pool)
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let s = storage(make_pool().await);
        let a = s.create("Buy milk", false).await.unwrap();
        let b = s.create("Walk the dog", false).await.unwrap();

        assert!(a.id > 0, "store must assign a positive id");
        assert_ne!(a.id, b.id, "ids must be unique");
        assert_eq!(a.title, "Buy milk");
        assert!(!a.completed);

        // Each task is retrievable under its assigned id.
        let fetched = s.get(a.id).await.unwrap().expect("task should exist");
        assert_eq!(fetched, a);
    }

    #[tokio::test]
    async fn test_list_in_store_order() {
        let s = storage(make_pool().await);
        assert!(s.list().await.unwrap().is_empty());

        let a = s.create("first", false).await.unwrap();
        let b = s.create("second", true).await.unwrap();
        let c = s.create("third", false).await.unwrap();

        let all = s.list().await.unwrap();
        assert_eq!(all, vec![a, b, c]);
    }

    #[tokio::test]
    async fn test_replace_existing() {
        let s = storage(make_pool().await);
        let created = s.create("Buy milk", false).await.unwrap();

        let updated = Task {
            id: created.id,
            title: "Buy milk".to_string(),
            completed: true,
        };
        let written = s.replace(&updated).await.unwrap();
        assert!(written, "replace of an existing id must report success");

        let fetched = s.get(created.id).await.unwrap().unwrap();
        assert!(fetched.completed);
    }

    #[tokio::test]
    async fn test_replace_missing_creates_nothing() {
        let s = storage(make_pool().await);
        let ghost = Task {
            id: 42,
            title: "never stored".to_string(),
            completed: false,
        };
        let written = s.replace(&ghost).await.unwrap();
        assert!(!written, "replace of a missing id must report not-found");
        assert!(
            s.list().await.unwrap().is_empty(),
            "a failed replace must not create a record"
        );
    }

    #[tokio::test]
    async fn test_delete_then_get_is_none() {
        let s = storage(make_pool().await);
        let t = s.create("ephemeral", false).await.unwrap();

        let removed = s.delete(t.id).await.unwrap();
        assert!(removed);
        assert!(s.get(t.id).await.unwrap().is_none());

        // Deleting again reports not-found.
        let again = s.delete(t.id).await.unwrap();
        assert!(!again);
    }

    #[tokio::test]
    async fn test_list_after_creates_and_deletes() {
        let s = storage(make_pool().await);
        let mut created = Vec::new();
        for i in 0..5 {
            created.push(s.create(&format!("task {i}"), false).await.unwrap());
        }
        // Delete two of the five.
        s.delete(created[1].id).await.unwrap();
        s.delete(created[3].id).await.unwrap();

        let remaining = s.list().await.unwrap();
        assert_eq!(remaining.len(), 3);
        for t in &remaining {
            assert!(
                created.contains(t),
                "every listed task must match a prior create"
            );
        }
        assert!(!remaining.iter().any(|t| t.id == created[1].id));
        assert!(!remaining.iter().any(|t| t.id == created[3].id));
    }
}
