// SPDX-License-Identifier: MIT
//! Task data model types.

use serde::{Deserialize, Serialize};

/// A single task record.
///
/// `id` is assigned by the store on creation and immutable for the row's
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

/// Request body for create and replace.
///
/// `id` is ignored on create (the store assigns one) and must equal the path
/// id on replace. `completed` defaults to `false` when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskPayload {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}
