//! CLI helper modules for the `taskd ui` terminal client.

pub mod client;
pub mod task_ui;
