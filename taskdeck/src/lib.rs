//! `TaskDeck` — terminal task-list manager library.

pub mod app;
pub mod bridge;
pub mod config;
pub mod store;
pub mod tasks;
pub mod ui;
