//! `TaskDeck` task store server library.
//!
//! Exposes the HTTP task store for use in tests and embedding.
//! The server keeps all tasks in memory and implements the CRUD
//! contract the `TaskDeck` client expects.

pub mod config;
pub mod http;
pub mod store;
