//! Shared wire types for the `TaskDeck` remote store API.

pub mod api;
pub mod task;
