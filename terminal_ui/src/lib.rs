//! Terminal front end for the todo board: a form to add tasks and a list to
//! complete or delete them, backed by the REST task collection.

pub mod api;
pub mod app;
pub mod board;
pub mod config;
pub mod error;
pub mod notify;
#[cfg(test)]
mod testing;
pub mod ui;
