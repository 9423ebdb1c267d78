//! A small wiki: Markdown entries kept as files, browsed and edited over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod markup;
pub mod models;
pub mod search;
pub mod store;
