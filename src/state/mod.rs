/// State management module
///
/// This module handles all application state, including:
/// - Plant records and the default listing (data.rs)
/// - Per-screen fetch slots (fetch.rs)
/// - Screens, uploads and navigation (view.rs)

pub mod data;
pub mod fetch;
pub mod view;
