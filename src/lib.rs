//! iPrescribe Admin TUI - a terminal dashboard for the iPrescribe
//! telehealth platform
//!
//! This library exposes modules for use in integration tests.

pub mod api;
pub mod app;
pub mod config;
pub mod export;
pub mod models;
pub mod session;
pub mod theme;
pub mod ui;
pub mod viewmodel;
