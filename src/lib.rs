//! Personal productivity and worship tracker for the terminal: daily prayers, tasks, reading,
//! per-course study metrics and a pomodoro timer, all kept in a local key-value store.
//!

pub mod auth;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fs;
pub mod i18n;
pub mod storage;
pub mod study;
pub mod timer;
pub mod toast;
pub mod tracking;
pub mod utils;
