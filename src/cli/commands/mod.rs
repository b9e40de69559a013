//! CLI command implementations

pub mod utils;

pub mod auth;
pub mod chat;
pub mod completions;
pub mod config;
pub mod delays;
pub mod export;
pub mod funnel;
pub mod init;
pub mod list;
pub mod metrics;
pub mod team;
