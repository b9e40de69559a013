//! RFP pipeline toolkit
//!
//! Tracks sales RFPs through a fixed pipeline, derives pipeline analytics,
//! and exports flat per-record datasets as CSV or JSON.

pub mod analytics;
pub mod assistant;
pub mod cli;
pub mod core;
pub mod entities;
pub mod export;
pub mod yaml;
